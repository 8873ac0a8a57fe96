//! The structured document handed from the text analyzer to the assembler.
//!
//! Element text carries inline footnote markers of the form `[[FN:id]]`,
//! each naming a [`Footnote::id`] at the exact position of the reference.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// A footnote body produced by the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Footnote {
    /// Opaque id, unique within a document.
    pub id: String,
    /// Footnote body. Never contains markers of its own.
    pub text: String,
}

impl Footnote {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Semantic role of a content element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Title,
    Heading1,
    Heading2,
    Paragraph,
}

impl ElementKind {
    /// All element kinds, in schema order.
    pub const ALL: [ElementKind; 4] = [
        ElementKind::Title,
        ElementKind::Heading1,
        ElementKind::Heading2,
        ElementKind::Paragraph,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Title => "title",
            ElementKind::Heading1 => "heading1",
            ElementKind::Heading2 => "heading2",
            ElementKind::Paragraph => "paragraph",
        }
    }

    pub fn is_heading(self) -> bool {
        matches!(self, ElementKind::Heading1 | ElementKind::Heading2)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One content element in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocElement {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Text with zero or more inline `[[FN:id]]` markers.
    pub text: String,
}

impl DocElement {
    pub fn new(kind: ElementKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(ElementKind::Paragraph, text)
    }
}

/// The sole handoff contract between analyzer and assembler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StructuredDocument {
    pub title: String,
    pub elements: Vec<DocElement>,
    pub footnotes: Vec<Footnote>,
}

impl StructuredDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_element(mut self, element: DocElement) -> Self {
        self.elements.push(element);
        self
    }

    pub fn with_footnote(mut self, footnote: Footnote) -> Self {
        self.footnotes.push(footnote);
        self
    }

    /// Parse analyzer output, rejecting anything that does not match the
    /// schema exactly: missing fields, unknown fields, or an element type
    /// outside the four enumerated roles.
    ///
    /// ```
    /// use tansiq::StructuredDocument;
    ///
    /// let doc = StructuredDocument::from_json(
    ///     r#"{"title":"مقدمة","elements":[],"footnotes":[]}"#,
    /// )?;
    /// assert_eq!(doc.title, "مقدمة");
    /// # Ok::<(), tansiq::AnalysisError>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        if json.trim().is_empty() {
            return Err(AnalysisError::EmptyResponse);
        }
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> String {
        // Plain strings and enums cannot fail to serialize.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_document() {
        let json = r#"{
            "title": "مقدمة",
            "elements": [
                {"type": "heading1", "text": "المبحث الأول"},
                {"type": "paragraph", "text": "هذا نص [[FN:a]] تجريبي."}
            ],
            "footnotes": [{"id": "a", "text": "تعليق توضيحي"}]
        }"#;
        let doc = StructuredDocument::from_json(json).unwrap();
        assert_eq!(doc.elements.len(), 2);
        assert_eq!(doc.elements[0].kind, ElementKind::Heading1);
        assert_eq!(doc.footnotes[0], Footnote::new("a", "تعليق توضيحي"));
    }

    #[test]
    fn test_unknown_element_type_is_rejected() {
        let json = r#"{"title":"t","elements":[{"type":"quote","text":"x"}],"footnotes":[]}"#;
        assert!(matches!(
            StructuredDocument::from_json(json),
            Err(AnalysisError::Schema(_))
        ));
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let json = r#"{"title":"t","elements":[]}"#;
        assert!(StructuredDocument::from_json(json).is_err());

        let json = r#"{"title":"t","elements":[{"type":"paragraph"}],"footnotes":[]}"#;
        assert!(StructuredDocument::from_json(json).is_err());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let json = r#"{"title":"t","elements":[],"footnotes":[],"extra":1}"#;
        assert!(StructuredDocument::from_json(json).is_err());
    }

    #[test]
    fn test_empty_response() {
        assert!(matches!(
            StructuredDocument::from_json("  "),
            Err(AnalysisError::EmptyResponse)
        ));
    }

    #[test]
    fn test_json_roundtrip_keeps_type_names() {
        let doc = StructuredDocument::new("عنوان")
            .with_element(DocElement::new(ElementKind::Heading2, "مطلب"))
            .with_footnote(Footnote::new("1", "حاشية"));
        let json = doc.to_json();
        assert!(json.contains("\"heading2\""));
        assert_eq!(StructuredDocument::from_json(&json).unwrap(), doc);
    }
}
