use async_trait::async_trait;
use tracing::debug;

use super::Analyzer;
use crate::error::AnalysisError;
use crate::schema::StructuredDocument;

/// Offline analyzer for input that is already a structured document in
/// JSON form.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredJsonAnalyzer;

#[async_trait]
impl Analyzer for StructuredJsonAnalyzer {
    async fn analyze(&self, raw: &str) -> Result<StructuredDocument, AnalysisError> {
        let doc = StructuredDocument::from_json(raw)?;
        debug!(
            elements = doc.elements.len(),
            footnotes = doc.footnotes.len(),
            "parsed structured document"
        );
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ElementKind;

    #[tokio::test]
    async fn test_parses_valid_document() {
        let json = r#"{
            "title": "مقدمة",
            "elements": [{"type": "heading1", "text": "المبحث الأول"}],
            "footnotes": []
        }"#;
        let doc = StructuredJsonAnalyzer.analyze(json).await.unwrap();
        assert_eq!(doc.title, "مقدمة");
        assert_eq!(doc.elements[0].kind, ElementKind::Heading1);
    }

    #[tokio::test]
    async fn test_rejects_unknown_element_type() {
        let json = r#"{"title": "x", "elements": [{"type": "quote", "text": "y"}], "footnotes": []}"#;
        assert!(matches!(
            StructuredJsonAnalyzer.analyze(json).await,
            Err(AnalysisError::Schema(_))
        ));
    }
}
