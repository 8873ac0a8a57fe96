//! The element stylist: a static table from element role to style profile.

use serde::{Deserialize, Serialize};

use crate::schema::ElementKind;

use super::{HalfPoints, Twips};

/// Paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    #[default]
    Right,
    Justified,
}

impl Alignment {
    /// The `w:jc` value for a paragraph of the given direction.
    ///
    /// Word and LibreOffice read `left` and `right` as the leading and
    /// trailing edge inside a `w:bidi` paragraph, so the visual sides swap
    /// there: a right-aligned RTL paragraph is written as `left`.
    pub fn ooxml_token(self, rtl: bool) -> &'static str {
        match (self, rtl) {
            (Alignment::Left, false) | (Alignment::Right, true) => "left",
            (Alignment::Right, false) | (Alignment::Left, true) => "right",
            (Alignment::Center, _) => "center",
            (Alignment::Justified, _) => "both",
        }
    }

    /// The visual alignment of a `w:jc` value in a paragraph of the given
    /// direction.
    pub fn from_ooxml_token(token: &str, rtl: bool) -> Option<Self> {
        let (leading, trailing) = if rtl {
            (Alignment::Right, Alignment::Left)
        } else {
            (Alignment::Left, Alignment::Right)
        };
        match token {
            "left" | "start" => Some(leading),
            "right" | "end" => Some(trailing),
            "center" => Some(Alignment::Center),
            "both" | "distribute" => Some(Alignment::Justified),
            _ => None,
        }
    }

    /// The name used in profile files.
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justified => "justified",
        }
    }
}

/// Concrete formatting for one element role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleProfile {
    /// Font size, in points in configuration files.
    pub size: HalfPoints,
    pub bold: bool,
    pub alignment: Alignment,
    /// Space above the paragraph, in points in configuration files.
    pub spacing_before: Twips,
    /// Space below the paragraph, in points in configuration files.
    pub spacing_after: Twips,
}

/// Style profiles per element role. Editing institutional styles is a data
/// change to this table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleTable {
    pub title: StyleProfile,
    /// Shared by `heading1` and `heading2`.
    pub heading: StyleProfile,
    pub paragraph: StyleProfile,
}

impl Default for StyleTable {
    fn default() -> Self {
        Self {
            title: StyleProfile {
                size: HalfPoints(36),
                bold: true,
                alignment: Alignment::Center,
                spacing_before: Twips(800),
                spacing_after: Twips(1200),
            },
            heading: StyleProfile {
                size: HalfPoints(32),
                bold: true,
                alignment: Alignment::Right,
                spacing_before: Twips(500),
                spacing_after: Twips(150),
            },
            paragraph: StyleProfile {
                size: HalfPoints(32),
                bold: false,
                alignment: Alignment::Justified,
                spacing_before: Twips(240),
                spacing_after: Twips(150),
            },
        }
    }
}

impl StyleTable {
    /// The profile for an element role.
    pub fn profile(&self, kind: ElementKind) -> &StyleProfile {
        match kind {
            ElementKind::Title => &self.title,
            ElementKind::Heading1 | ElementKind::Heading2 => &self.heading,
            ElementKind::Paragraph => &self.paragraph,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_stable() {
        let table = StyleTable::default();
        for kind in ElementKind::ALL {
            let first = *table.profile(kind);
            for _ in 0..3 {
                assert_eq!(*table.profile(kind), first);
            }
        }
    }

    #[test]
    fn test_default_policy() {
        let table = StyleTable::default();

        let title = table.profile(ElementKind::Title);
        assert!(title.bold);
        assert_eq!(title.alignment, Alignment::Center);

        for kind in [ElementKind::Heading1, ElementKind::Heading2] {
            let heading = table.profile(kind);
            assert!(heading.bold);
            assert_eq!(heading.alignment, Alignment::Right);
        }

        let body = table.profile(ElementKind::Paragraph);
        assert!(!body.bold);
        assert_eq!(body.alignment, Alignment::Justified);

        // Size and spacing classes are ordered title > heading > body.
        assert!(title.size >= table.heading.size);
        assert!(table.heading.size >= body.size);
        assert!(title.spacing_before > table.heading.spacing_before);
        assert!(table.heading.spacing_before > body.spacing_before);
    }

    #[test]
    fn test_alignment_tokens() {
        assert_eq!(Alignment::Justified.ooxml_token(true), "both");
        assert_eq!(Alignment::Center.ooxml_token(true), "center");
        assert_eq!(Alignment::from_ooxml_token("both", true), Some(Alignment::Justified));
        assert_eq!(Alignment::from_ooxml_token("bogus", false), None);
    }

    #[test]
    fn test_alignment_sides_swap_in_rtl_paragraphs() {
        assert_eq!(Alignment::Right.ooxml_token(true), "left");
        assert_eq!(Alignment::Left.ooxml_token(true), "right");
        assert_eq!(Alignment::Right.ooxml_token(false), "right");

        assert_eq!(Alignment::from_ooxml_token("left", true), Some(Alignment::Right));
        assert_eq!(Alignment::from_ooxml_token("start", true), Some(Alignment::Right));
        assert_eq!(Alignment::from_ooxml_token("right", true), Some(Alignment::Left));
        assert_eq!(Alignment::from_ooxml_token("right", false), Some(Alignment::Right));

        for alignment in [
            Alignment::Left,
            Alignment::Center,
            Alignment::Right,
            Alignment::Justified,
        ] {
            for rtl in [false, true] {
                let token = alignment.ooxml_token(rtl);
                assert_eq!(Alignment::from_ooxml_token(token, rtl), Some(alignment));
            }
        }
    }
}
