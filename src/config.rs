//! Thesis formatting profile.
//!
//! All typography and page constants live in one immutable [`ThesisProfile`]
//! handed to the [`crate::Assembler`]. The default profile follows the Saudi
//! university conventions; institutions override it with a TOML file:
//!
//! ```toml
//! font = "Traditional Arabic"
//! body_line_spacing = 1.5
//!
//! [styles.heading]
//! size = 16
//! bold = true
//! alignment = "right"
//! spacing_before = 25
//! spacing_after = 7.5
//!
//! [page.margins]
//! binding = 3.0
//! outer = 2.5
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::footnote::UnresolvedPolicy;
use crate::numerals::{FootnoteNumbering, NumberFormat};
use crate::style::{Alignment, HalfPoints, LineSpacing, PageGeometry, StyleTable};

pub const DEFAULT_FONT: &str = "Traditional Arabic";
pub const DEFAULT_LANGUAGE: &str = "ar-SA";

/// Footnote typography.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FootnoteStyle {
    /// Size of footnote bodies and their numbers.
    pub size: HalfPoints,
    /// Size of the raised reference in body text.
    pub reference_size: HalfPoints,
    pub line_spacing: LineSpacing,
}

impl Default for FootnoteStyle {
    fn default() -> Self {
        Self {
            size: HalfPoints(24),
            reference_size: HalfPoints(24),
            line_spacing: LineSpacing::SINGLE,
        }
    }
}

/// Immutable formatting configuration for one institution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThesisProfile {
    /// Academic typeface, applied document-wide and to every run.
    pub font: String,
    /// Language tag for complex-script runs and document metadata.
    pub language: String,
    pub styles: StyleTable,
    pub body_line_spacing: LineSpacing,
    pub footnotes: FootnoteStyle,
    pub footnote_numbering: FootnoteNumbering,
    pub page: PageGeometry,
    /// Digit shapes of the footer page number.
    pub page_number_format: NumberFormat,
    pub footer_size: HalfPoints,
    pub unresolved_markers: UnresolvedPolicy,
}

impl Default for ThesisProfile {
    fn default() -> Self {
        Self {
            font: DEFAULT_FONT.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            styles: StyleTable::default(),
            body_line_spacing: LineSpacing::ONE_AND_HALF,
            footnotes: FootnoteStyle::default(),
            footnote_numbering: FootnoteNumbering::default(),
            page: PageGeometry::default(),
            page_number_format: NumberFormat::ArabicIndic,
            footer_size: HalfPoints(24),
            unresolved_markers: UnresolvedPolicy::Drop,
        }
    }
}

impl ThesisProfile {
    /// Parse a profile from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let profile: Self = toml::from_str(s).map_err(|e| Error::Config(e.to_string()))?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn with_unresolved_markers(mut self, policy: UnresolvedPolicy) -> Self {
        self.unresolved_markers = policy;
        self
    }

    /// Check the invariants the assembler relies on.
    pub fn validate(&self) -> Result<()> {
        if self.font.trim().is_empty() {
            return Err(Error::Config("font must not be empty".into()));
        }
        if !self.page.binding_is_widest() {
            return Err(Error::Config(
                "binding margin must be wider than the other three margins".into(),
            ));
        }
        let sizes = [
            ("styles.title.size", self.styles.title.size),
            ("styles.heading.size", self.styles.heading.size),
            ("styles.paragraph.size", self.styles.paragraph.size),
            ("footnotes.size", self.footnotes.size),
            ("footnotes.reference_size", self.footnotes.reference_size),
            ("footer_size", self.footer_size),
        ];
        if let Some((name, _)) = sizes.iter().find(|(_, size)| size.0 == 0) {
            return Err(Error::Config(format!("{name} must be positive")));
        }
        if self.styles.heading.alignment == Alignment::Justified {
            return Err(Error::Config("headings must not be justified".into()));
        }
        if self.footnote_numbering.start == 0 {
            return Err(Error::Config("footnote numbering must start at 1 or above".into()));
        }
        if !self.body_line_spacing.is_valid() || !self.footnotes.line_spacing.is_valid() {
            return Err(Error::Config("line spacing must be positive".into()));
        }
        Ok(())
    }
}
