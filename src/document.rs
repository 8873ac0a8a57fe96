//! Paginated document model produced by the assembler and consumed by
//! exporters.
//!
//! The model is close to WordprocessingML: paragraphs of styled runs, a
//! footnote table keyed by sequential number, a footer, and one section
//! with page geometry and numbering policy.

use crate::numerals::{FootnoteNumbering, NumberFormat};
use crate::style::{Alignment, HalfPoints, LineSpacing, ResolvedMargins, Twips};

/// Character formatting of a run.
///
/// The document font is not stored per run; exporters re-apply it to every
/// run explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunFormat {
    pub size: HalfPoints,
    pub bold: bool,
    pub superscript: bool,
    /// Right-to-left run direction.
    pub rtl: bool,
}

impl RunFormat {
    pub fn new(size: HalfPoints) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn superscript(mut self) -> Self {
        self.superscript = true;
        self
    }

    pub fn rtl(mut self) -> Self {
        self.rtl = true;
        self
    }
}

/// A contiguous span within a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Run {
    Text { text: String, format: RunFormat },
    /// Reference mark in body text pointing at footnote `id`.
    FootnoteReference { id: u32, format: RunFormat },
    /// The number of the enclosing footnote, rendered inside its body.
    FootnoteMark { format: RunFormat },
    /// Current page number field. `placeholder` is the cached result shown
    /// before the field is updated.
    PageNumber {
        format: RunFormat,
        placeholder: String,
    },
}

impl Run {
    pub fn text(text: impl Into<String>, format: RunFormat) -> Self {
        Run::Text {
            text: text.into(),
            format,
        }
    }

    pub fn format(&self) -> &RunFormat {
        match self {
            Run::Text { format, .. }
            | Run::FootnoteReference { format, .. }
            | Run::FootnoteMark { format }
            | Run::PageNumber { format, .. } => format,
        }
    }

    /// The literal text of a text run.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Run::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Paragraph style for footnote bodies, defined in `word/styles.xml`.
pub const FOOTNOTE_TEXT_STYLE: &str = "FootnoteText";

/// Paragraph-level formatting.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParagraphFormat {
    /// Named paragraph style (`w:pStyle`).
    pub style: Option<&'static str>,
    pub alignment: Alignment,
    /// Explicit bidirectional flag, never inherited.
    pub bidi: bool,
    pub spacing_before: Option<Twips>,
    pub spacing_after: Option<Twips>,
    pub line_spacing: Option<LineSpacing>,
}

impl ParagraphFormat {
    /// A right-to-left paragraph with the given alignment.
    pub fn rtl(alignment: Alignment) -> Self {
        Self {
            alignment,
            bidi: true,
            ..Self::default()
        }
    }

    pub fn style(mut self, id: &'static str) -> Self {
        self.style = Some(id);
        self
    }

    pub fn spacing(mut self, before: Twips, after: Twips) -> Self {
        self.spacing_before = Some(before);
        self.spacing_after = Some(after);
        self
    }

    pub fn line_spacing(mut self, line: LineSpacing) -> Self {
        self.line_spacing = Some(line);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub format: ParagraphFormat,
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new(format: ParagraphFormat) -> Self {
        Self {
            format,
            runs: Vec::new(),
        }
    }

    pub fn push(&mut self, run: Run) {
        self.runs.push(run);
    }

    pub fn with_run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    /// Concatenated text of the text runs.
    pub fn plain_text(&self) -> String {
        self.runs.iter().filter_map(Run::as_text).collect()
    }

    /// Footnote ids referenced from this paragraph, in order.
    pub fn footnote_references(&self) -> impl Iterator<Item = u32> + '_ {
        self.runs.iter().filter_map(|run| match run {
            Run::FootnoteReference { id, .. } => Some(*id),
            _ => None,
        })
    }
}

/// One footnote body registered under its sequential number.
#[derive(Debug, Clone, PartialEq)]
pub struct FootnoteBody {
    pub id: u32,
    pub paragraph: Paragraph,
}

/// Page and numbering setup for the single document section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section {
    pub page_width: Twips,
    pub page_height: Twips,
    pub margins: ResolvedMargins,
    pub footnote_numbering: FootnoteNumbering,
    pub page_number_format: NumberFormat,
    /// Right-to-left section (column order and gutter side).
    pub bidi: bool,
}

/// A fully assembled document, ready to serialize.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Document title, also written to the package metadata.
    pub title: String,
    pub language: String,
    /// Default typeface, applied document-wide and re-applied per run.
    pub font: String,
    /// Default run size for the document-wide style.
    pub default_size: HalfPoints,
    pub body: Vec<Paragraph>,
    pub footnotes: Vec<FootnoteBody>,
    pub footer: Paragraph,
    pub section: Section,
}

impl Document {
    pub fn footnote(&self, id: u32) -> Option<&FootnoteBody> {
        self.footnotes.iter().find(|f| f.id == id)
    }
}
