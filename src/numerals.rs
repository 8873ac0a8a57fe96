//! Numeral glyphs and footnote numbering policy.
//!
//! Footnote and page numbers in Arabic theses are rendered with the
//! Arabic-Indic digits (٠١٢٣٤٥٦٧٨٩) rather than ASCII digits, and the
//! footnote counter restarts on every physical page.

use serde::{Deserialize, Serialize};

/// Digit shapes used when rendering a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NumberFormat {
    /// ASCII digits 0-9.
    Decimal,
    /// Arabic-Indic digits U+0660..U+0669.
    #[default]
    ArabicIndic,
}

impl NumberFormat {
    /// The WordprocessingML `ST_NumberFormat` token for this format.
    pub fn ooxml_token(self) -> &'static str {
        match self {
            NumberFormat::Decimal => "decimal",
            NumberFormat::ArabicIndic => "hindiNumbers",
        }
    }

    /// Inverse of [`NumberFormat::ooxml_token`].
    pub fn from_ooxml_token(token: &str) -> Option<Self> {
        match token {
            "decimal" => Some(NumberFormat::Decimal),
            "hindiNumbers" => Some(NumberFormat::ArabicIndic),
            _ => None,
        }
    }

    /// Render `n` with this format's digit glyphs.
    ///
    /// ```
    /// use tansiq::NumberFormat;
    ///
    /// assert_eq!(NumberFormat::ArabicIndic.render(1), "١");
    /// assert_eq!(NumberFormat::ArabicIndic.render(205), "٢٠٥");
    /// assert_eq!(NumberFormat::Decimal.render(12), "12");
    /// ```
    pub fn render(self, n: u32) -> String {
        match self {
            NumberFormat::Decimal => n.to_string(),
            NumberFormat::ArabicIndic => to_arabic_indic(&n.to_string()),
        }
    }
}

const ARABIC_INDIC_ZERO: u32 = 0x0660;

/// Replace every ASCII digit in `s` with its Arabic-Indic counterpart.
pub fn to_arabic_indic(s: &str) -> String {
    s.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32(ARABIC_INDIC_ZERO + d).unwrap_or(c),
            None => c,
        })
        .collect()
}

/// When the footnote counter returns to its start value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NumberRestart {
    Continuous,
    EachSection,
    #[default]
    EachPage,
}

impl NumberRestart {
    /// The WordprocessingML `ST_RestartNumber` token.
    pub fn ooxml_token(self) -> &'static str {
        match self {
            NumberRestart::Continuous => "continuous",
            NumberRestart::EachSection => "eachSect",
            NumberRestart::EachPage => "eachPage",
        }
    }

    pub fn from_ooxml_token(token: &str) -> Option<Self> {
        match token {
            "continuous" => Some(NumberRestart::Continuous),
            "eachSect" => Some(NumberRestart::EachSection),
            "eachPage" => Some(NumberRestart::EachPage),
            _ => None,
        }
    }
}

/// Footnote numbering policy written into the document settings and the
/// section properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FootnoteNumbering {
    pub start: u32,
    pub restart: NumberRestart,
    pub format: NumberFormat,
}

impl Default for FootnoteNumbering {
    fn default() -> Self {
        Self {
            start: 1,
            restart: NumberRestart::EachPage,
            format: NumberFormat::ArabicIndic,
        }
    }
}

impl FootnoteNumbering {
    /// The rendered footnote labels on each physical page, given how many
    /// footnote references land on each page.
    ///
    /// Models the counter Word shows when it lays the document out under
    /// this policy. The package only carries `w:numStart`, `w:numFmt` and
    /// `w:numRestart`; pagination and these labels are Word's. A single
    /// section is assumed, so [`NumberRestart::EachSection`] behaves like
    /// continuous numbering.
    pub fn page_labels(&self, footnotes_per_page: &[usize]) -> Vec<Vec<String>> {
        let mut next = self.start;
        footnotes_per_page
            .iter()
            .map(|&count| {
                if self.restart == NumberRestart::EachPage {
                    next = self.start;
                }
                (0..count)
                    .map(|_| {
                        let label = self.format.render(next);
                        next += 1;
                        label
                    })
                    .collect()
            })
            .collect()
    }
}
