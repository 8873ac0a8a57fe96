//! # tansiq
//!
//! Formats Arabic academic text into Word documents that follow Saudi
//! thesis conventions: right-to-left paragraphs, justified body text with
//! right-aligned headings, asymmetric binding margins, and footnotes
//! numbered in Arabic-Indic digits that restart on every page.
//!
//! ## Pipeline
//!
//! 1. An [`Analyzer`](analyze::Analyzer) turns raw text into a
//!    [`StructuredDocument`]: a title, typed elements, and footnotes,
//!    with `[[FN:id]]` markers placed inside the element text.
//! 2. The [`Assembler`] resolves markers against the footnote list,
//!    applies the [`ThesisProfile`] styles, and serializes a DOCX package.
//!
//! ## Quick Start
//!
//! ```
//! use tansiq::{Assembler, DocElement, ElementKind, Footnote, StructuredDocument};
//!
//! let doc = StructuredDocument::new("الفصل الأول")
//!     .with_element(DocElement::new(ElementKind::Heading1, "المبحث الأول"))
//!     .with_element(DocElement::paragraph("نص البحث[[FN:1]] يستمر هنا."))
//!     .with_footnote(Footnote::new("1", "انظر: المصدر السابق، ص ١٢."));
//!
//! let docx = Assembler::default().assemble(&doc)?;
//! assert!(docx.starts_with(b"PK"));
//! # Ok::<(), tansiq::Error>(())
//! ```
//!
//! ## Institution Profiles
//!
//! ```
//! use tansiq::{Assembler, ThesisProfile};
//!
//! let profile = ThesisProfile::from_toml_str("font = \"Simplified Arabic\"")?;
//! let assembler = Assembler::new(profile)?;
//! assert_eq!(assembler.profile().font, "Simplified Arabic");
//! # Ok::<(), tansiq::Error>(())
//! ```

pub mod analyze;
pub mod assemble;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod footnote;
pub mod inspect;
pub mod numerals;
pub mod pipeline;
pub mod schema;
pub mod style;
pub mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use assemble::Assembler;
pub use config::ThesisProfile;
pub use document::Document;
pub use error::{AnalysisError, AssemblyError, Error, Result};
pub use footnote::{FootnoteIndex, Span, UnresolvedPolicy, splice};
pub use inspect::{DocxSummary, read_docx, read_docx_from_reader};
pub use numerals::{FootnoteNumbering, NumberFormat, NumberRestart};
pub use pipeline::{Pipeline, ProcessingStatus};
pub use schema::{DocElement, ElementKind, Footnote, StructuredDocument};
