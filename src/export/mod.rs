//! Export module for writing assembled documents.
//!
//! Provides the `Exporter` trait and the WordprocessingML (DOCX)
//! implementation.
//!
//! # Architecture
//!
//! The `Exporter` trait uses a builder pattern:
//! - `new()` creates an exporter with default configuration
//! - `with_config()` allows customization
//! - `export()` writes to any `Write + Seek` destination
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use tansiq::export::{DocxExporter, Exporter};
//! use tansiq::{Assembler, StructuredDocument};
//!
//! let document = Assembler::default().build(&StructuredDocument::new("مقدمة"))?;
//! let mut out = Cursor::new(Vec::new());
//! DocxExporter::new().export(&document, &mut out)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::io::{self, Seek, Write};

use crate::document::Document;

mod docx;
mod parts;
mod wml;

pub use docx::{DocxConfig, DocxExporter};

/// Trait for exporting assembled documents to specific formats.
pub trait Exporter {
    /// Export the document to the provided writer.
    ///
    /// The writer can be:
    /// - `std::fs::File` for disk output
    /// - `std::io::Cursor<Vec<u8>>` for in-memory output
    /// - Any other type implementing `Write + Seek`
    fn export<W: Write + Seek>(&self, document: &Document, writer: &mut W) -> io::Result<()>;
}
