//! DOCX exporter.
//!
//! Packages the WordprocessingML parts of an assembled [`Document`] into an
//! OPC zip container.

use std::io::{self, Seek, Write};

use zip::CompressionMethod;
use zip::DateTime;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::document::Document;

use super::Exporter;
use super::parts;
use super::wml;

/// Configuration for DOCX export.
#[derive(Debug, Clone, Default)]
pub struct DocxConfig {
    /// Compression level for deflate (0-9, default 6).
    pub compression_level: Option<u32>,
}

/// DOCX format exporter.
///
/// Produces a package Word opens directly: document, styles, settings,
/// footnotes, footer, and core properties.
#[derive(Debug, Clone, Default)]
pub struct DocxExporter {
    config: DocxConfig,
}

impl DocxExporter {
    /// Create a new exporter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the exporter with custom settings.
    pub fn with_config(mut self, config: DocxConfig) -> Self {
        self.config = config;
        self
    }
}

impl Exporter for DocxExporter {
    fn export<W: Write + Seek>(&self, document: &Document, writer: &mut W) -> io::Result<()> {
        let mut zip = ZipWriter::new(writer);

        let compression_level = self.config.compression_level.unwrap_or(6);
        // Fixed timestamps keep the package byte-for-byte reproducible.
        let deflated = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(compression_level as i64))
            .last_modified_time(DateTime::default());

        let entries: [(&str, String); 10] = [
            ("[Content_Types].xml", parts::content_types_xml().to_string()),
            ("_rels/.rels", parts::package_rels_xml().to_string()),
            ("docProps/core.xml", parts::core_xml(document)),
            ("docProps/app.xml", parts::app_xml().to_string()),
            ("word/document.xml", wml::document_xml(document)),
            ("word/styles.xml", parts::styles_xml(document)),
            ("word/settings.xml", parts::settings_xml(document)),
            ("word/footnotes.xml", wml::footnotes_xml(document)),
            ("word/footer1.xml", wml::footer_xml(document)),
            (
                "word/_rels/document.xml.rels",
                parts::document_rels_xml().to_string(),
            ),
        ];

        for (path, content) in &entries {
            zip.start_file(*path, deflated).map_err(io_error)?;
            zip.write_all(content.as_bytes())?;
        }

        zip.finish().map_err(io_error)?;
        Ok(())
    }
}

/// Convert zip error to io error.
fn io_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> io::Error {
    io::Error::other(e)
}
