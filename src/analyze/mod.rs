//! Text analysis: raw pasted text in, [`StructuredDocument`] out.
//!
//! The analyzer decides where footnote markers go and how the text is
//! split into titled, headed, and body elements. Everything downstream is
//! deterministic; this is the only stage that talks to the outside world.

use async_trait::async_trait;

use crate::error::AnalysisError;
use crate::schema::StructuredDocument;

#[cfg(feature = "gemini")]
mod gemini;
mod structured;

#[cfg(feature = "gemini")]
pub use gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL, GeminiAnalyzer, GeminiConfig, SYSTEM_INSTRUCTION};
pub use structured::StructuredJsonAnalyzer;

/// Converts raw text into a structured document.
///
/// Implementations must return either a schema-valid document or an
/// [`AnalysisError`]; partial documents are never produced.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, raw: &str) -> Result<StructuredDocument, AnalysisError>;
}

#[async_trait]
impl<A: Analyzer + ?Sized> Analyzer for Box<A> {
    async fn analyze(&self, raw: &str) -> Result<StructuredDocument, AnalysisError> {
        (**self).analyze(raw).await
    }
}
