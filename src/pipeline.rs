//! End-to-end formatting: raw text through the analyzer and the assembler.

use std::fmt;

use tracing::{debug, warn};

use crate::analyze::Analyzer;
use crate::assemble::Assembler;
use crate::error::{Error, Result};

/// Progress of a single formatting run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProcessingStatus {
    #[default]
    Idle,
    Analyzing,
    Generating,
    Success,
    Error,
}

impl ProcessingStatus {
    /// Whether a run is in flight. Input should not be accepted meanwhile.
    pub fn is_busy(self) -> bool {
        matches!(self, ProcessingStatus::Analyzing | ProcessingStatus::Generating)
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProcessingStatus::Idle => "idle",
            ProcessingStatus::Analyzing => "analyzing",
            ProcessingStatus::Generating => "generating",
            ProcessingStatus::Success => "success",
            ProcessingStatus::Error => "error",
        })
    }
}

/// Analyzer plus assembler.
///
/// Runs are strictly sequential and share no state with one another; a
/// failed run is retried only by calling [`Pipeline::run`] again.
pub struct Pipeline<A> {
    analyzer: A,
    assembler: Assembler,
}

impl<A: Analyzer> Pipeline<A> {
    pub fn new(analyzer: A, assembler: Assembler) -> Self {
        Self {
            analyzer,
            assembler,
        }
    }

    pub fn assembler(&self) -> &Assembler {
        &self.assembler
    }

    /// Format `raw` into DOCX bytes, reporting each stage to `on_status`.
    ///
    /// Blank input is rejected before the analyzer is called and reports
    /// no status.
    pub async fn run<F>(&self, raw: &str, mut on_status: F) -> Result<Vec<u8>>
    where
        F: FnMut(ProcessingStatus) + Send,
    {
        if raw.trim().is_empty() {
            return Err(Error::EmptyInput);
        }

        on_status(ProcessingStatus::Analyzing);
        let doc = match self.analyzer.analyze(raw).await {
            Ok(doc) => doc,
            Err(e) => {
                warn!(error = %e, "analysis failed");
                on_status(ProcessingStatus::Error);
                return Err(Error::Analysis(e));
            }
        };

        on_status(ProcessingStatus::Generating);
        match self.assembler.assemble(&doc) {
            Ok(bytes) => {
                debug!(bytes = bytes.len(), "formatting run succeeded");
                on_status(ProcessingStatus::Success);
                Ok(bytes)
            }
            Err(e) => {
                on_status(ProcessingStatus::Error);
                Err(e)
            }
        }
    }
}

/// Default download name for a run finished on the given date:
/// `بحث_منسق_YYYY-MM-DD.docx`.
pub fn default_output_name(year: i32, month: u32, day: u32) -> String {
    format!("بحث_منسق_{year:04}-{month:02}-{day:02}.docx")
}
