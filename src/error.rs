//! Error types for tansiq operations.

use std::borrow::Cow;

use thiserror::Error;

/// User-facing message for a failed text analysis.
pub const ANALYSIS_FAILED_MESSAGE: &str = "فشل تحليل النص. يرجى التأكد من وضوح علامات الحواشي.";

/// User-facing message for a failed document assembly.
pub const ASSEMBLY_FAILED_MESSAGE: &str = "حدث خطأ في محرك التنسيق. تأكد من جودة النص المدخل.";

/// User-facing message for blank input text.
pub const EMPTY_INPUT_MESSAGE: &str = "النص المدخل فارغ. يرجى إدخال نص البحث.";

/// User-facing message for an invalid thesis profile.
pub const INVALID_PROFILE_MESSAGE: &str = "ملف إعدادات التنسيق غير صالح.";

/// User-facing message for a file that cannot be read or written.
pub const FILE_ACCESS_MESSAGE: &str = "تعذر الوصول إلى الملف.";

/// User-facing message for a DOCX package that cannot be inspected.
pub const UNREADABLE_DOCUMENT_MESSAGE: &str = "تعذرت قراءة المستند.";

/// User-facing message for everything else.
pub const UNEXPECTED_FAILURE_MESSAGE: &str = "حدث خطأ تقني غير متوقع. يرجى المحاولة لاحقاً.";

/// Errors surfaced to callers of the formatting pipeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error("input text is empty")]
    EmptyInput,

    #[error("text analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    /// The formatting engine failed. The cause is logged, never exposed.
    #[error("formatting engine failed")]
    Assembly,

    #[error("unresolved footnote reference `{id}` in element {element}")]
    UnresolvedFootnote { id: String, element: usize },

    #[error("invalid thesis profile: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot read document: {0}")]
    Inspect(String),
}

impl Error {
    /// Translate the error into the single human-readable message domain
    /// shown by the presentation layer.
    pub fn user_message(&self) -> Cow<'static, str> {
        match self {
            Error::Analysis(AnalysisError::Api { message, .. }) if !message.is_empty() => {
                Cow::Owned(format!("{ANALYSIS_FAILED_MESSAGE} ({message})"))
            }
            Error::Analysis(_) => Cow::Borrowed(ANALYSIS_FAILED_MESSAGE),
            Error::Assembly => Cow::Borrowed(ASSEMBLY_FAILED_MESSAGE),
            Error::UnresolvedFootnote { id, .. } => Cow::Owned(format!(
                "{ASSEMBLY_FAILED_MESSAGE} (الحاشية «{id}» غير موجودة)"
            )),
            Error::EmptyInput => Cow::Borrowed(EMPTY_INPUT_MESSAGE),
            Error::Config(detail) => Cow::Owned(format!("{INVALID_PROFILE_MESSAGE} ({detail})")),
            Error::Io(e) if is_file_access(e) => {
                Cow::Owned(format!("{FILE_ACCESS_MESSAGE} ({e})"))
            }
            Error::Io(_) => Cow::Borrowed(UNEXPECTED_FAILURE_MESSAGE),
            Error::Inspect(detail) => {
                Cow::Owned(format!("{UNREADABLE_DOCUMENT_MESSAGE} ({detail})"))
            }
        }
    }
}

fn is_file_access(err: &std::io::Error) -> bool {
    use std::io::ErrorKind;
    matches!(
        err.kind(),
        ErrorKind::NotFound
            | ErrorKind::PermissionDenied
            | ErrorKind::IsADirectory
            | ErrorKind::NotADirectory
            | ErrorKind::AlreadyExists
            | ErrorKind::ReadOnlyFilesystem
    )
}

/// Failures of the external text analyzer, including schema violations in
/// its output.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("analyzer request failed: {0}")]
    Transport(String),

    #[error("analyzer returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("analyzer returned an empty response")]
    EmptyResponse,

    #[error("analyzer output violates the document schema: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("no API key configured for the analyzer")]
    MissingCredentials,
}

/// Internal causes of an assembly failure.
///
/// [`crate::Assembler::assemble`] logs these and re-signals them as
/// [`Error::Assembly`]; [`crate::Assembler::build`] returns them directly.
#[derive(Error, Debug)]
pub enum AssemblyError {
    #[error("duplicate footnote id `{0}`")]
    DuplicateFootnote(String),

    #[error("unresolved footnote reference `{id}` in element {element}")]
    UnresolvedFootnote { id: String, element: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_message() {
        assert_eq!(Error::EmptyInput.user_message(), EMPTY_INPUT_MESSAGE);
    }

    #[test]
    fn test_config_message_carries_detail() {
        let err = Error::Config("binding margin must be at least 3 cm".into());
        let message = err.user_message();
        assert!(message.starts_with(INVALID_PROFILE_MESSAGE));
        assert!(message.contains("binding margin must be at least 3 cm"));
    }

    #[test]
    fn test_io_message_carries_cause() {
        let err = Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "/tmp/missing.txt",
        ));
        let message = err.user_message();
        assert!(message.starts_with(FILE_ACCESS_MESSAGE));
        assert!(message.contains("/tmp/missing.txt"));
    }

    #[test]
    fn test_inspect_message_carries_detail() {
        let message = Error::Inspect("missing word/document.xml".into()).user_message();
        assert!(message.starts_with(UNREADABLE_DOCUMENT_MESSAGE));
        assert!(message.contains("word/document.xml"));
    }

    #[test]
    fn test_analysis_and_assembly_messages() {
        assert_eq!(
            Error::Analysis(AnalysisError::EmptyResponse).user_message(),
            ANALYSIS_FAILED_MESSAGE
        );
        let api = Error::Analysis(AnalysisError::Api {
            status: 429,
            message: "quota exceeded".into(),
        });
        assert!(api.user_message().contains("quota exceeded"));
        assert_eq!(Error::Assembly.user_message(), ASSEMBLY_FAILED_MESSAGE);
    }

    #[test]
    fn test_other_io_failures_use_generic_message() {
        let err = Error::Io(std::io::Error::other("disk full"));
        assert_eq!(err.user_message(), UNEXPECTED_FAILURE_MESSAGE);
    }
}
