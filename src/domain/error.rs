use std::fmt;

/// Every failure the service can report. Request-level variants are rendered
/// as `{"error": "<Display>"}` by the HTTP layer; `Internal` only surfaces at
/// startup (config, bind).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    MissingFilePart,
    EmptyFilename,
    UnsupportedFileType,
    ValidationError(String),
    ProcessingError(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingFilePart => write!(f, "No file part"),
            AppError::EmptyFilename => write!(f, "No selected file"),
            AppError::UnsupportedFileType => {
                write!(f, "Invalid file type. Please upload a PDF file")
            }
            AppError::ValidationError(msg) => write!(f, "{}", msg),
            AppError::ProcessingError(msg) => write!(f, "An error occurred: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::ProcessingError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ProcessingError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
