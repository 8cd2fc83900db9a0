use crate::domain::error::{AppError, Result};

/// An uploaded multipart file; lives for one request
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    pub fn kind(&self) -> Result<UploadKind> {
        UploadKind::from_filename(&self.filename)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Excel,
    Pdf,
}

impl UploadKind {
    /// Suffix match is case-sensitive: `report.PDF` is rejected.
    pub fn from_filename(filename: &str) -> Result<Self> {
        if filename.is_empty() {
            return Err(AppError::EmptyFilename);
        }
        if filename.ends_with(".xlsx") {
            Ok(UploadKind::Excel)
        } else if filename.ends_with(".pdf") {
            Ok(UploadKind::Pdf)
        } else {
            Err(AppError::UnsupportedFileType)
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            UploadKind::Excel => ".xlsx",
            UploadKind::Pdf => ".pdf",
        }
    }
}
