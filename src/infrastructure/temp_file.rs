use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::domain::error::{AppError, Result};

/// Write `bytes` to a fresh temp file ending in `suffix`. The file is removed
/// when the returned handle drops, including on early returns and panics
/// that unwind.
pub fn persist_to_temp(bytes: &[u8], suffix: &str, dir: Option<&Path>) -> Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("upload-").suffix(suffix);

    let mut file = match dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    }
    .map_err(|e| AppError::ProcessingError(format!("Failed to create temp file: {}", e)))?;

    file.write_all(bytes)?;
    file.flush()?;

    tracing::debug!(path = %file.path().display(), bytes = bytes.len(), "Wrote upload to temp file");
    Ok(file)
}
