use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::HttpRequest;
use futures::TryStreamExt;

use crate::domain::error::{AppError, Result};
use crate::domain::upload::UploadedFile;

pub const FILE_FIELD: &str = "file";

fn is_multipart(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_ascii_lowercase().starts_with("multipart/form-data"))
        .unwrap_or(false)
}

/// Reads the `file` part into memory. Other parts are skipped. A request
/// that is not multipart has no file part.
pub async fn read_file_part(
    req: &HttpRequest,
    mut payload: Multipart,
    max_bytes: usize,
) -> Result<UploadedFile> {
    if !is_multipart(req) {
        return Err(AppError::MissingFilePart);
    }

    while let Some(mut field) = payload.try_next().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            while field.try_next().await.map_err(multipart_error)?.is_some() {}
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or_default()
            .to_string();

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
            if bytes.len() + chunk.len() > max_bytes {
                return Err(AppError::ProcessingError(format!(
                    "upload exceeds the {} byte limit",
                    max_bytes
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        return Ok(UploadedFile::new(filename, bytes));
    }

    Err(AppError::MissingFilePart)
}

fn multipart_error(err: actix_multipart::MultipartError) -> AppError {
    AppError::ProcessingError(err.to_string())
}
