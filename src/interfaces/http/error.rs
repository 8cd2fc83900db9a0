use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};

use crate::domain::company::ErrorResponse;
use crate::domain::error::AppError;

// Application failures are never transport failures: always 200 with an
// `error` field.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::OK
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Ok().json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

/// Malformed or mistyped JSON bodies become a ValidationError
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::warn!(error = %err, "Rejected request body");
    AppError::ValidationError(format!("Invalid request body: {}", err)).into()
}
