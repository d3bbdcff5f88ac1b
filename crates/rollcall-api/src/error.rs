//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use rollcall_core::error::{AppError, ErrorKind};
use rollcall_core::types::response::ApiErrorResponse;

/// Newtype over [`AppError`] so the HTTP mapping can live in this crate.
///
/// Handlers return `Result<_, ApiError>`; `?` on any `AppResult` converts
/// through the `From` impl.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;

        let status = match err.kind {
            // Duplicate key surfaces as a plain bad request, not 409.
            ErrorKind::Validation | ErrorKind::Conflict => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized | ErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal
            | ErrorKind::Database
            | ErrorKind::Configuration
            | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let (code, message) = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(kind = %err.kind, error = %err, "Internal server error");
            (
                "INTERNAL_ERROR".to_string(),
                "An internal error occurred".to_string(),
            )
        } else {
            (err.kind.to_string(), err.message.clone())
        };

        let body = ApiErrorResponse {
            error: code,
            message,
            details: if err.fields.is_empty() {
                None
            } else {
                Some(err.fields)
            },
        };

        (status, Json(body)).into_response()
    }
}
