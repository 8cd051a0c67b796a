//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON error bodies so every handler
//! answers failures the same way.
//!
//! Storage and other internal failures are logged with a fresh correlation id; the
//! caller only ever sees that id, never the underlying cause.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rsvp_core::errors::{ErrorKind, RsvpError};
use serde_json::json;
use uuid::Uuid;

pub const INTERNAL_ERROR_MESSAGE: &str =
    "encountered an error while trying to process your request, error ID: ";

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps `RsvpError` and implements `IntoResponse`, so handlers can use
/// `?` on any `RsvpResult`.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use rsvp_api::middleware::error_handling::AppError;
/// use rsvp_core::errors::RsvpError;
///
/// async fn handler(found: Option<String>) -> Result<Json<String>, AppError> {
///     let value = found.ok_or_else(|| RsvpError::NotFound("value".to_string()))?;
///     Ok(Json(value))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub RsvpError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0.kind() {
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, self.0.to_string()),
            ErrorKind::Conflict => (StatusCode::CONFLICT, self.0.to_string()),
            ErrorKind::BadRequest => (StatusCode::BAD_REQUEST, self.0.to_string()),
            ErrorKind::Internal => {
                let error_id = Uuid::new_v4();
                tracing::error!(error_id = %error_id, error = ?self.0, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("{}{}", INTERNAL_ERROR_MESSAGE, error_id),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<RsvpError> for AppError {
    fn from(err: RsvpError) -> Self {
        AppError(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(RsvpError::BadRequest(rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError(RsvpError::BadRequest(rejection.body_text()))
    }
}

/// Maps an RsvpError straight to an HTTP response.
pub fn map_error(err: RsvpError) -> Response {
    AppError(err).into_response()
}
