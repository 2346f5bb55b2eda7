//! Error responses for the event intake.

use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use shipwatch_core::{Error, ErrorKind};

/// Result type for HTTP handlers.
pub type Result<T, E = ErrorResponse> = std::result::Result<T, E>;

/// JSON error body returned to the event bus.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error kind identifier.
    pub error: Cow<'static, str>,
    /// Human-readable description.
    pub message: String,
    /// HTTP status code (not serialized).
    #[serde(skip)]
    pub status: StatusCode,
}

impl ErrorResponse {
    /// Creates a new error response.
    pub fn new(
        error: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status,
        }
    }

    /// Creates a `400` response for a body that is not a valid event.
    pub fn malformed_event(message: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::InvalidInput.as_ref().to_owned(),
            message,
            StatusCode::BAD_REQUEST,
        )
    }
}

impl From<Error> for ErrorResponse {
    fn from(error: Error) -> Self {
        let status = if error.kind.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let message = error
            .message
            .clone()
            .unwrap_or_else(|| error.kind.to_string());

        Self::new(error.kind.as_ref().to_owned(), message, status)
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
