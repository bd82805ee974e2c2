//! JSON error bodies returned by the HTTP handlers.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Caller-facing message.
    pub error: String,
}

/// Handler failure mapped onto an HTTP status and a fixed message.
///
/// Internal causes are logged where they occur; the message returned to the
/// caller never includes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    /// The request was rejected (400).
    BadRequest(&'static str),
    /// The request could not be completed (500).
    Internal(&'static str),
}

impl ApiError {
    /// Returns the HTTP status for this error.
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the caller-facing message.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::BadRequest(message) | Self::Internal(message) => message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message().to_owned(),
        };
        (self.status(), Json(body)).into_response()
    }
}
