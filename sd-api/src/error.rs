//! Error types for sd-api
//!
//! Response bodies use the compact `{"error": "<code>"}` shape the web
//! front end checks for.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// No payload stored for the requested date (404)
    #[error("No payload stored for this date")]
    NotFound,

    /// Date path segment is not `YYYY-MM-DD` (400)
    #[error("Invalid date: {0}")]
    BadDate(String),

    /// Invalid request body or missing field (400)
    #[error("Invalid request: {0}")]
    BadRequest(&'static str),

    /// Today's payload has not been generated yet, so no email goes out (404)
    #[error("Nothing to send yet")]
    NothingToSend,

    /// Mail transport rejected the message (500)
    #[error("Email send failed: {0}")]
    EmailSendFailed(String),

    /// Storage or other internal failure (500)
    #[error("Common error: {0}")]
    Common(sd_common::Error),
}

impl From<sd_common::Error> for ApiError {
    fn from(err: sd_common::Error) -> Self {
        match err {
            sd_common::Error::NotFound(_) => ApiError::NotFound,
            other => ApiError::Common(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, json!({ "error": "not_found" })),
            ApiError::BadDate(_) => (StatusCode::BAD_REQUEST, json!({ "error": "bad_date" })),
            ApiError::BadRequest(code) => (StatusCode::BAD_REQUEST, json!({ "error": code })),
            ApiError::NothingToSend => (
                StatusCode::NOT_FOUND,
                json!({ "error": "scripture_not_found" }),
            ),
            ApiError::EmailSendFailed(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "email_send_failed", "message": message }),
            ),
            ApiError::Common(ref err) => {
                error!("Request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "server_error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
