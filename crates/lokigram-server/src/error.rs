//! Error types for the ingestion server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lokigram_proto::DecodeError;
use serde::Serialize;
use thiserror::Error;

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur in the ingestion server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The request body could not be read.
    #[error("failed to read request body: {0}")]
    BodyRead(String),

    /// The body failed decompression or deserialization.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Failed to bind to the specified address.
    #[error("failed to bind to {0}: {1}")]
    BindFailed(std::net::SocketAddr, std::io::Error),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body: `{"error": "<detail>"}`.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            // Payload-level failures are the caller's problem.
            Self::BodyRead(_) | Self::Decode(_) => StatusCode::BAD_REQUEST,
            Self::BindFailed(_, _) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };
        let json = serde_json::to_string(&body)
            .unwrap_or_else(|_| r#"{"error":"failed to serialize error"}"#.to_string());

        (status, [("content-type", "application/json")], json).into_response()
    }
}
