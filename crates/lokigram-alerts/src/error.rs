//! Error types for the lokigram-alerts crate.

use thiserror::Error;

/// Result type alias for alert operations.
pub type Result<T> = std::result::Result<T, AlertError>;

/// Errors that can occur while delivering an alert.
#[derive(Debug, Error)]
pub enum AlertError {
    /// The outbound HTTP request failed before a response arrived.
    #[error("telegram request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The bot API answered with a non-success status.
    #[error("telegram API rejected the message: status {status}: {detail}")]
    Api {
        /// HTTP status code returned by the bot API.
        status: u16,
        /// Response body, as far as it could be read.
        detail: String,
    },
}
