//! Outbound Telegram bot API client.
//!
//! The pipeline only needs one capability from Telegram: send a text
//! message to a chat with MarkdownV2 parsing enabled. The [`Notify`]
//! trait is the seam between the dispatcher and that capability, so
//! tests can substitute a recording fake for the real client.

use serde::Serialize;

use crate::error::{AlertError, Result};
use crate::route::Destination;

/// Production Telegram bot API base URL.
const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Sends a formatted alert body to a destination.
pub trait Notify: Send + Sync + 'static {
    /// Delivers `body` to `destination`.
    ///
    /// # Errors
    ///
    /// Returns an error when the message could not be delivered. The
    /// dispatcher logs the outcome; nothing retries.
    fn send(
        &self,
        destination: &Destination,
        body: &str,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// `sendMessage` request body.
#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: &'a str,
}

/// HTTP client for the Telegram bot API.
///
/// One shared [`reqwest::Client`] serves every destination; the bot
/// token is part of the request path, so no per-token client state is
/// needed. Timeouts and connection pooling are whatever reqwest
/// defaults to; this component imposes none of its own.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
}

impl TelegramClient {
    /// Creates a client against the production bot API.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(TELEGRAM_API_BASE)
    }

    /// Creates a client against an alternate base URL.
    ///
    /// Used by tests to point at a local stub server.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Default for TelegramClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Notify for TelegramClient {
    async fn send(&self, destination: &Destination, body: &str) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, destination.token);
        let request = SendMessage {
            chat_id: destination.chat_id,
            text: body,
            parse_mode: "MarkdownV2",
        };

        let response = self.http.post(&url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AlertError::Api {
                status: status.as_u16(),
                detail,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_message_serializes_expected_shape() {
        let request = SendMessage {
            chat_id: -100123,
            text: "*Level:* `error`",
            parse_mode: "MarkdownV2",
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["chat_id"], -100123);
        assert_eq!(json["text"], "*Level:* `error`");
        assert_eq!(json["parse_mode"], "MarkdownV2");
    }

    #[test]
    fn token_is_embedded_in_request_path() {
        let client = TelegramClient::with_base_url("http://127.0.0.1:1");
        let url = format!(
            "{}/bot{}/sendMessage",
            client.base_url, "123456:ABC-DEF"
        );

        assert_eq!(url, "http://127.0.0.1:1/bot123456:ABC-DEF/sendMessage");
    }

    #[tokio::test]
    async fn unreachable_server_yields_http_error() {
        // Nothing listens on this port.
        let client = TelegramClient::with_base_url("http://127.0.0.1:9");
        let destination = Destination {
            token: "123:abc".to_string(),
            chat_id: 1,
        };

        let err = client.send(&destination, "body").await.unwrap_err();
        assert!(matches!(err, AlertError::Http(_)));
    }
}
