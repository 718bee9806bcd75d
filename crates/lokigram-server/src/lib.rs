//! # lokigram-server
//!
//! HTTP ingestion service relaying Loki push payloads to Telegram.
//!
//! One endpoint, `POST /loki/api/v1/push`, accepts snappy-compressed
//! protobuf push bodies. Each payload is decoded synchronously; lines
//! containing `error`, `warning`, or `fatal` are routed against the
//! configured channel rules and queued for Telegram delivery through a
//! bounded dispatcher. The request answers `200 {"message":"OK"}` once
//! decode and filtering complete; delivery is fire-and-forget, and a
//! body that fails to read, decompress, or deserialize answers
//! `400 {"error":"<detail>"}` with nothing dispatched.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use lokigram_alerts::{Dispatcher, Router, TelegramClient};
//! use lokigram_server::{AppState, Config, PushServer};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::default();
//!     let router = Router::new(config.channel_rules(), config.default_destination());
//!     let dispatcher = Dispatcher::spawn(
//!         Arc::new(TelegramClient::new()),
//!         config.dispatch.workers,
//!         config.dispatch.queue_capacity,
//!     );
//!
//!     let server = PushServer::new(AppState::new(router, dispatcher));
//!     // server.serve(config.bind_addr().unwrap()).await.unwrap();
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

// Re-export main types at crate root
pub use config::{Config, ConfigError};
pub use error::{ServerError, ServerResult};
pub use routes::create_router;
pub use server::PushServer;
pub use state::AppState;
