//! # lokigram-alerts
//!
//! The alert half of the lokigram pipeline: decide whether a log line
//! warrants a notification, resolve which Telegram destination it
//! belongs to, render a MarkdownV2 message body, and hand it to a
//! bounded pool of dispatch workers.
//!
//! # Components
//!
//! - **Severity filter** ([`severity`]): case-sensitive substring test
//!   for `error` / `warning` / `fatal`
//! - **Channel router** ([`route`]): first-match-wins needle rules over
//!   container/service names, with a guaranteed default destination
//! - **Message formatter** ([`format`]): fixed field order, MarkdownV2
//!   escaping everywhere except the fenced log line
//! - **Dispatcher** ([`dispatch`]): bounded queue + worker pool,
//!   fire-and-forget with drop-on-full
//! - **Telegram client** ([`telegram`]): the outbound `sendMessage`
//!   call behind the [`Notify`] seam
//!
//! # Example
//!
//! ```rust
//! use lokigram_alerts::{ChannelRule, Destination, Router, is_notifiable};
//!
//! let router = Router::new(
//!     vec![ChannelRule {
//!         name: "auth team".to_string(),
//!         needle: "auth".to_string(),
//!         token: "123:abc".to_string(),
//!         chat_id: -100,
//!     }],
//!     Destination { token: "999:zzz".to_string(), chat_id: -1 },
//! );
//!
//! assert!(is_notifiable("fatal: disk full"));
//! assert_eq!(router.resolve("auth-service", "").chat_id, -100);
//! assert_eq!(router.resolve("billing", "").chat_id, -1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod dispatch;
pub mod error;
pub mod format;
pub mod route;
pub mod severity;
pub mod telegram;

// Re-export main types at crate root
pub use dispatch::{DispatchJob, DispatchOutcome, Dispatcher};
pub use error::{AlertError, Result};
pub use format::{escape_markdown_v2, format_alert};
pub use route::{ChannelRule, Destination, Router};
pub use severity::is_notifiable;
pub use telegram::{Notify, TelegramClient};
