//! # lokigram-proto
//!
//! Wire format for the Loki push protocol as consumed by lokigram.
//!
//! A push payload arrives as a snappy-compressed (raw block format,
//! not framed), protobuf-encoded `PushRequest`. Each request carries a
//! sequence of streams; each stream pairs a raw label string with an
//! ordered sequence of timestamped log lines. This crate provides:
//!
//! - **Message definitions**: hand-written prost structs matching the
//!   logproto push schema ([`wire`])
//! - **Payload decoding**: decompress + deserialize with a hard error
//!   on any failure ([`decode`])
//! - **Label grammar**: the brace-delimited `key="value"` label string
//!   parsed into a map, tolerating both plain and escaped quoting
//!   ([`labels`])
//!
//! ## Example
//!
//! ```rust
//! use lokigram_proto::{decode_push, encode_push, parse_labels};
//! use lokigram_proto::wire::{EntryAdapter, PushRequest, StreamAdapter};
//!
//! let request = PushRequest {
//!     streams: vec![StreamAdapter {
//!         labels: r#"{container_name="web"}"#.to_string(),
//!         entries: vec![EntryAdapter {
//!             timestamp: None,
//!             line: "fatal: disk full".to_string(),
//!         }],
//!         hash: 0,
//!     }],
//! };
//!
//! let body = encode_push(&request).unwrap();
//! let decoded = decode_push(&body).unwrap();
//! let labels = parse_labels(&decoded.streams[0].labels);
//! assert_eq!(labels.get("container_name").map(String::as_str), Some("web"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod decode;
pub mod labels;
pub mod wire;

// Re-export main types at crate root
pub use decode::{DecodeError, decode_push, encode_push};
pub use labels::parse_labels;
pub use wire::{EntryAdapter, PushRequest, StreamAdapter};
