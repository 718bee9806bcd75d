//! Prost message definitions for the Loki push schema.
//!
//! These mirror the logproto push types field-for-field. They are
//! hand-written rather than generated: the schema is three messages and
//! never changes out from under us.

use prost::Message;

/// A batch of log streams submitted to the ingestion endpoint.
#[derive(Clone, PartialEq, Message)]
pub struct PushRequest {
    /// The streams carried by this push.
    #[prost(message, repeated, tag = "1")]
    pub streams: Vec<StreamAdapter>,
}

/// One label-set plus its ordered log lines within a payload.
#[derive(Clone, PartialEq, Message)]
pub struct StreamAdapter {
    /// Raw label string, e.g. `{container_name="web", level="error"}`.
    #[prost(string, tag = "1")]
    pub labels: String,
    /// Ordered log entries for this stream.
    #[prost(message, repeated, tag = "2")]
    pub entries: Vec<EntryAdapter>,
    /// Client-side stream hash. Pass-through, not interpreted.
    #[prost(uint64, tag = "3")]
    pub hash: u64,
}

/// A single log line with its timestamp.
#[derive(Clone, PartialEq, Message)]
pub struct EntryAdapter {
    /// When the line was produced. Opaque to the pipeline.
    #[prost(message, optional, tag = "1")]
    pub timestamp: Option<prost_types::Timestamp>,
    /// The log line text.
    #[prost(string, tag = "2")]
    pub line: String,
}
