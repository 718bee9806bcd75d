//! HTTP request handlers.
//!
//! The push handler runs the synchronous half of the pipeline: decode
//! the payload, parse labels, filter lines, resolve destinations, and
//! enqueue dispatch jobs. It answers 200 as soon as that completes;
//! delivery happens behind the dispatcher and is invisible here.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use lokigram_alerts::{DispatchJob, format_alert, is_notifiable};
use lokigram_proto::{decode_push, parse_labels};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Success response body: `{"message":"OK"}`.
#[derive(Debug, Serialize)]
pub struct PushAck {
    /// Always `"OK"`.
    pub message: &'static str,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status message.
    pub status: &'static str,
}

/// Handle GET /health - liveness probe.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Handle POST /loki/api/v1/push - ingest a push payload.
///
/// Any read, decompression, or deserialization failure rejects the
/// whole payload with 400 before any stream is processed. Downstream
/// of a successful decode nothing can fail the request: malformed
/// labels degrade to an empty map, unroutable streams fall back to the
/// default destination, and delivery outcomes stay in the logs.
pub async fn push(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> ServerResult<Json<PushAck>> {
    let body = body.map_err(|e| ServerError::BodyRead(e.to_string()))?;
    let request = decode_push(&body)?;

    let mut matched = 0usize;
    for (index, stream) in request.streams.iter().enumerate() {
        let labels = parse_labels(&stream.labels);

        let container_name = labels.get("container_name").map(String::as_str);
        let service_name = labels.get("service_name").map(String::as_str);
        if container_name.is_none() && service_name.is_none() {
            warn!(index, "stream carries neither container_name nor service_name label");
        }
        let container_name = container_name.unwrap_or_default();
        let service_name = service_name.unwrap_or_default();

        for entry in &stream.entries {
            if !is_notifiable(&entry.line) {
                continue;
            }

            let destination = state.router.resolve(container_name, service_name);
            let body = format_alert(
                container_name,
                service_name,
                &stream.labels,
                &labels,
                &entry.line,
            );
            state.dispatcher.enqueue(DispatchJob { destination, body });
            matched += 1;
        }
    }

    debug!(
        streams = request.streams.len(),
        matched, "push payload processed"
    );
    Ok(Json(PushAck { message: "OK" }))
}
