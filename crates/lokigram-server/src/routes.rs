//! Route configuration for the ingestion API.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::handlers::{health_check, push};
use crate::state::AppState;

/// Push bodies are compressed log batches; allow well beyond axum's
/// 2 MiB default before rejecting.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Create the ingestion API router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Loki push-protocol ingestion endpoint
        .route("/loki/api/v1/push", post(push))
        // Liveness probe
        .route("/health", get(health_check))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}
