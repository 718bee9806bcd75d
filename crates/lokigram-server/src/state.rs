//! Shared server state.

use lokigram_alerts::{Dispatcher, Router};

/// Read-only state shared across request handlers.
///
/// Both members are immutable snapshots built once at startup; request
/// handlers never write through this, so no locking is involved.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Routing rules plus default destination.
    pub router: Router,
    /// Handle into the dispatch worker pool.
    pub dispatcher: Dispatcher,
}

impl AppState {
    /// Bundles a router and a dispatcher handle.
    #[must_use]
    pub fn new(router: Router, dispatcher: Dispatcher) -> Self {
        Self { router, dispatcher }
    }
}
