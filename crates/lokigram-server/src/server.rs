//! Ingestion server implementation.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::error::{ServerError, ServerResult};
use crate::routes::create_router;
use crate::state::AppState;

/// HTTP server for the push ingestion endpoint.
#[derive(Debug, Clone)]
pub struct PushServer {
    state: Arc<AppState>,
}

impl PushServer {
    /// Create a new server around shared state.
    #[must_use]
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Start the server and listen for connections.
    ///
    /// Runs until the server encounters a fatal error.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve(&self, addr: SocketAddr) -> ServerResult<()> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindFailed(addr, e))?;

        info!(addr = %addr, "Ingestion server listening");

        axum::serve(listener, create_router(Arc::clone(&self.state)))
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        Ok(())
    }

    /// Start the server with graceful shutdown support.
    ///
    /// The server stops accepting connections when `shutdown`
    /// completes; in-flight dispatch tasks are unaffected.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve_with_shutdown<F>(&self, addr: SocketAddr, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindFailed(addr, e))?;

        info!(addr = %addr, "Ingestion server listening");

        axum::serve(listener, create_router(Arc::clone(&self.state)))
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        info!("Ingestion server shut down");
        Ok(())
    }

    /// Create the router without starting the server.
    ///
    /// Useful for testing or embedding in another server.
    #[must_use]
    pub fn router(&self) -> axum::Router {
        create_router(Arc::clone(&self.state))
    }
}
