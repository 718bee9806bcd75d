//! Lokigram ingestion server binary.
//!
//! Loads the YAML configuration, builds the routing and dispatch
//! snapshots, and serves the push endpoint until ctrl-c.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use lokigram_alerts::{Dispatcher, Router, TelegramClient};
use lokigram_server::{AppState, Config, PushServer};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Relay Loki push payloads to Telegram.
#[derive(Debug, Parser)]
#[command(name = "lokigram", version, about)]
struct Args {
    /// Path to the YAML configuration file.
    #[arg(long, env = "LOKIGRAM_CONFIG", default_value = "config/config.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load configuration from {}: {e}", args.config.display());
            std::process::exit(1);
        }
    };

    // RUST_LOG wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.app.log_level)),
        )
        .init();

    let addr = match config.bind_addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!(error = %e, "invalid listen address");
            std::process::exit(1);
        }
    };

    if config.telegram.bot_token.is_empty() {
        warn!("default telegram bot token is empty; unmatched streams cannot be delivered");
    }

    info!(
        name = %config.app.name,
        environment = %config.app.environment,
        channels = config.channels.len(),
        workers = config.dispatch.workers,
        queue_capacity = config.dispatch.queue_capacity,
        "Starting lokigram on {addr}"
    );

    let router = Router::new(config.channel_rules(), config.default_destination());
    let dispatcher = Dispatcher::spawn(
        Arc::new(TelegramClient::new()),
        config.dispatch.workers,
        config.dispatch.queue_capacity,
    );
    let server = PushServer::new(AppState::new(router, dispatcher));

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutdown signal received");
    };

    if let Err(e) = server.serve_with_shutdown(addr, shutdown).await {
        error!(error = %e, "server error");
        std::process::exit(1);
    }
}
