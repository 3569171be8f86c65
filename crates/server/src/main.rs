//! Directors API server.
//!
//! Serves `GET /api/directors?threshold=N` backed by the remote movie catalog.

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

use catalog_client::MovieCatalogClient;
use server::{AppState, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::parse();
    info!(
        catalog = %config.catalog.catalog_url,
        max_attempts = config.retry.max_attempts,
        "Starting directors API"
    );

    let client = MovieCatalogClient::new(config.catalog.client_config())
        .context("Failed to build catalog HTTP client")?;
    let state = AppState::from_fetcher(client, config.retry.policy());

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;

    server::serve(listener, state, shutdown_signal())
        .await
        .context("Server error")?;

    info!("Directors API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
