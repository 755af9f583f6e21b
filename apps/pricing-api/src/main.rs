//! # Tuval Pricing API
//!
//! HTTP server binary: wires the catalog client into shared state, mounts
//! the routes, and serves until shutdown.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Pricing API Server                              │
//! │                                                                         │
//! │  Storefront ───► HTTP (8080) ───► tuval-core ───► Shopify Admin API   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use tuval_catalog::{CatalogClient, CatalogConfig};
use tuval_pricing_api::{router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .init();

    info!("Starting Tuval pricing API server...");

    // Load catalog configuration (credential + endpoint, once, at startup)
    let config = CatalogConfig::load()?;
    info!(
        store = %config.store,
        api_version = %config.api_version,
        "Catalog configuration loaded"
    );

    let catalog = CatalogClient::new(config)?;
    let state = Arc::new(AppState { catalog });

    // Build server address
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()?;
    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!(%addr, "Starting HTTP server");

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
