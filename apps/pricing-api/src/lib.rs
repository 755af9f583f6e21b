//! # Tuval Pricing API
//!
//! HTTP service for custom canvas pricing and catalog synchronization.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pricing API Surface                              │
//! │                                                                         │
//! │  POST /quote               Price a width/height/frame/fabric selection │
//! │                            (optionally materialize a cart variant)     │
//! │  POST /inventory/backfill  Assign zero stock at missing locations      │
//! │  GET  /health              Liveness probe                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `PORT` - HTTP listen port (default: 8080)
//! - `SHOPIFY_STORE` / `SHOPIFY_ACCESS_TOKEN` / `SHOPIFY_API_VERSION`
//! - `CUSTOM_PRODUCT_GID` / `PRIMARY_LOCATION_GID` / `SECONDARY_LOCATION_IDS`
//! - `CATALOG_TIMEOUT_SECS`

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use tuval_catalog::CatalogClient;

pub mod error;
pub mod routes;

// Re-exports
pub use error::ApiError;

/// Shared application state.
///
/// The catalog client (and with it the credential/endpoint resolved at
/// startup) is the only process-wide state; every pricing request builds
/// its config structures fresh and discards them.
pub struct AppState {
    pub catalog: CatalogClient,
}

/// Build the router with all routes attached.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/quote", post(routes::quote))
        .route("/inventory/backfill", post(routes::backfill))
        .route("/health", get(routes::health))
        .with_state(state)
}
