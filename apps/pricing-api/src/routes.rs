//! # Route Handlers
//!
//! The three HTTP operations the service exposes.
//!
//! ## Request Flow for a Quote
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /quote { width, height, frame, fabric, add_to_cart? }             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate dimensions + selectors          400 on violation              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  fetch metaobjects (fresh, no cache)      502 on catalog failure        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  resolve + look up selections             400 unknown / 500 malformed   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  quote() - pure formula                                                 │
//! │       │                                                                 │
//! │       ├── add_to_cart? ──► create priced variant ──► variant_id         │
//! │       ▼                                                                 │
//! │  { price, reinforcement_count }   (cost breakdown never leaves)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use tuval_catalog::{inventory, metaobjects, variants, BackfillReport};
use tuval_core::error::ValidationError;
use tuval_core::{pricing, resolver, validation, Quote};

use crate::error::ApiError;
use crate::AppState;

// =============================================================================
// Quote
// =============================================================================

/// Pricing request body from the storefront widget.
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    /// Canvas width in cm, 10-350 inclusive.
    pub width: i64,
    /// Canvas height in cm, 10-350 inclusive.
    pub height: i64,
    /// Frame type display name.
    pub frame: String,
    /// Fabric type display name.
    pub fabric: String,
    /// When set, materialize the price as a catalog variant too.
    #[serde(default)]
    pub add_to_cart: bool,
}

/// Pricing response. Only the final price leaves the system.
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub price: f64,
    pub reinforcement_count: u32,
    /// Present only when `add_to_cart` was requested and succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
}

/// POST /quote
pub async fn quote(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, ApiError> {
    // Reject bad input before spending a catalog round trip on it.
    validation::validate_dimension("width", request.width)?;
    validation::validate_dimension("height", request.height)?;
    validation::validate_selector("frame", &request.frame)?;
    validation::validate_selector("fabric", &request.fabric)?;

    // Fresh config every request: prices can change between requests.
    let inputs = metaobjects::fetch_pricing_inputs(&state.catalog).await?;
    let frames = resolver::resolve_frame_types(&inputs.frame_records)?;
    let fabrics = resolver::resolve_fabric_types(&inputs.fabric_records)?;
    let constants = resolver::resolve_constants(&inputs.constants_records)?;

    let frame = frames
        .get(&request.frame)
        .ok_or_else(|| ValidationError::UnknownFrameType(request.frame.clone()))?;
    let fabric = fabrics
        .get(&request.fabric)
        .ok_or_else(|| ValidationError::UnknownFabricType(request.fabric.clone()))?;

    let Quote {
        final_price,
        reinforcement_count,
    } = pricing::quote(request.width, request.height, frame, fabric, &constants)?;

    info!(
        width = request.width,
        height = request.height,
        frame = %request.frame,
        fabric = %request.fabric,
        price = final_price,
        "Quote computed"
    );

    // Downstream materialization is a separate error domain, but the two
    // compose here: an add-to-cart request without a variant is useless to
    // the storefront, so its failure fails the request (as 502, not 400).
    let variant_id = if request.add_to_cart {
        let variant = variants::create_priced_variant(
            &state.catalog,
            final_price,
            request.width,
            request.height,
            &request.frame,
            &request.fabric,
        )
        .await?;
        Some(variant.variant_id)
    } else {
        None
    };

    Ok(Json(QuoteResponse {
        price: final_price,
        reinforcement_count,
        variant_id,
    }))
}

// =============================================================================
// Inventory Backfill
// =============================================================================

/// POST /inventory/backfill
pub async fn backfill(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BackfillReport>, ApiError> {
    let report = inventory::run_backfill(&state.catalog).await?;
    Ok(Json(report))
}

// =============================================================================
// Health
// =============================================================================

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
