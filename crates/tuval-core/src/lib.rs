//! # tuval-core: Pure Pricing Logic for Custom Canvas Products
//!
//! This crate is the **heart** of the Tuval pricing service. It contains the
//! cost-and-markup formula and the attribute-record resolver as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Tuval Pricing Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  apps/pricing-api (axum)                        │   │
//! │  │        POST /quote ──► POST /inventory/backfill ──► GET /health │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 tuval-catalog (Shopify glue)                    │   │
//! │  │     metaobject fetch, variant create, inventory backfill        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ raw attribute records                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tuval-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ resolver  │  │  pricing  │  │ validation│  │   │
//! │  │   │  configs  │  │ raw ──►   │  │  formula  │  │ dimension │  │   │
//! │  │   │  bands    │  │  typed    │  │  rounding │  │  bounds   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (FrameTypeConfig, FabricTypeConfig, GlobalConstants)
//! - [`resolver`] - Raw attribute records → typed lookup tables
//! - [`pricing`] - The pricing formula itself
//! - [`validation`] - Dimension and selector validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every price is deterministic - same input = same output
//! 2. **No I/O**: Network and file system access is FORBIDDEN here
//! 3. **Parse at the Boundary**: Loosely-typed catalog records become typed
//!    configs in [`resolver`]; the formula never sees raw strings
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use tuval_core::pricing::quote;
//! use tuval_core::types::{
//!     FabricPricing, FabricTypeConfig, FrameTypeConfig, GlobalConstants,
//!     ReinforcementBand,
//! };
//!
//! let frame = FrameTypeConfig {
//!     unit_price: 10.0,
//!     fabric_allowance_cm: 5.0,
//!     reinforcement_unit_price: 8.0,
//! };
//! let fabric = FabricTypeConfig {
//!     pricing: FabricPricing::DirectCurrency { price_per_m2: 50.0 },
//! };
//! let constants = GlobalConstants {
//!     wastage_rate: 0.05,
//!     exchange_rate: 40.0,
//!     labor_rate_per_meter: 3.0,
//!     material_markup: 1.5,
//!     tax_rate: 0.20,
//!     reinforcement_bands: vec![
//!         ReinforcementBand { min: 0.0, max: 150.0, count: 1 },
//!         ReinforcementBand { min: 151.0, max: 350.0, count: 2 },
//!     ],
//! };
//!
//! let q = quote(120, 240, &frame, &fabric, &constants).unwrap();
//! assert_eq!(q.final_price, 508.0);
//! assert_eq!(q.reinforcement_count, 3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod pricing;
pub mod resolver;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tuval_core::Quote` instead of
// `use tuval_core::types::Quote`

pub use error::{ConfigError, CoreError, CoreResult, ValidationError};
pub use pricing::quote;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Smallest orderable canvas dimension in centimeters (inclusive).
///
/// ## Business Reason
/// Below 10 cm the stretcher bars cannot be joined; the storefront UI
/// enforces the same bound, but the backend never trusts the frontend.
pub const MIN_DIMENSION_CM: i64 = 10;

/// Largest orderable canvas dimension in centimeters (inclusive).
///
/// ## Business Reason
/// 350 cm is the longest stretcher bar the workshop stocks. The
/// reinforcement band table covers exactly this range.
pub const MAX_DIMENSION_CM: i64 = 350;
