//! # tuval-catalog: Shopify Admin API Collaborator
//!
//! This crate owns every conversation with the external catalog. It is glue
//! by design: the pricing logic lives in `tuval-core`, and everything here
//! either fetches raw records for it or materializes its results.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Catalog Collaborators                             │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │  Metaobjects   │  │   Variants     │  │  Inventory             │    │
//! │  │ (config source)│  │ (catalog sync) │  │  (location backfill)   │    │
//! │  │                │  │                │  │                        │    │
//! │  │ Frame, fabric  │  │ Attach price   │  │ Scan variants, assign  │    │
//! │  │ and constants  │  │ to a dynamic   │  │ zero stock at missing  │    │
//! │  │ records, fresh │  │ variant        │  │ locations, batched ×10 │    │
//! │  │ per request    │  │                │  │                        │    │
//! │  └───────┬────────┘  └───────┬────────┘  └───────────┬────────────┘    │
//! │          │                   │                       │                 │
//! │          └───────────────────┼───────────────────────┘                 │
//! │                              ▼                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              CatalogClient (reqwest, GraphQL + REST)            │   │
//! │  │     credential + endpoint injected at startup via CatalogConfig │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`client`] - HTTP transport (GraphQL + REST) with the injected credential
//! - [`config`] - Environment-driven catalog configuration
//! - [`error`] - Catalog error types with retryability categorization
//! - [`metaobjects`] - Configuration Source: raw pricing records
//! - [`variants`] - Catalog Sync: priced variant creation
//! - [`inventory`] - Bulk inventory-location backfill

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod config;
pub mod error;
pub mod inventory;
pub mod metaobjects;
pub mod variants;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::CatalogClient;
pub use config::CatalogConfig;
pub use error::{CatalogError, CatalogResult};
pub use inventory::{run_backfill, BackfillReport};
pub use metaobjects::{fetch_pricing_inputs, PricingInputs};
pub use variants::{create_priced_variant, CreatedVariant};
