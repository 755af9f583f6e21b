//! # Error Types
//!
//! Domain-specific error types for tuval-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tuval-core errors (this file)                                         │
//! │  ├── ValidationError  - Bad request input (dimensions, selectors)      │
//! │  ├── ConfigError      - Malformed catalog attribute data               │
//! │  └── CoreError        - Umbrella over both                             │
//! │                                                                         │
//! │  tuval-catalog errors (separate crate)                                 │
//! │  └── CatalogError     - Shopify Admin API failures                     │
//! │                                                                         │
//! │  Flow: ValidationError/ConfigError → CoreError → ApiError → Client     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, offending key, raw value)
//! 3. Errors are enum variants, never String
//! 4. Validation and configuration are distinct domains: a bad width is the
//!    caller's fault, a bad `fire_orani` value is the catalog operator's

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when the pricing request itself is malformed.
/// They map to HTTP 400 at the API layer and are never silently defaulted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A dimension is outside the orderable range.
    #[error("{field} must be between {min} and {max} cm, got {value}")]
    OutOfRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// The requested frame type does not exist in the catalog.
    #[error("Unknown frame type: {0}")]
    UnknownFrameType(String),

    /// The requested fabric type does not exist in the catalog.
    #[error("Unknown fabric type: {0}")]
    UnknownFabricType(String),
}

// =============================================================================
// Configuration Error
// =============================================================================

/// Catalog configuration errors.
///
/// These errors mean the attribute data fetched from the catalog cannot be
/// turned into typed pricing configs. They are fatal to the current request:
/// no fabricated price is ever returned in their place.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// No constants record present. Pricing cannot proceed without the
    /// global constants, so there is no recovery path.
    #[error("No pricing constants record found in catalog")]
    MissingConstants,

    /// An attribute value failed numeric parsing.
    #[error("Attribute '{key}' is not a number: '{value}'")]
    UnparseableNumber { key: String, value: String },

    /// A required attribute key is absent from a record.
    #[error("Record '{record}' is missing required attribute '{key}'")]
    MissingField { record: String, key: String },

    /// The reinforcement band list failed to parse.
    #[error("Invalid reinforcement band list: {0}")]
    InvalidBands(String),

    /// A scaled fabric pricing mode carries a zero (or non-finite) divisor.
    /// Guarded at resolve time so the formula can never divide by zero.
    #[error("Fabric '{fabric}' has a zero or non-finite scale divisor")]
    ZeroScaleDivisor { fabric: String },

    /// The formula's own re-check of the divisor guard, reachable only with
    /// a config built without the resolver. No fabric name is known here.
    #[error("Fabric scale divisor is zero or non-finite")]
    InvalidScaleDivisor,
}

// =============================================================================
// Core Error
// =============================================================================

/// Umbrella error for the pricing core.
///
/// Callers that need to distinguish the two domains (e.g. for HTTP status
/// mapping) can match on the variants; both inner types convert via `From`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// The request input was rejected.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The catalog configuration was rejected.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
