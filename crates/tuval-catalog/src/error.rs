//! # Catalog Error Types
//!
//! Error types for Shopify Admin API operations.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Catalog Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Payload             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Http           │  │  Json                   │ │
//! │  │  MissingToken   │  │  Status         │  │  MissingData            │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                        Catalog-side                              │   │
//! │  │                                                                 │   │
//! │  │  GraphQL (top-level errors array)                               │   │
//! │  │  UserError (mutation-level userErrors)                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog failures are a distinct error domain from pricing failures: a
//! price can still be returned to the caller when only the downstream
//! catalog materialization fails.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog error type covering all Shopify Admin API failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid catalog configuration.
    #[error("Invalid catalog configuration: {0}")]
    InvalidConfig(String),

    /// Missing access token (required for every Admin API call).
    #[error("SHOPIFY_ACCESS_TOKEN not configured")]
    MissingToken,

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The HTTP request itself failed (DNS, TLS, timeout, ...).
    #[error("Catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog answered with a non-success HTTP status.
    #[error("Catalog API returned status {0}")]
    Status(u16),

    // =========================================================================
    // Payload Errors
    // =========================================================================
    /// The response body could not be deserialized.
    #[error("Failed to parse catalog response: {0}")]
    Json(#[from] serde_json::Error),

    /// The response was well-formed but lacked expected data.
    #[error("Catalog response missing expected data: {0}")]
    MissingData(String),

    // =========================================================================
    // Catalog-side Errors
    // =========================================================================
    /// The GraphQL layer rejected the query (top-level `errors` array).
    #[error("Catalog GraphQL error: {0}")]
    GraphQL(String),

    /// The mutation ran but the catalog reported a user error.
    #[error("Catalog rejected the operation: {0}")]
    UserError(String),
}

// =============================================================================
// Error Categorization (for retry logic)
// =============================================================================

impl CatalogError {
    /// Returns true if this error is transient and the operation can be
    /// retried by the surrounding service.
    ///
    /// ## Retryable
    /// - Transport failures (network issues, timeouts)
    /// - 429 and 5xx statuses
    ///
    /// ## Non-Retryable
    /// - Configuration errors
    /// - Malformed payloads
    /// - Catalog-side rejections (same request would fail again)
    pub fn is_retryable(&self) -> bool {
        match self {
            CatalogError::Http(_) => true,
            CatalogError::Status(code) => *code == 429 || *code >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        assert!(CatalogError::Status(429).is_retryable());
        assert!(CatalogError::Status(500).is_retryable());
        assert!(CatalogError::Status(503).is_retryable());

        assert!(!CatalogError::Status(400).is_retryable());
        assert!(!CatalogError::Status(401).is_retryable());
        assert!(!CatalogError::Status(404).is_retryable());
    }

    #[test]
    fn test_catalog_side_errors_not_retryable() {
        assert!(!CatalogError::UserError("variant exists".into()).is_retryable());
        assert!(!CatalogError::GraphQL("syntax".into()).is_retryable());
        assert!(!CatalogError::MissingToken.is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = CatalogError::UserError("option value taken".into());
        assert_eq!(
            err.to_string(),
            "Catalog rejected the operation: option value taken"
        );
    }
}
