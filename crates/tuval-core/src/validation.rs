//! # Validation Module
//!
//! Input validation for pricing requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront widget (JavaScript)                               │
//! │  ├── Slider bounds, immediate user feedback                            │
//! │  └── Untrusted - anyone can POST to the API directly                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: API handler (Rust)                                           │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: dimension bounds, selector presence                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Resolver lookup                                              │
//! │  └── Unknown frame/fabric selectors rejected with a named error        │
//! │                                                                         │
//! │  Defense in depth: no layer trusts the one above it                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_DIMENSION_CM, MIN_DIMENSION_CM};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Dimension Validators
// =============================================================================

/// Validates a canvas dimension in centimeters.
///
/// ## Rules
/// - Must be within `[10, 350]` inclusive on both ends
/// - 10 and 350 succeed; 9 and 351 fail
///
/// ## Example
/// ```rust
/// use tuval_core::validation::validate_dimension;
///
/// assert!(validate_dimension("width", 10).is_ok());
/// assert!(validate_dimension("width", 350).is_ok());
/// assert!(validate_dimension("width", 9).is_err());
/// assert!(validate_dimension("height", 351).is_err());
/// ```
pub fn validate_dimension(field: &str, cm: i64) -> ValidationResult<()> {
    if !(MIN_DIMENSION_CM..=MAX_DIMENSION_CM).contains(&cm) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value: cm,
            min: MIN_DIMENSION_CM,
            max: MAX_DIMENSION_CM,
        });
    }

    Ok(())
}

// =============================================================================
// Selector Validators
// =============================================================================

/// Validates a frame/fabric selector string.
///
/// ## Rules
/// - Must not be empty after trimming
///
/// Whether the selector actually exists in the catalog is checked later,
/// against the freshly resolved lookup tables.
pub fn validate_selector(field: &str, selector: &str) -> ValidationResult<()> {
    if selector.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_bounds_are_inclusive() {
        assert!(validate_dimension("width", 10).is_ok());
        assert!(validate_dimension("width", 350).is_ok());
        assert!(validate_dimension("width", 120).is_ok());

        assert!(validate_dimension("width", 9).is_err());
        assert!(validate_dimension("width", 351).is_err());
        assert!(validate_dimension("width", 0).is_err());
        assert!(validate_dimension("width", -10).is_err());
    }

    #[test]
    fn test_dimension_error_names_the_field() {
        let err = validate_dimension("height", 351).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                field: "height".to_string(),
                value: 351,
                min: 10,
                max: 350,
            }
        );
    }

    #[test]
    fn test_selector_must_be_present() {
        assert!(validate_selector("frame", "1,7x2,8").is_ok());
        assert!(validate_selector("frame", "").is_err());
        assert!(validate_selector("fabric", "   ").is_err());
    }
}
