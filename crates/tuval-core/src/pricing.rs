//! # Pricing Engine
//!
//! The deterministic cost-and-markup formula: two physical dimensions plus
//! two material selections in, one consumer price and a reinforcement count
//! out.
//!
//! ## Formula Walkthrough
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Pricing Steps (order matters)                     │
//! │                                                                         │
//! │  1. frame length  = (w + h) × 2 × (1 + wastage) / 100   [meters]       │
//! │     frame cost    = length × frame unit price                           │
//! │  2. fabric area   = (h + allowance)(w + allowance) / 10000  [m²]       │
//! │  3. fabric cost   = area × unit price (direct, or USD-converted)       │
//! │  4. reinforcement = band(h) bars across the width +                     │
//! │                     band(w) bars across the height                      │
//! │  5. labor         = frame length × labor rate                           │
//! │  6. material      = frame + fabric + reinforcement                      │
//! │  7. final price   = round₀.₁((material × markup + labor) × (1 + tax))  │
//! │                                                                         │
//! │  Only the final price leaves this module; the cost breakdown stays     │
//! │  internal.                                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Cross Attribution
//! The band count looked up for one dimension scales the *other* dimension's
//! extent: reinforcement bars determined by the height run across the width
//! and vice versa. This mirrors the physical bracing layout and is preserved
//! exactly as observed in production data. Do not "fix" it without
//! confirming domain intent.

use crate::error::{ConfigError, CoreResult};
use crate::types::{
    FabricPricing, FabricTypeConfig, FrameTypeConfig, GlobalConstants, Quote,
    ReinforcementBand,
};
use crate::validation::validate_dimension;

// =============================================================================
// Band Lookup
// =============================================================================

/// Reinforcement bar count for one dimension.
///
/// Linear scan, first inclusive-range match wins, no match yields zero.
/// The band list is small (two or three entries in practice), so no binary
/// search.
pub fn reinforcement_count(cm: f64, bands: &[ReinforcementBand]) -> u32 {
    bands
        .iter()
        .find(|band| band.contains(cm))
        .map(|band| band.count)
        .unwrap_or(0)
}

// =============================================================================
// Fabric Unit Price
// =============================================================================

/// Local-currency price per m² of fabric.
///
/// Direct mode uses the catalog value verbatim; exchange rate and divisor
/// are ignored entirely. The scaled mode's divisor is guarded again here so
/// a hand-built config can never produce Infinity or NaN.
fn fabric_unit_price(fabric: &FabricTypeConfig, exchange_rate: f64) -> Result<f64, ConfigError> {
    match fabric.pricing {
        FabricPricing::DirectCurrency { price_per_m2 } => Ok(price_per_m2),
        FabricPricing::UsdPerSquareMeter {
            usd_per_m2,
            scale_divisor,
        } => {
            if scale_divisor == 0.0 || !scale_divisor.is_finite() {
                return Err(ConfigError::InvalidScaleDivisor);
            }
            Ok(exchange_rate * usd_per_m2 * 10.0 / scale_divisor)
        }
    }
}

// =============================================================================
// Rounding
// =============================================================================

/// Rounds to the nearest 0.1 currency unit, half-up.
///
/// Prices are always positive, so `f64::round` (half away from zero) is
/// half-up here.
#[inline]
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// =============================================================================
// The Pricing Function
// =============================================================================

/// Computes the final consumer price and reinforcement count for a canvas.
///
/// Pure and deterministic: identical inputs always yield an identical
/// [`Quote`]. Reads every config structure, writes none.
///
/// ## Errors
/// - [`ValidationError::OutOfRange`](crate::error::ValidationError) when a
///   dimension falls outside `[10, 350]` cm
/// - [`ConfigError::InvalidScaleDivisor`] when a scaled fabric config carries
///   a zero divisor (fail fast, never a silent Infinity)
///
/// ## Example
/// See the crate-level docs for a fully worked scenario.
pub fn quote(
    width_cm: i64,
    height_cm: i64,
    frame: &FrameTypeConfig,
    fabric: &FabricTypeConfig,
    constants: &GlobalConstants,
) -> CoreResult<Quote> {
    validate_dimension("width", width_cm)?;
    validate_dimension("height", height_cm)?;

    let width = width_cm as f64;
    let height = height_cm as f64;

    // Step 1: frame material length (meters) and cost.
    // Perimeter plus cutting wastage, centimeters scaled to meters.
    let frame_length_m = (width + height) * 2.0 * (1.0 + constants.wastage_rate) / 100.0;
    let frame_cost = frame_length_m * frame.unit_price;

    // Steps 2-3: fabric area (m²) and cost. Both dimensions are padded by
    // the same wrap-around allowance before multiplying.
    let fabric_area_m2 =
        (height + frame.fabric_allowance_cm) * (width + frame.fabric_allowance_cm) / 10_000.0;
    let fabric_cost = fabric_area_m2 * fabric_unit_price(fabric, constants.exchange_rate)?;

    // Step 4: reinforcement bars. The count keyed by one dimension scales
    // the other dimension's extent (bars run across the canvas).
    let width_bars = reinforcement_count(width, &constants.reinforcement_bands);
    let height_bars = reinforcement_count(height, &constants.reinforcement_bands);
    let reinforcement_length_m =
        (f64::from(height_bars) * width + f64::from(width_bars) * height) / 100.0;
    let reinforcement_cost = reinforcement_length_m * frame.reinforcement_unit_price;

    // Step 5: labor scales with frame length, not with area.
    let labor_cost = frame_length_m * constants.labor_rate_per_meter;

    // Steps 6-7: markup applies to material only, labor is added after,
    // tax last, then round to the nearest 0.1.
    let material_subtotal = frame_cost + fabric_cost + reinforcement_cost;
    let final_price = round_to_tenth(
        (material_subtotal * constants.material_markup + labor_cost) * (1.0 + constants.tax_rate),
    );

    Ok(Quote {
        final_price,
        reinforcement_count: width_bars + height_bars,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn test_frame() -> FrameTypeConfig {
        FrameTypeConfig {
            unit_price: 10.0,
            fabric_allowance_cm: 5.0,
            reinforcement_unit_price: 8.0,
        }
    }

    fn direct_fabric(price: f64) -> FabricTypeConfig {
        FabricTypeConfig {
            pricing: FabricPricing::DirectCurrency { price_per_m2: price },
        }
    }

    fn test_constants() -> GlobalConstants {
        GlobalConstants {
            wastage_rate: 0.05,
            exchange_rate: 40.0,
            labor_rate_per_meter: 3.0,
            material_markup: 1.5,
            tax_rate: 0.20,
            reinforcement_bands: vec![
                ReinforcementBand {
                    min: 0.0,
                    max: 150.0,
                    count: 1,
                },
                ReinforcementBand {
                    min: 151.0,
                    max: 350.0,
                    count: 2,
                },
            ],
        }
    }

    /// The reference scenario with every intermediate value worked out:
    /// frame length 7.56 m → cost 75.6; fabric 3.0625 m² × 50 → 153.125;
    /// width 120 → 1 bar, height 240 → 2 bars → length 4.8 m → cost 38.4;
    /// labor 22.68; material 267.125;
    /// (267.125 × 1.5 + 22.68) × 1.2 = 508.041 → 508.0.
    #[test]
    fn test_reference_scenario() {
        let q = quote(120, 240, &test_frame(), &direct_fabric(50.0), &test_constants()).unwrap();
        assert_eq!(q.final_price, 508.0);
        assert_eq!(q.reinforcement_count, 3);
    }

    #[test]
    fn test_quote_is_deterministic() {
        let a = quote(175, 90, &test_frame(), &direct_fabric(50.0), &test_constants()).unwrap();
        let b = quote(175, 90, &test_frame(), &direct_fabric(50.0), &test_constants()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_final_price_is_multiple_of_tenth() {
        let constants = test_constants();
        let fabric = direct_fabric(37.77);
        for (w, h) in [(10, 10), (33, 47), (120, 240), (350, 350), (151, 150)] {
            let q = quote(w, h, &test_frame(), &fabric, &constants).unwrap();
            let scaled = q.final_price * 10.0;
            assert!(
                (scaled - scaled.round()).abs() < 1e-6,
                "{}x{} produced {} which is not a multiple of 0.1",
                w,
                h,
                q.final_price
            );
        }
    }

    #[test]
    fn test_band_boundaries_are_inclusive() {
        let bands = test_constants().reinforcement_bands;
        assert_eq!(reinforcement_count(0.0, &bands), 1);
        assert_eq!(reinforcement_count(150.0, &bands), 1);
        assert_eq!(reinforcement_count(151.0, &bands), 2);
        assert_eq!(reinforcement_count(350.0, &bands), 2);
    }

    #[test]
    fn test_no_matching_band_yields_zero() {
        let bands = vec![ReinforcementBand {
            min: 100.0,
            max: 200.0,
            count: 1,
        }];
        assert_eq!(reinforcement_count(99.0, &bands), 0);
        assert_eq!(reinforcement_count(201.0, &bands), 0);
        assert_eq!(reinforcement_count(50.0, &[]), 0);
    }

    #[test]
    fn test_first_matching_band_wins() {
        // Overlap should never happen in catalog data, but if it does the
        // scan order decides.
        let bands = vec![
            ReinforcementBand {
                min: 0.0,
                max: 200.0,
                count: 1,
            },
            ReinforcementBand {
                min: 150.0,
                max: 350.0,
                count: 2,
            },
        ];
        assert_eq!(reinforcement_count(175.0, &bands), 1);
    }

    /// Direct-currency fabric mode must ignore exchange rate and divisor
    /// entirely: varying them cannot change the price.
    #[test]
    fn test_direct_mode_ignores_exchange_rate() {
        let fabric = direct_fabric(50.0);
        let mut constants = test_constants();

        let base = quote(120, 240, &test_frame(), &fabric, &constants).unwrap();
        constants.exchange_rate = 999.0;
        let shifted = quote(120, 240, &test_frame(), &fabric, &constants).unwrap();

        assert_eq!(base, shifted);
    }

    #[test]
    fn test_scaled_mode_uses_exchange_rate() {
        let fabric = FabricTypeConfig {
            pricing: FabricPricing::UsdPerSquareMeter {
                usd_per_m2: 4.0,
                scale_divisor: 2.0,
            },
        };
        let mut constants = test_constants();

        let base = quote(120, 240, &test_frame(), &fabric, &constants).unwrap();
        constants.exchange_rate = 80.0;
        let shifted = quote(120, 240, &test_frame(), &fabric, &constants).unwrap();

        assert!(shifted.final_price > base.final_price);
    }

    /// Unit price in scaled mode is exchange × usd × 10 / divisor.
    /// 40 × 4 × 10 / 2 = 800 per m², identical to a direct fabric at 800.
    #[test]
    fn test_scaled_mode_conversion_formula() {
        let scaled = FabricTypeConfig {
            pricing: FabricPricing::UsdPerSquareMeter {
                usd_per_m2: 4.0,
                scale_divisor: 2.0,
            },
        };
        let constants = test_constants();

        let from_scaled = quote(120, 240, &test_frame(), &scaled, &constants).unwrap();
        let from_direct =
            quote(120, 240, &test_frame(), &direct_fabric(800.0), &constants).unwrap();

        assert_eq!(from_scaled, from_direct);
    }

    #[test]
    fn test_zero_divisor_fails_fast() {
        let fabric = FabricTypeConfig {
            pricing: FabricPricing::UsdPerSquareMeter {
                usd_per_m2: 4.0,
                scale_divisor: 0.0,
            },
        };
        let err = quote(120, 240, &test_frame(), &fabric, &test_constants()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Config(ConfigError::InvalidScaleDivisor)
        ));
        // The message never names a fabric (none is known here), and in
        // particular carries no placeholder name.
        assert_eq!(
            err.to_string(),
            "Configuration error: Fabric scale divisor is zero or non-finite"
        );
    }

    /// Swapping width and height: the perimeter is symmetric, the allowance
    /// is applied identically to both dimensions, and the total bar count is
    /// symmetric even though the per-dimension attribution swaps. The whole
    /// quote is therefore identical.
    #[test]
    fn test_width_height_swap_symmetry() {
        let a = quote(120, 240, &test_frame(), &direct_fabric(50.0), &test_constants()).unwrap();
        let b = quote(240, 120, &test_frame(), &direct_fabric(50.0), &test_constants()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_dimension_bounds_enforced() {
        let frame = test_frame();
        let fabric = direct_fabric(50.0);
        let constants = test_constants();

        assert!(quote(9, 100, &frame, &fabric, &constants).is_err());
        assert!(quote(100, 9, &frame, &fabric, &constants).is_err());
        assert!(quote(351, 100, &frame, &fabric, &constants).is_err());
        assert!(quote(100, 351, &frame, &fabric, &constants).is_err());

        assert!(quote(10, 10, &frame, &fabric, &constants).is_ok());
        assert!(quote(350, 350, &frame, &fabric, &constants).is_ok());
    }

    #[test]
    fn test_rounding_to_tenth() {
        assert_eq!(round_to_tenth(508.041), 508.0);
        assert_eq!(round_to_tenth(508.05), 508.1);
        assert_eq!(round_to_tenth(508.96), 509.0);
        assert_eq!(round_to_tenth(0.0), 0.0);
    }
}
