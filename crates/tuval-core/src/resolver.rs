//! # Configuration Resolver
//!
//! Turns raw key/value attribute records from the external catalog into the
//! three typed lookup structures the pricing engine consumes.
//!
//! ## Parse at the Boundary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Resolver Data Flow                                   │
//! │                                                                         │
//! │  Catalog metaobjects (raw strings)          Typed configs               │
//! │                                                                         │
//! │  sase_tipi records  ──► resolve_frame_types  ──► name → FrameTypeConfig│
//! │  bez_tipi records   ──► resolve_fabric_types ──► name → FabricTypeConfig│
//! │  tuval_sabitler     ──► resolve_constants    ──► GlobalConstants       │
//! │                                                                         │
//! │  Malformed records are rejected HERE, immediately, so the pricing      │
//! │  formula only ever sees well-formed numbers.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Naming Convention
//! The display-name field is keyed `ad`; if absent, the record's intrinsic
//! handle is the lookup key. The catalog stores some string values with
//! surrounding quote characters, which are stripped.

use std::collections::HashMap;

use crate::error::ConfigError;
use crate::types::{
    FabricPricing, FabricTypeConfig, FrameTypeConfig, GlobalConstants, RawRecord,
    ReinforcementBand,
};

// =============================================================================
// Wire Keys
// =============================================================================

/// Display-name attribute on frame and fabric records.
const KEY_DISPLAY_NAME: &str = "ad";
/// Fabric pricing-mode tag; kept as a literal string, never parsed as f64.
const KEY_FORMULA: &str = "formul";
/// `formul` value selecting the direct-currency fabric mode.
const FORMULA_DIRECT: &str = "direkt_tl";

const KEY_FRAME_UNIT_PRICE: &str = "birim_fiyat";
const KEY_FABRIC_ALLOWANCE: &str = "bez_payi";
const KEY_REINFORCEMENT_UNIT: &str = "kayit_birim";

const KEY_FABRIC_USD_M2: &str = "usd_m2";
const KEY_FABRIC_DIVISOR: &str = "bolum";

const KEY_WASTAGE_RATE: &str = "fire_orani";
const KEY_EXCHANGE_RATE: &str = "usd_kuru";
const KEY_LABOR_RATE: &str = "iscilik_birim";
const KEY_MARKUP: &str = "kar_carpani";
const KEY_TAX_RATE: &str = "kdv_orani";
/// The one constants field that is nested JSON, not a plain number.
const KEY_BANDS: &str = "kayit_segmentleri";

// =============================================================================
// Frame Types
// =============================================================================

/// Resolves frame-type records into a lookup table keyed by display name.
///
/// Every non-name field must parse as a finite number; a field that fails
/// numeric parsing surfaces as [`ConfigError::UnparseableNumber`] rather
/// than silently becoming a non-number.
pub fn resolve_frame_types(
    records: &[RawRecord],
) -> Result<HashMap<String, FrameTypeConfig>, ConfigError> {
    let mut table = HashMap::with_capacity(records.len());

    for record in records {
        let name = display_name(record);
        let numbers = numeric_fields(record, &[KEY_DISPLAY_NAME])?;

        let config = FrameTypeConfig {
            unit_price: required(&numbers, &name, KEY_FRAME_UNIT_PRICE)?,
            fabric_allowance_cm: required(&numbers, &name, KEY_FABRIC_ALLOWANCE)?,
            reinforcement_unit_price: required(&numbers, &name, KEY_REINFORCEMENT_UNIT)?,
        };

        table.insert(name, config);
    }

    Ok(table)
}

// =============================================================================
// Fabric Types
// =============================================================================

/// Resolves fabric-type records into a lookup table keyed by display name.
///
/// The `formul` field stays a literal string tag (quotes stripped) and picks
/// the pricing mode: `direkt_tl` means the `usd_m2` value is already local
/// currency per m²; any other (or absent) tag means the scaled USD variant,
/// which additionally requires a non-zero `bolum` divisor.
pub fn resolve_fabric_types(
    records: &[RawRecord],
) -> Result<HashMap<String, FabricTypeConfig>, ConfigError> {
    let mut table = HashMap::with_capacity(records.len());

    for record in records {
        let name = display_name(record);
        let formula = record.field(KEY_FORMULA).map(strip_quotes);
        let numbers = numeric_fields(record, &[KEY_DISPLAY_NAME, KEY_FORMULA])?;

        let base = required(&numbers, &name, KEY_FABRIC_USD_M2)?;

        let pricing = match formula.as_deref() {
            Some(FORMULA_DIRECT) => FabricPricing::DirectCurrency { price_per_m2: base },
            _ => {
                let divisor = required(&numbers, &name, KEY_FABRIC_DIVISOR)?;
                if divisor == 0.0 || !divisor.is_finite() {
                    return Err(ConfigError::ZeroScaleDivisor {
                        fabric: name.clone(),
                    });
                }
                FabricPricing::UsdPerSquareMeter {
                    usd_per_m2: base,
                    scale_divisor: divisor,
                }
            }
        };

        table.insert(name, FabricTypeConfig { pricing });
    }

    Ok(table)
}

// =============================================================================
// Global Constants
// =============================================================================

/// Resolves the single global constants record.
///
/// Zero records is fatal: pricing cannot proceed without constants, so
/// [`ConfigError::MissingConstants`] has no recovery path. If the catalog
/// ever returns more than one record the first wins, matching the
/// first-of-one query the catalog layer issues.
pub fn resolve_constants(records: &[RawRecord]) -> Result<GlobalConstants, ConfigError> {
    let record = records.first().ok_or(ConfigError::MissingConstants)?;

    let bands_raw = record
        .field(KEY_BANDS)
        .ok_or_else(|| ConfigError::MissingField {
            record: "constants".to_string(),
            key: KEY_BANDS.to_string(),
        })?;

    let reinforcement_bands: Vec<ReinforcementBand> =
        serde_json::from_str(bands_raw).map_err(|e| ConfigError::InvalidBands(e.to_string()))?;

    let numbers = numeric_fields(record, &[KEY_BANDS])?;

    Ok(GlobalConstants {
        wastage_rate: required(&numbers, "constants", KEY_WASTAGE_RATE)?,
        exchange_rate: required(&numbers, "constants", KEY_EXCHANGE_RATE)?,
        labor_rate_per_meter: required(&numbers, "constants", KEY_LABOR_RATE)?,
        material_markup: required(&numbers, "constants", KEY_MARKUP)?,
        tax_rate: required(&numbers, "constants", KEY_TAX_RATE)?,
        reinforcement_bands,
    })
}

// =============================================================================
// Parsing Helpers
// =============================================================================

/// The lookup key for a record: the `ad` field (quotes stripped), falling
/// back to the record's intrinsic handle.
fn display_name(record: &RawRecord) -> String {
    record
        .field(KEY_DISPLAY_NAME)
        .map(strip_quotes)
        .unwrap_or_else(|| record.handle.clone())
}

/// Strips surrounding (and embedded) quote characters the catalog wraps
/// around some string values.
fn strip_quotes(raw: &str) -> String {
    raw.replace('"', "")
}

/// Parses every field except `skip` keys as a finite f64.
fn numeric_fields(
    record: &RawRecord,
    skip: &[&str],
) -> Result<HashMap<String, f64>, ConfigError> {
    let mut numbers = HashMap::with_capacity(record.fields.len());

    for field in &record.fields {
        if skip.contains(&field.key.as_str()) {
            continue;
        }
        let parsed = field.value.trim().parse::<f64>().ok().filter(|v| v.is_finite());
        match parsed {
            Some(v) => {
                numbers.insert(field.key.clone(), v);
            }
            None => {
                return Err(ConfigError::UnparseableNumber {
                    key: field.key.clone(),
                    value: field.value.clone(),
                });
            }
        }
    }

    Ok(numbers)
}

/// Pulls a required numeric field out of a parsed record.
fn required(
    numbers: &HashMap<String, f64>,
    record: &str,
    key: &str,
) -> Result<f64, ConfigError> {
    numbers.get(key).copied().ok_or_else(|| ConfigError::MissingField {
        record: record.to_string(),
        key: key.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawField;

    fn record(handle: &str, fields: &[(&str, &str)]) -> RawRecord {
        RawRecord {
            handle: handle.to_string(),
            fields: fields
                .iter()
                .map(|(k, v)| RawField {
                    key: k.to_string(),
                    value: v.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_frame_record_keyed_by_display_name() {
        let records = vec![record(
            "sase-1",
            &[
                ("ad", "\"1,7x2,8\""),
                ("birim_fiyat", "10"),
                ("bez_payi", "5"),
                ("kayit_birim", "8"),
            ],
        )];
        let table = resolve_frame_types(&records).unwrap();

        // Quotes stripped from the display name
        let frame = table.get("1,7x2,8").expect("keyed by display name");
        assert_eq!(frame.unit_price, 10.0);
        assert_eq!(frame.fabric_allowance_cm, 5.0);
        assert_eq!(frame.reinforcement_unit_price, 8.0);
    }

    #[test]
    fn test_frame_record_falls_back_to_handle() {
        let records = vec![record(
            "sase-fallback",
            &[("birim_fiyat", "12.5"), ("bez_payi", "4"), ("kayit_birim", "7")],
        )];
        let table = resolve_frame_types(&records).unwrap();
        assert!(table.contains_key("sase-fallback"));
    }

    #[test]
    fn test_unparseable_number_names_the_key() {
        let records = vec![record(
            "sase-1",
            &[("ad", "Basic"), ("birim_fiyat", "on iki"), ("bez_payi", "5")],
        )];
        let err = resolve_frame_types(&records).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnparseableNumber {
                key: "birim_fiyat".to_string(),
                value: "on iki".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_required_frame_field() {
        let records = vec![record("sase-1", &[("ad", "Basic"), ("birim_fiyat", "10")])];
        let err = resolve_frame_types(&records).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { ref key, .. } if key == "bez_payi"));
    }

    #[test]
    fn test_fabric_direct_mode() {
        let records = vec![record(
            "bez-1",
            &[("ad", "320gr Pamuk"), ("formul", "\"direkt_tl\""), ("usd_m2", "50")],
        )];
        let table = resolve_fabric_types(&records).unwrap();
        let fabric = table.get("320gr Pamuk").unwrap();
        assert_eq!(
            fabric.pricing,
            FabricPricing::DirectCurrency { price_per_m2: 50.0 }
        );
    }

    #[test]
    fn test_fabric_scaled_mode_is_the_default() {
        // No formul tag at all → scaled variant
        let records = vec![record(
            "bez-2",
            &[("ad", "Polyester"), ("usd_m2", "4.2"), ("bolum", "1.5")],
        )];
        let table = resolve_fabric_types(&records).unwrap();
        assert_eq!(
            table.get("Polyester").unwrap().pricing,
            FabricPricing::UsdPerSquareMeter {
                usd_per_m2: 4.2,
                scale_divisor: 1.5,
            }
        );
    }

    #[test]
    fn test_fabric_zero_divisor_rejected() {
        let records = vec![record(
            "bez-3",
            &[("ad", "Keten"), ("usd_m2", "6"), ("bolum", "0")],
        )];
        let err = resolve_fabric_types(&records).unwrap_err();
        assert_eq!(
            err,
            ConfigError::ZeroScaleDivisor {
                fabric: "Keten".to_string(),
            }
        );
    }

    #[test]
    fn test_fabric_scaled_mode_requires_divisor() {
        let records = vec![record("bez-4", &[("ad", "Keten"), ("usd_m2", "6")])];
        let err = resolve_fabric_types(&records).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { ref key, .. } if key == "bolum"));
    }

    #[test]
    fn test_constants_happy_path() {
        let records = vec![record(
            "",
            &[
                ("fire_orani", "0.05"),
                ("usd_kuru", "41.3"),
                ("iscilik_birim", "3"),
                ("kar_carpani", "1.5"),
                ("kdv_orani", "0.2"),
                (
                    "kayit_segmentleri",
                    r#"[{"min":0,"max":150,"adet":1},{"min":151,"max":350,"adet":2}]"#,
                ),
            ],
        )];
        let constants = resolve_constants(&records).unwrap();
        assert_eq!(constants.wastage_rate, 0.05);
        assert_eq!(constants.exchange_rate, 41.3);
        assert_eq!(constants.reinforcement_bands.len(), 2);
        assert_eq!(constants.reinforcement_bands[1].count, 2);
    }

    #[test]
    fn test_zero_constants_records_is_fatal() {
        let err = resolve_constants(&[]).unwrap_err();
        assert_eq!(err, ConfigError::MissingConstants);
    }

    #[test]
    fn test_malformed_band_list_rejected() {
        let records = vec![record(
            "",
            &[
                ("fire_orani", "0.05"),
                ("usd_kuru", "41.3"),
                ("iscilik_birim", "3"),
                ("kar_carpani", "1.5"),
                ("kdv_orani", "0.2"),
                ("kayit_segmentleri", "not json"),
            ],
        )];
        let err = resolve_constants(&records).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBands(_)));
    }

    #[test]
    fn test_constants_numeric_field_must_parse() {
        let records = vec![record(
            "",
            &[
                ("fire_orani", "yok"),
                ("kayit_segmentleri", "[]"),
            ],
        )];
        let err = resolve_constants(&records).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnparseableNumber {
                key: "fire_orani".to_string(),
                value: "yok".to_string(),
            }
        );
    }
}
