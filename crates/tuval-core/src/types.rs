//! # Domain Types
//!
//! Core domain types for canvas pricing.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ FrameTypeConfig │   │FabricTypeConfig │   │ GlobalConstants │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  unit_price     │   │  pricing        │   │  wastage_rate   │       │
//! │  │  fabric_allow.  │   │  (FabricPricing)│   │  exchange_rate  │       │
//! │  │  reinf. unit    │   │                 │   │  labor, markup  │       │
//! │  └─────────────────┘   └─────────────────┘   │  tax, bands     │       │
//! │                                              └─────────────────┘       │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  FabricPricing  │   │ReinforcementBand│   │     Quote       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  DirectCurrency │   │  min, max (cm)  │   │  final_price    │       │
//! │  │  UsdPerSqMeter  │   │  count          │   │  reinf. count   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! All three config structures are built fresh per pricing request from raw
//! catalog records (prices can change between requests) and discarded at the
//! end. Nothing here is mutated after construction; the engine only reads.

use serde::{Deserialize, Serialize};

// =============================================================================
// Raw Attribute Records (catalog wire shape)
// =============================================================================

/// A single key/value attribute as delivered by the catalog.
///
/// Values arrive as raw strings regardless of their logical type; the
/// resolver parses them eagerly at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawField {
    pub key: String,
    pub value: String,
}

/// A loosely-typed attribute record: an intrinsic handle plus a field list.
///
/// This is the generic metaobject shape the external catalog exposes for
/// frame types, fabric types, and the constants record alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub handle: String,
    pub fields: Vec<RawField>,
}

impl RawRecord {
    /// Looks up a field value by key.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
    }
}

// =============================================================================
// Frame Type
// =============================================================================

/// Pricing configuration for one frame (stretcher bar) type.
///
/// Sourced fresh on every pricing request; never cached across requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameTypeConfig {
    /// Currency per linear meter of frame material. Wire key: `birim_fiyat`.
    pub unit_price: f64,

    /// Centimeters added to each fabric dimension for wrap-around.
    /// Wire key: `bez_payi`.
    pub fabric_allowance_cm: f64,

    /// Currency per linear meter of reinforcement bracing.
    /// Wire key: `kayit_birim`.
    pub reinforcement_unit_price: f64,
}

// =============================================================================
// Fabric Type
// =============================================================================

/// How a fabric's per-square-meter price is derived.
///
/// A closed two-variant union, not open-ended dispatch: the catalog tags each
/// fabric record with a `formul` string and everything downstream works on
/// this enum instead of comparing strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum FabricPricing {
    /// The catalog value is already in local currency per m².
    ///
    /// Despite living in the `usd_m2` wire field, the number is used
    /// verbatim; exchange rate and divisor are ignored entirely.
    DirectCurrency { price_per_m2: f64 },

    /// The catalog value is USD per m², converted via
    /// `exchange_rate * usd_per_m2 * 10 / scale_divisor`.
    UsdPerSquareMeter { usd_per_m2: f64, scale_divisor: f64 },
}

/// Pricing configuration for one fabric (canvas material) type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FabricTypeConfig {
    pub pricing: FabricPricing,
}

// =============================================================================
// Reinforcement Bands
// =============================================================================

/// An inclusive dimension range mapped to a reinforcement bar count.
///
/// The catalog stores the band list as JSON under `kayit_segmentleri`, with
/// the count keyed `adet`. Bands are non-overlapping and ascending; lookup
/// is a linear scan where the first inclusive match wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReinforcementBand {
    pub min: f64,
    pub max: f64,
    #[serde(rename = "adet")]
    pub count: u32,
}

impl ReinforcementBand {
    /// Inclusive on both ends: a dimension exactly at `min` or `max`
    /// belongs to this band.
    #[inline]
    pub fn contains(&self, cm: f64) -> bool {
        cm >= self.min && cm <= self.max
    }
}

// =============================================================================
// Global Constants
// =============================================================================

/// The single global constants record driving every pricing calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConstants {
    /// Fractional material overage applied to the frame perimeter.
    /// Wire key: `fire_orani`.
    pub wastage_rate: f64,

    /// Local currency units per US dollar. Wire key: `usd_kuru`.
    pub exchange_rate: f64,

    /// Labor cost per linear meter of frame. Wire key: `iscilik_birim`.
    pub labor_rate_per_meter: f64,

    /// Multiplier applied to the material subtotal. Wire key: `kar_carpani`.
    pub material_markup: f64,

    /// Fractional tax rate applied last. Wire key: `kdv_orani`.
    pub tax_rate: f64,

    /// Ordered band list for reinforcement counts. Wire key:
    /// `kayit_segmentleri`.
    pub reinforcement_bands: Vec<ReinforcementBand>,
}

// =============================================================================
// Quote
// =============================================================================

/// The result of one pricing calculation.
///
/// Only the final consumer price leaves the system; the cost breakdown the
/// formula computes internally is never exposed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Final consumer price, always a multiple of 0.1 currency units.
    pub final_price: f64,

    /// Informational: total reinforcement bars across both dimensions.
    pub reinforcement_count: u32,
}

// =============================================================================
// Unit Tests
// =============================================================================
