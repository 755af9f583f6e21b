//! # Metaobject Fetch - the Configuration Source
//!
//! Pulls the raw pricing configuration out of the catalog: the frame-type
//! list, the fabric-type list, and the single global constants record, all
//! in the generic metaobject attribute-record shape.
//!
//! ## Freshness over caching
//! The query runs once per pricing request, by design: store staff edit
//! prices in the catalog admin and expect the very next quote to reflect
//! them. Nothing here is cached. If request volume ever warrants it, a
//! short-lived cache with explicit invalidation can wrap this module
//! without touching the resolver or the formula.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use tuval_core::types::{RawField, RawRecord};

use crate::client::CatalogClient;
use crate::error::{CatalogError, CatalogResult};

// =============================================================================
// Metaobject Types
// =============================================================================

/// Metaobject type holding frame (şase) definitions.
const TYPE_FRAME: &str = "sase_tipi";
/// Metaobject type holding fabric (bez) definitions.
const TYPE_FABRIC: &str = "bez_tipi";
/// Metaobject type holding the single constants record.
const TYPE_CONSTANTS: &str = "tuval_sabitler";

// =============================================================================
// Wire Shapes
// =============================================================================

#[derive(Debug, Deserialize)]
struct MetaobjectsData {
    #[serde(rename = "saseList")]
    frame_list: NodeList,
    #[serde(rename = "bezList")]
    fabric_list: NodeList,
    #[serde(rename = "sabitler")]
    constants: NodeList,
}

#[derive(Debug, Deserialize)]
struct NodeList {
    nodes: Vec<Node>,
}

#[derive(Debug, Deserialize)]
struct Node {
    #[serde(default)]
    handle: String,
    fields: Vec<NodeField>,
}

#[derive(Debug, Deserialize)]
struct NodeField {
    key: String,
    // Shopify returns null for unset metaobject fields.
    value: Option<String>,
}

impl From<Node> for RawRecord {
    fn from(node: Node) -> Self {
        RawRecord {
            handle: node.handle,
            fields: node
                .fields
                .into_iter()
                .filter_map(|f| {
                    f.value.map(|value| RawField { key: f.key, value })
                })
                .collect(),
        }
    }
}

// =============================================================================
// Pricing Inputs
// =============================================================================

/// The three raw record sets a pricing request resolves from.
#[derive(Debug, Clone)]
pub struct PricingInputs {
    pub frame_records: Vec<RawRecord>,
    pub fabric_records: Vec<RawRecord>,
    pub constants_records: Vec<RawRecord>,
}

// =============================================================================
// Fetch
// =============================================================================

/// One aliased query for all three record sets; a single round trip per
/// pricing request.
fn metaobjects_query() -> String {
    format!(
        r#"{{
  saseList: metaobjects(type: "{TYPE_FRAME}", first: 50) {{
    nodes {{ handle fields {{ key value }} }}
  }}
  bezList: metaobjects(type: "{TYPE_FABRIC}", first: 50) {{
    nodes {{ handle fields {{ key value }} }}
  }}
  sabitler: metaobjects(type: "{TYPE_CONSTANTS}", first: 1) {{
    nodes {{ handle fields {{ key value }} }}
  }}
}}"#
    )
}

/// Fetch the raw pricing inputs, fresh, from the catalog.
pub async fn fetch_pricing_inputs(client: &CatalogClient) -> CatalogResult<PricingInputs> {
    let data = client.graphql(&metaobjects_query()).await?;
    let inputs = parse_pricing_inputs(data)?;

    debug!(
        frames = inputs.frame_records.len(),
        fabrics = inputs.fabric_records.len(),
        constants = inputs.constants_records.len(),
        "Fetched pricing metaobjects"
    );

    Ok(inputs)
}

/// Parse the GraphQL `data` object into raw records.
///
/// Split from the fetch so the wire-shape handling is testable from canned
/// JSON without a network.
pub fn parse_pricing_inputs(data: Value) -> CatalogResult<PricingInputs> {
    let parsed: MetaobjectsData =
        serde_json::from_value(data).map_err(CatalogError::Json)?;

    Ok(PricingInputs {
        frame_records: parsed.frame_list.nodes.into_iter().map(Into::into).collect(),
        fabric_records: parsed.fabric_list.nodes.into_iter().map(Into::into).collect(),
        constants_records: parsed.constants.nodes.into_iter().map(Into::into).collect(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
