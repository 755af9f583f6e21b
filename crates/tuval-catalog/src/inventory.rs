//! # Inventory Backfill
//!
//! Bulk inventory-location placement: every product variant stocked at the
//! primary warehouse location should also carry a (zero) stock level at each
//! secondary location, so the storefront treats all locations as fulfilment
//! candidates.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Backfill Pipeline                                 │
//! │                                                                         │
//! │  1. Scan    ── paginate all product variants (250 per page, cursor)    │
//! │  2. Plan    ── items at the primary location missing a secondary one   │
//! │               (pure function, tested from canned data)                 │
//! │  3. Assign  ── POST inventory level 0 per missing (item, location),    │
//! │               10 requests in flight per batch                          │
//! │  4. Report  ── matched items, assignments, completed, errors, duration │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Individual assignment failures are counted, not propagated: one flaky
//! call must not abort a thousand-item backfill.

use std::time::Instant;

use futures_util::future::join_all;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::client::CatalogClient;
use crate::error::{CatalogError, CatalogResult};

/// GID prefix in front of numeric inventory item ids.
const ITEM_GID_PREFIX: &str = "gid://shopify/InventoryItem/";
/// GID prefix in front of numeric location ids.
const LOCATION_GID_PREFIX: &str = "gid://shopify/Location/";

/// Variants fetched per page.
const PAGE_SIZE: usize = 250;
/// Assignment requests in flight at once.
const BATCH_SIZE: usize = 10;

// =============================================================================
// Scan
// =============================================================================

/// Where one variant's inventory item is currently stocked.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPlacement {
    pub inventory_item_id: u64,
    pub location_gids: Vec<String>,
}

/// One page of the variant scan.
#[derive(Debug)]
pub struct VariantsPage {
    pub items: Vec<ItemPlacement>,
    pub end_cursor: Option<String>,
    pub has_next: bool,
}

fn variants_query(cursor: Option<&str>) -> String {
    let after = cursor
        .map(|c| format!(r#", after: "{c}""#))
        .unwrap_or_default();
    format!(
        r#"{{
  productVariants(first: {PAGE_SIZE}{after}) {{
    edges {{
      cursor
      node {{
        id
        inventoryItem {{
          id
          inventoryLevels(first: 10) {{
            edges {{ node {{ location {{ id }} }} }}
          }}
        }}
      }}
    }}
    pageInfo {{ hasNextPage }}
  }}
}}"#
    )
}

/// Parse one page of the variant scan out of the GraphQL `data` object.
pub fn parse_variants_page(data: &Value) -> CatalogResult<VariantsPage> {
    let connection = data
        .get("productVariants")
        .ok_or_else(|| CatalogError::MissingData("productVariants".to_string()))?;

    let edges = connection
        .get("edges")
        .and_then(Value::as_array)
        .ok_or_else(|| CatalogError::MissingData("productVariants.edges".to_string()))?;

    let mut items = Vec::with_capacity(edges.len());
    for edge in edges {
        let item = match edge.pointer("/node/inventoryItem") {
            Some(item) => item,
            None => continue,
        };

        let gid = item
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| CatalogError::MissingData("inventoryItem.id".to_string()))?;
        let inventory_item_id = gid
            .trim_start_matches(ITEM_GID_PREFIX)
            .parse::<u64>()
            .map_err(|_| CatalogError::MissingData(format!("bad inventory item id: {gid}")))?;

        let location_gids = item
            .pointer("/inventoryLevels/edges")
            .and_then(Value::as_array)
            .map(|levels| {
                levels
                    .iter()
                    .filter_map(|l| l.pointer("/node/location/id").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        items.push(ItemPlacement {
            inventory_item_id,
            location_gids,
        });
    }

    let end_cursor = edges
        .last()
        .and_then(|e| e.get("cursor"))
        .and_then(Value::as_str)
        .map(str::to_string);

    let has_next = connection
        .pointer("/pageInfo/hasNextPage")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Ok(VariantsPage {
        items,
        end_cursor,
        has_next,
    })
}

// =============================================================================
// Plan
// =============================================================================

/// One missing (inventory item, location) pair to assign.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub inventory_item_id: u64,
    pub location_id: u64,
}

/// Plan the assignments for a set of scanned items.
///
/// Only items already stocked at the primary location participate; for each,
/// every configured secondary location the item is missing from yields one
/// assignment. Returns the matched item count alongside the flat task list.
pub fn plan_assignments(
    items: &[ItemPlacement],
    primary_location_gid: &str,
    secondary_location_ids: &[u64],
) -> (usize, Vec<Assignment>) {
    let mut matched = 0;
    let mut assignments = Vec::new();

    for item in items {
        if !item.location_gids.iter().any(|g| g == primary_location_gid) {
            continue;
        }

        let missing: Vec<u64> = secondary_location_ids
            .iter()
            .copied()
            .filter(|id| {
                let gid = format!("{LOCATION_GID_PREFIX}{id}");
                !item.location_gids.iter().any(|g| *g == gid)
            })
            .collect();

        if missing.is_empty() {
            continue;
        }

        matched += 1;
        assignments.extend(missing.into_iter().map(|location_id| Assignment {
            inventory_item_id: item.inventory_item_id,
            location_id,
        }));
    }

    (matched, assignments)
}

// =============================================================================
// Report
// =============================================================================

/// Outcome of one backfill run.
#[derive(Debug, Clone, Serialize)]
pub struct BackfillReport {
    /// Items found at the primary location with at least one gap.
    pub matched_items: usize,
    /// Total (item, location) assignments attempted.
    pub total_assignments: usize,
    /// Assignments that succeeded.
    pub completed: usize,
    /// Assignments that failed (logged, not fatal).
    pub errors: usize,
    /// Wall-clock duration of the whole run in seconds.
    pub duration_seconds: f64,
}

// =============================================================================
// Run
// =============================================================================

/// Scan, plan, and execute a full inventory backfill.
pub async fn run_backfill(client: &CatalogClient) -> CatalogResult<BackfillReport> {
    let started = Instant::now();
    let config = client.config();

    // 1. Scan every variant page.
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let data = client.graphql(&variants_query(cursor.as_deref())).await?;
        let page = parse_variants_page(&data)?;
        items.extend(page.items);

        if !page.has_next {
            break;
        }
        cursor = page.end_cursor;
        if cursor.is_none() {
            // hasNextPage with no cursor to reach it; stop rather than loop.
            warn!("Variant scan ended early: hasNextPage without an end cursor");
            break;
        }
    }

    // 2. Plan.
    let (matched_items, assignments) = plan_assignments(
        &items,
        &config.primary_location_gid,
        &config.secondary_location_ids,
    );

    info!(
        scanned = items.len(),
        matched_items,
        assignments = assignments.len(),
        "Backfill plan ready"
    );

    // 3. Execute in bounded batches.
    let endpoint = config.inventory_set_endpoint();
    let mut completed = 0;
    let mut errors = 0;

    for batch in assignments.chunks(BATCH_SIZE) {
        let results = join_all(batch.iter().map(|task| {
            let body = json!({
                "inventory_item_id": task.inventory_item_id,
                "location_id": task.location_id,
                "available": 0,
            });
            let endpoint = endpoint.clone();
            async move { client.rest_post(&endpoint, &body).await }
        }))
        .await;

        for (task, result) in batch.iter().zip(results) {
            match result {
                Ok(()) => completed += 1,
                Err(e) => {
                    errors += 1;
                    warn!(
                        inventory_item_id = task.inventory_item_id,
                        location_id = task.location_id,
                        error = %e,
                        "Inventory assignment failed"
                    );
                }
            }
        }
    }

    let report = BackfillReport {
        matched_items,
        total_assignments: assignments.len(),
        completed,
        errors,
        duration_seconds: started.elapsed().as_secs_f64(),
    };

    info!(
        completed = report.completed,
        errors = report.errors,
        duration_seconds = report.duration_seconds,
        "Backfill complete"
    );

    Ok(report)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn placement(item_id: u64, location_ids: &[u64]) -> ItemPlacement {
        ItemPlacement {
            inventory_item_id: item_id,
            location_gids: location_ids
                .iter()
                .map(|id| format!("{LOCATION_GID_PREFIX}{id}"))
                .collect(),
        }
    }

    const PRIMARY: &str = "gid://shopify/Location/100";

    #[test]
    fn test_plan_skips_items_not_at_primary() {
        let items = vec![placement(1, &[200, 300])];
        let (matched, assignments) = plan_assignments(&items, PRIMARY, &[200, 300]);
        assert_eq!(matched, 0);
        assert!(assignments.is_empty());
    }

    #[test]
    fn test_plan_assigns_only_missing_locations() {
        let items = vec![placement(7, &[100, 200])];
        let (matched, assignments) = plan_assignments(&items, PRIMARY, &[200, 300, 400]);
        assert_eq!(matched, 1);
        assert_eq!(
            assignments,
            vec![
                Assignment {
                    inventory_item_id: 7,
                    location_id: 300,
                },
                Assignment {
                    inventory_item_id: 7,
                    location_id: 400,
                },
            ]
        );
    }

    #[test]
    fn test_plan_skips_fully_placed_items() {
        let items = vec![placement(9, &[100, 200, 300])];
        let (matched, assignments) = plan_assignments(&items, PRIMARY, &[200, 300]);
        assert_eq!(matched, 0);
        assert!(assignments.is_empty());
    }

    #[test]
    fn test_parse_variants_page() {
        let data = json!({
            "productVariants": {
                "edges": [
                    {
                        "cursor": "abc",
                        "node": {
                            "id": "gid://shopify/ProductVariant/1",
                            "inventoryItem": {
                                "id": "gid://shopify/InventoryItem/42",
                                "inventoryLevels": {
                                    "edges": [
                                        { "node": { "location": { "id": "gid://shopify/Location/100" } } },
                                        { "node": { "location": { "id": "gid://shopify/Location/200" } } }
                                    ]
                                }
                            }
                        }
                    }
                ],
                "pageInfo": { "hasNextPage": true }
            }
        });

        let page = parse_variants_page(&data).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].inventory_item_id, 42);
        assert_eq!(page.items[0].location_gids.len(), 2);
        assert_eq!(page.end_cursor.as_deref(), Some("abc"));
        assert!(page.has_next);
    }

    #[test]
    fn test_parse_empty_page() {
        let data = json!({
            "productVariants": {
                "edges": [],
                "pageInfo": { "hasNextPage": false }
            }
        });
        let page = parse_variants_page(&data).unwrap();
        assert!(page.items.is_empty());
        assert!(page.end_cursor.is_none());
        assert!(!page.has_next);
    }

    #[test]
    fn test_query_pagination_clause() {
        assert!(!variants_query(None).contains("after"));
        assert!(variants_query(Some("abc")).contains(r#"after: "abc""#));
    }
}
