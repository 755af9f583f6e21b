//! Catalog configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. The credential and endpoint are resolved once at process start
//! and injected into [`CatalogClient`](crate::client::CatalogClient) - never
//! read from a bare global - which keeps the pricing core and resolver
//! testable without network access.

use std::env;
use std::time::Duration;

use crate::error::CatalogError;

/// Default Admin API version; bump deliberately, not implicitly.
const DEFAULT_API_VERSION: &str = "2025-01";

/// The store's secondary warehouse locations. Backfill assigns a zero
/// stock level at each of these for every item stocked at the primary.
const DEFAULT_SECONDARY_LOCATION_IDS: [u64; 4] =
    [114_207_752_486, 114_207_588_646, 114_207_654_182, 114_207_719_718];

/// Catalog (Shopify Admin API) configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Store subdomain, e.g. `cbx25` for `cbx25.myshopify.com`.
    pub store: String,

    /// Admin API access token. Required; there is no anonymous fallback.
    pub access_token: String,

    /// Admin API version segment of the endpoint URL.
    pub api_version: String,

    /// GID of the custom-canvas product that dynamic variants attach to.
    pub custom_product_gid: String,

    /// GID of the primary warehouse location (the one every item is
    /// stocked at). Backfill only considers items present here.
    pub primary_location_gid: String,

    /// Numeric IDs of the secondary locations that backfill assigns
    /// zero-stock levels to.
    pub secondary_location_ids: Vec<u64>,

    /// Per-request timeout toward the catalog.
    pub request_timeout: Duration,
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    ///
    /// ## Variables
    /// - `SHOPIFY_STORE` - store subdomain (default: `cbx25`)
    /// - `SHOPIFY_ACCESS_TOKEN` - Admin API token (required)
    /// - `SHOPIFY_API_VERSION` - API version (default: `2025-01`)
    /// - `CUSTOM_PRODUCT_GID` - product for dynamic variants
    /// - `PRIMARY_LOCATION_GID` - primary warehouse location
    /// - `SECONDARY_LOCATION_IDS` - comma-separated numeric location IDs
    ///   (default: the store's four secondary locations)
    /// - `CATALOG_TIMEOUT_SECS` - request timeout (default: 15)
    pub fn load() -> Result<Self, CatalogError> {
        let access_token = env::var("SHOPIFY_ACCESS_TOKEN").map_err(|_| CatalogError::MissingToken)?;
        if access_token.trim().is_empty() {
            return Err(CatalogError::MissingToken);
        }

        // An explicit (even empty) env value overrides the defaults; absence
        // means the store's own secondary locations.
        let secondary_location_ids = match env::var("SECONDARY_LOCATION_IDS") {
            Ok(raw) => parse_location_ids(&raw)?,
            Err(_) => DEFAULT_SECONDARY_LOCATION_IDS.to_vec(),
        };

        let request_timeout = env::var("CATALOG_TIMEOUT_SECS")
            .unwrap_or_else(|_| "15".to_string())
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| CatalogError::InvalidConfig("CATALOG_TIMEOUT_SECS".to_string()))?;

        Ok(CatalogConfig {
            store: env::var("SHOPIFY_STORE").unwrap_or_else(|_| "cbx25".to_string()),
            access_token,
            api_version: env::var("SHOPIFY_API_VERSION")
                .unwrap_or_else(|_| DEFAULT_API_VERSION.to_string()),
            custom_product_gid: env::var("CUSTOM_PRODUCT_GID")
                .unwrap_or_else(|_| "gid://shopify/Product/10400727662886".to_string()),
            primary_location_gid: env::var("PRIMARY_LOCATION_GID")
                .unwrap_or_else(|_| "gid://shopify/Location/114207686950".to_string()),
            secondary_location_ids,
            request_timeout,
        })
    }

    /// The Admin GraphQL endpoint for this store and API version.
    pub fn graphql_endpoint(&self) -> String {
        format!(
            "https://{}.myshopify.com/admin/api/{}/graphql.json",
            self.store, self.api_version
        )
    }

    /// The REST endpoint that sets an inventory level.
    pub fn inventory_set_endpoint(&self) -> String {
        format!(
            "https://{}.myshopify.com/admin/api/{}/inventory_levels/set.json",
            self.store, self.api_version
        )
    }
}

/// Parses a comma-separated numeric location id list. Empty segments are
/// skipped, so an empty string disables secondary locations entirely.
fn parse_location_ids(raw: &str) -> Result<Vec<u64>, CatalogError> {
    raw.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            s.trim().parse::<u64>().map_err(|_| {
                CatalogError::InvalidConfig(format!("bad location id: {}", s.trim()))
            })
        })
        .collect()
}
