//! # Catalog Client - HTTP Transport for the Shopify Admin API
//!
//! One thin client shared by every catalog operation: GraphQL queries and
//! mutations plus the one REST endpoint (inventory level set) that has no
//! GraphQL equivalent worth the ceremony.
//!
//! The client holds the credential and endpoint resolved at startup; all
//! higher modules ([`metaobjects`](crate::metaobjects),
//! [`variants`](crate::variants), [`inventory`](crate::inventory)) borrow it
//! per call and never touch the environment themselves.

use serde_json::{json, Value};
use tracing::debug;

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};

/// Header carrying the Admin API credential.
const TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// HTTP client for the Shopify Admin API.
///
/// Cheap to clone (reqwest clients share their connection pool), so the API
/// layer keeps one instance in shared state.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    config: CatalogConfig,
}

impl CatalogClient {
    /// Create a new catalog client from resolved configuration.
    pub fn new(config: CatalogConfig) -> CatalogResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { http, config })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Execute a GraphQL document against the Admin API.
    ///
    /// Returns the `data` object. A non-success HTTP status or a top-level
    /// `errors` array surfaces as a [`CatalogError`]; mutation-level
    /// `userErrors` are the caller's to inspect since their shape is
    /// operation-specific.
    pub async fn graphql(&self, query: &str) -> CatalogResult<Value> {
        let response = self
            .http
            .post(self.config.graphql_endpoint())
            .header(TOKEN_HEADER, &self.config.access_token)
            .json(&json!({ "query": query }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body: Value = response.json().await?;

        if let Some(errors) = body.get("errors").and_then(Value::as_array) {
            if !errors.is_empty() {
                let message = errors
                    .iter()
                    .filter_map(|e| e.get("message").and_then(Value::as_str))
                    .collect::<Vec<_>>()
                    .join("; ");
                return Err(CatalogError::GraphQL(message));
            }
        }

        debug!(endpoint = %self.config.graphql_endpoint(), "GraphQL call complete");

        body.get("data")
            .cloned()
            .ok_or_else(|| CatalogError::MissingData("no data object in response".to_string()))
    }

    /// POST a JSON body to an Admin REST endpoint.
    ///
    /// Used by the inventory backfill, which only needs ok/fail per call.
    pub async fn rest_post(&self, url: &str, body: &Value) -> CatalogResult<()> {
        let response = self
            .http
            .post(url)
            .header(TOKEN_HEADER, &self.config.access_token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        Ok(())
    }
}
