//! # Variant Creation - the Catalog Sync Collaborator
//!
//! Materializes a computed price as a catalog record: one dynamically
//! created product variant on the custom-canvas product, carrying the final
//! price and a human-readable size/material option value.
//!
//! Failure here is a catalog failure, never a pricing failure - the price
//! was already computed and can still be returned to the caller.

use serde_json::Value;
use tracing::info;

use crate::client::CatalogClient;
use crate::error::{CatalogError, CatalogResult};

/// GID prefix the catalog puts in front of numeric variant ids.
const VARIANT_GID_PREFIX: &str = "gid://shopify/ProductVariant/";

/// A variant created in the catalog for one priced configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedVariant {
    /// Numeric variant id with the gid prefix stripped, as the storefront
    /// cart API expects it.
    pub variant_id: String,
    /// Price as echoed back by the catalog.
    pub price: String,
    /// Variant title as built by the catalog from the option value.
    pub title: String,
}

/// Create a variant carrying the computed price.
///
/// The option value encodes the full configuration
/// (`"120x240 1,7x2,8 320gr Pamuk"`) so staff can read an order at a
/// glance. `REMOVE_STANDALONE_VARIANT` keeps the product's placeholder
/// default variant from lingering next to real ones.
pub async fn create_priced_variant(
    client: &CatalogClient,
    price: f64,
    width_cm: i64,
    height_cm: i64,
    frame_name: &str,
    fabric_name: &str,
) -> CatalogResult<CreatedVariant> {
    let option_value = format!("{width_cm}x{height_cm} {frame_name} {fabric_name}");
    let mutation = format!(
        r#"mutation {{
  productVariantsBulkCreate(
    productId: "{product}",
    strategy: REMOVE_STANDALONE_VARIANT,
    variants: [{{
      price: "{price:.2}",
      optionValues: [{{ optionName: "Ebat", name: "{name}" }}],
      inventoryPolicy: CONTINUE
    }}]
  ) {{
    productVariants {{ id title price }}
    userErrors {{ field message }}
  }}
}}"#,
        product = escape(&client.config().custom_product_gid),
        name = escape(&option_value),
    );

    let data = client.graphql(&mutation).await?;
    let variant = parse_variant_response(&data)?;

    info!(
        variant_id = %variant.variant_id,
        price = %variant.price,
        option = %option_value,
        "Created priced variant"
    );

    Ok(variant)
}

/// Parse the `productVariantsBulkCreate` payload.
///
/// A non-empty `userErrors` array wins over any returned variant: the
/// catalog may echo partial data alongside the rejection.
pub fn parse_variant_response(data: &Value) -> CatalogResult<CreatedVariant> {
    let payload = data
        .get("productVariantsBulkCreate")
        .ok_or_else(|| CatalogError::MissingData("productVariantsBulkCreate".to_string()))?;

    if let Some(errors) = payload.get("userErrors").and_then(Value::as_array) {
        if let Some(first) = errors.first() {
            let message = first
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown user error");
            return Err(CatalogError::UserError(message.to_string()));
        }
    }

    let variant = payload
        .get("productVariants")
        .and_then(Value::as_array)
        .and_then(|v| v.first())
        .ok_or_else(|| CatalogError::MissingData("no variant returned".to_string()))?;

    let gid = variant
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| CatalogError::MissingData("variant id".to_string()))?;

    Ok(CreatedVariant {
        variant_id: gid.trim_start_matches(VARIANT_GID_PREFIX).to_string(),
        price: variant
            .get("price")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        title: variant
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

/// Escape a value for embedding in a GraphQL string literal. Frame names
/// contain commas and the catalog stores some display names with quotes.
fn escape(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_created_variant() {
        let data = json!({
            "productVariantsBulkCreate": {
                "productVariants": [{
                    "id": "gid://shopify/ProductVariant/5544332211",
                    "title": "120x240 1,7x2,8 320gr Pamuk",
                    "price": "508.00"
                }],
                "userErrors": []
            }
        });

        let variant = parse_variant_response(&data).unwrap();
        assert_eq!(variant.variant_id, "5544332211");
        assert_eq!(variant.price, "508.00");
        assert_eq!(variant.title, "120x240 1,7x2,8 320gr Pamuk");
    }

    #[test]
    fn test_user_errors_win_over_returned_variants() {
        let data = json!({
            "productVariantsBulkCreate": {
                "productVariants": [{ "id": "gid://shopify/ProductVariant/1" }],
                "userErrors": [
                    { "field": "optionValues", "message": "option value already exists" }
                ]
            }
        });

        let err = parse_variant_response(&data).unwrap_err();
        assert!(matches!(err, CatalogError::UserError(ref m) if m == "option value already exists"));
    }

    #[test]
    fn test_missing_variant_is_missing_data() {
        let data = json!({
            "productVariantsBulkCreate": {
                "productVariants": [],
                "userErrors": []
            }
        });
        let err = parse_variant_response(&data).unwrap_err();
        assert!(matches!(err, CatalogError::MissingData(_)));
    }

    #[test]
    fn test_escape_quotes() {
        assert_eq!(escape(r#"1,7x2,8 "lüks""#), r#"1,7x2,8 \"lüks\""#);
    }
}
