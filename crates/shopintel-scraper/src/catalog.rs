//! Product catalog extraction from a storefront's public `products.json`.
//!
//! ## Observed shape
//!
//! ```json
//! {"products": [{"id": 6789012345678, "title": "...", "handle": "...",
//!                "body_html": "<p>...</p>", "variants": [{"price": "30.00"}]}]}
//! ```
//!
//! `id` is numeric on Shopify but some proxies re-serialize it as a string,
//! and `price` has been seen as both a decimal string and a bare number. All
//! scalar fields are therefore read leniently: strings pass through, numbers
//! and booleans are stringified, anything else reads as absent.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use shopintel_core::Product;

use crate::client::StoreUrl;

/// Top-level response from `GET /products.json`. Items are decoded one at a
/// time so a single odd item cannot empty the whole catalog.
#[derive(Debug, Deserialize)]
struct CatalogResponse {
    #[serde(default)]
    products: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct CatalogItem {
    #[serde(default, deserialize_with = "lenient_string")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    title: Option<String>,
    /// URL slug for the product page.
    #[serde(default, deserialize_with = "lenient_string")]
    handle: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    body_html: Option<String>,
    /// Price of the first variant. Anything but a list whose head is an
    /// object reads as absent.
    #[serde(
        default,
        rename = "variants",
        deserialize_with = "first_variant_price"
    )]
    price: Option<String>,
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(scalar_to_string))
}

fn first_variant_price<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(Value::Array(variants)) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(variants
        .into_iter()
        .next()
        .and_then(|mut variant| variant.get_mut("price").map(Value::take))
        .and_then(scalar_to_string))
}

/// Maps a `products.json` body into catalog products.
///
/// A body that is not a JSON object with a `products` array yields an empty
/// catalog, and array entries that are not objects are skipped. Within an
/// item, a missing or malformed title, price, or description reads as `""`;
/// a missing handle leaves `url` unset.
#[must_use]
pub fn catalog_from_json(root: &StoreUrl, body: &str) -> Vec<Product> {
    let response = match serde_json::from_str::<CatalogResponse>(body) {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(store_url = %root, error = %e, "products.json did not parse; catalog left empty");
            return Vec::new();
        }
    };

    response
        .products
        .into_iter()
        .filter_map(|value| match CatalogItem::deserialize(value) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::debug!(store_url = %root, error = %e, "skipping non-object catalog entry");
                None
            }
        })
        .map(|item| {
            let url = item
                .handle
                .filter(|h| !h.trim().is_empty())
                .map(|h| root.join_path(&format!("/products/{h}")));

            Product {
                id: item.id,
                title: item.title.unwrap_or_default(),
                price: Some(item.price.unwrap_or_default()),
                description: Some(item.body_html.unwrap_or_default()),
                url,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> StoreUrl {
        StoreUrl::parse("https://memy.co.in").unwrap()
    }

    #[test]
    fn maps_full_item() {
        let body = r#"{"products":[{"id":6789012345678,"title":"Linen Shirt","handle":"linen-shirt",
            "body_html":"<p>Breathable &amp; light</p>","variants":[{"price":"1299.00"},{"price":"1499.00"}]}]}"#;
        let products = catalog_from_json(&root(), body);
        assert_eq!(
            products,
            vec![Product {
                id: Some("6789012345678".to_string()),
                title: "Linen Shirt".to_string(),
                price: Some("1299.00".to_string()),
                description: Some("<p>Breathable &amp; light</p>".to_string()),
                url: Some("https://memy.co.in/products/linen-shirt".to_string()),
            }]
        );
    }

    #[test]
    fn missing_fields_degrade_to_empty_strings() {
        let body = r#"{"products":[{"variants":[]}]}"#;
        let products = catalog_from_json(&root(), body);
        assert_eq!(products.len(), 1);
        let p = &products[0];
        assert_eq!(p.id, None);
        assert_eq!(p.title, "");
        assert_eq!(p.price.as_deref(), Some(""));
        assert_eq!(p.description.as_deref(), Some(""));
        assert_eq!(p.url, None);
    }

    #[test]
    fn numeric_price_and_null_variants_are_tolerated() {
        let body = r#"{"products":[
            {"id":"a1","title":"Cap","handle":"cap","variants":[{"price":25}]},
            {"id":2,"title":"Tote","handle":"tote","variants":null,"body_html":null}
        ]}"#;
        let products = catalog_from_json(&root(), body);
        assert_eq!(products[0].id.as_deref(), Some("a1"));
        assert_eq!(products[0].price.as_deref(), Some("25"));
        assert_eq!(products[1].price.as_deref(), Some(""));
        assert_eq!(products[1].description.as_deref(), Some(""));
    }

    #[test]
    fn malformed_variants_only_blank_that_item() {
        let body = r#"{"products":[
            {"id":1,"title":"Good","handle":"good","variants":[{"price":"10.00"}]},
            {"id":2,"title":"Odd","handle":"odd","variants":"n/a"},
            {"id":3,"title":"Nulls","handle":"nulls","variants":[null]},
            {"id":4,"title":"Bare","handle":"bare","variants":[1]},
            {"id":5,"title":"Nested","handle":"nested","variants":[{"price":{"amount":"9"}}]}
        ]}"#;
        let products = catalog_from_json(&root(), body);
        assert_eq!(products.len(), 5);
        assert_eq!(products[0].price.as_deref(), Some("10.00"));
        for p in &products[1..] {
            assert_eq!(p.price.as_deref(), Some(""), "price of {}", p.title);
            assert!(p.url.is_some());
        }
    }

    #[test]
    fn non_object_entries_are_skipped_alongside_good_items() {
        let body = r#"{"products":[1,{"title":"Kept"},"x",null]}"#;
        let titles: Vec<_> = catalog_from_json(&root(), body)
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, ["Kept"]);
    }

    #[test]
    fn missing_products_key_yields_empty_catalog() {
        assert!(catalog_from_json(&root(), r#"{"collections":[]}"#).is_empty());
    }

    #[test]
    fn malformed_bodies_yield_empty_catalog() {
        for body in [
            "",
            "<html>not json</html>",
            "[1,2,3]",
            r#"{"products":"nope"}"#,
            r#"{"products":[1,2]}"#,
        ] {
            assert!(
                catalog_from_json(&root(), body).is_empty(),
                "expected empty catalog for {body:?}"
            );
        }
    }

    #[test]
    fn preserves_catalog_order() {
        let body = r#"{"products":[{"title":"A"},{"title":"B"},{"title":"C"}]}"#;
        let titles: Vec<_> = catalog_from_json(&root(), body)
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, ["A", "B", "C"]);
    }
}
