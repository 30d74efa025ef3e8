//! Normalization from raw catalog items to [`kirana_core::Product`].
//!
//! ## Observed item shape from the live app
//!
//! - `id`: string or number; the backend mixes both across categories.
//! - `price` / `mrp`: usually numbers, but some categories return decimal
//!   strings (`"45.50"`). Both forms are coerced.
//! - `quantity`: combined pack string (`"1 kg"`); older responses carry
//!   separate `weight` and `unit` fields instead.
//! - `in_stock`: boolean; some responses carry a numeric `stock_count`
//!   instead. When neither is present, the item is treated as unavailable.
//! - `tags`: array of strings; non-string entries are dropped.

use chrono::{DateTime, Utc};
use serde_json::Value;

use kirana_core::Product;

use crate::error::CatalogError;
use crate::parse::split_quantity;

/// Normalizes one raw catalog item into a [`Product`]. Pure: no I/O, no
/// mutable state; `scraped_at` is passed in by the caller.
///
/// # Errors
///
/// Returns [`CatalogError::MalformedItem`] when the item lacks a product id
/// or name, when `price`/`mrp` are missing or not coercible to a number, or
/// when either is negative.
pub fn normalize_item(
    raw: &Value,
    category: &str,
    scraped_at: DateTime<Utc>,
) -> Result<Product, CatalogError> {
    let product_id = id_field(raw).ok_or_else(|| CatalogError::MalformedItem {
        product_id: None,
        reason: "missing product id".to_string(),
    })?;

    let name = str_field(raw, "name").ok_or_else(|| CatalogError::MalformedItem {
        product_id: Some(product_id.clone()),
        reason: "missing name".to_string(),
    })?;

    let price = required_number(raw, "price", &product_id)?;
    let mrp = required_number(raw, "mrp", &product_id)?;

    let (weight, unit) = weight_and_unit(raw);

    Ok(Product {
        discount_percent: Product::discount_percent(price, mrp),
        product_id,
        name,
        brand: str_field(raw, "brand").unwrap_or_default(),
        price,
        mrp,
        weight,
        unit,
        availability: availability(raw),
        image_url: str_field(raw, "image_url"),
        category: category.to_string(),
        subcategory: str_field(raw, "subcategory"),
        rating: number_field(raw, "rating"),
        review_count: raw
            .get("review_count")
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0),
        tags: tags_field(raw),
        scraped_at,
    })
}

/// Product id as a string, accepting both string and numeric ids.
fn id_field(raw: &Value) -> Option<String> {
    match raw.get("id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Non-empty string field, or `None`.
fn str_field(raw: &Value, name: &str) -> Option<String> {
    raw.get(name)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Numeric field coerced from a JSON number or a numeric string.
fn number_field(raw: &Value, name: &str) -> Option<f64> {
    match raw.get(name)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn required_number(raw: &Value, name: &str, product_id: &str) -> Result<f64, CatalogError> {
    let value = number_field(raw, name).ok_or_else(|| CatalogError::MalformedItem {
        product_id: Some(product_id.to_string()),
        reason: format!("missing or non-numeric {name}"),
    })?;
    if value < 0.0 {
        return Err(CatalogError::MalformedItem {
            product_id: Some(product_id.to_string()),
            reason: format!("negative {name}: {value}"),
        });
    }
    Ok(value)
}

/// Pack size from the combined `quantity` string, falling back to separate
/// `weight`/`unit` fields. Empty strings when neither form is present.
fn weight_and_unit(raw: &Value) -> (String, String) {
    if let Some((weight, unit)) = raw
        .get("quantity")
        .and_then(Value::as_str)
        .and_then(split_quantity)
    {
        return (weight, unit);
    }

    (
        str_field(raw, "weight").unwrap_or_default(),
        str_field(raw, "unit").unwrap_or_default(),
    )
}

/// Availability from `in_stock`, or from `stock_count > 0` when only a
/// count is given. Absent both, the item is treated as unavailable.
fn availability(raw: &Value) -> bool {
    if let Some(in_stock) = raw.get("in_stock").and_then(Value::as_bool) {
        return in_stock;
    }
    if let Some(count) = raw.get("stock_count").and_then(Value::as_i64) {
        return count > 0;
    }
    false
}

fn tags_field(raw: &Value) -> Vec<String> {
    raw.get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}
