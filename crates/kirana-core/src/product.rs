use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog product normalized from one raw backend item, immutable once
/// created.
///
/// Field names match the CSV/JSON output columns, so the struct serializes
/// directly through `csv::Writer` and `serde_json` without renames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Backend product ID, stored as a string to avoid precision loss.
    pub product_id: String,
    pub name: String,
    /// Brand name; empty string when the backend omits it.
    #[serde(default)]
    pub brand: String,
    /// Selling price in the store currency.
    pub price: f64,
    /// Maximum retail price (the pre-discount list price).
    pub mrp: f64,
    /// Derived: `round(100 * (mrp - price) / mrp, 1)` when `mrp > 0`, else 0.
    pub discount_percent: f64,
    /// Numeric part of the pack quantity, kept as a string (`"1"`, `"500"`).
    #[serde(default)]
    pub weight: String,
    /// Unit part of the pack quantity (`"kg"`, `"g"`, `"ml"`).
    #[serde(default)]
    pub unit: String,
    /// Whether the item is currently orderable at the configured location.
    pub availability: bool,
    pub image_url: Option<String>,
    /// The category slug this product was fetched under.
    pub category: String,
    pub subcategory: Option<String>,
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Wall-clock time at which the raw item was normalized.
    pub scraped_at: DateTime<Utc>,
}

impl Product {
    /// Discount percentage for a price/MRP pair, rounded to one decimal
    /// place. Zero when `mrp` is zero (no list price to discount against).
    #[must_use]
    pub fn discount_percent(price: f64, mrp: f64) -> f64 {
        if mrp > 0.0 {
            (100.0 * (mrp - price) / mrp * 10.0).round() / 10.0
        } else {
            0.0
        }
    }
}
