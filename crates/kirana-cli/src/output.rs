//! CSV and JSON serializers for fetched product sets.
//!
//! Files are written per category as `kirana_<slug>_<timestamp>.{csv,json}`
//! in the configured output directory. The CSV column set is the flat
//! export schema; `tags` is JSON-only since CSV rows are scalar.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;

use kirana_core::Product;

/// One flat CSV row. Field order defines the column order:
/// `product_id,name,brand,price,mrp,discount_percent,weight,unit,availability,image_url,category,rating,review_count,scraped_at`
#[derive(Debug, Serialize)]
struct CsvRecord<'a> {
    product_id: &'a str,
    name: &'a str,
    brand: &'a str,
    price: f64,
    mrp: f64,
    discount_percent: f64,
    weight: &'a str,
    unit: &'a str,
    availability: bool,
    image_url: Option<&'a str>,
    category: &'a str,
    rating: Option<f64>,
    review_count: u32,
    scraped_at: DateTime<Utc>,
}

impl<'a> From<&'a Product> for CsvRecord<'a> {
    fn from(p: &'a Product) -> Self {
        Self {
            product_id: &p.product_id,
            name: &p.name,
            brand: &p.brand,
            price: p.price,
            mrp: p.mrp,
            discount_percent: p.discount_percent,
            weight: &p.weight,
            unit: &p.unit,
            availability: p.availability,
            image_url: p.image_url.as_deref(),
            category: &p.category,
            rating: p.rating,
            review_count: p.review_count,
            scraped_at: p.scraped_at,
        }
    }
}

/// Builds the per-category output filename stem, e.g.
/// `kirana_fruits_20260830_142501`.
#[must_use]
pub fn file_stem(category: &str, at: DateTime<Utc>) -> String {
    format!("kirana_{category}_{}", at.format("%Y%m%d_%H%M%S"))
}

/// Writes `products` as CSV with a header row.
///
/// # Errors
///
/// Returns an error when the file cannot be created or a row fails to
/// serialize.
pub fn write_csv(products: &[Product], path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create CSV file {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));

    for product in products {
        writer
            .serialize(CsvRecord::from(product))
            .with_context(|| format!("failed to write CSV row for {}", product.product_id))?;
    }

    writer.flush().context("failed to flush CSV writer")?;
    tracing::info!(path = %path.display(), rows = products.len(), "wrote CSV output");
    Ok(())
}

/// Writes `products` as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error when the file cannot be created or serialization fails.
pub fn write_json(products: &[Product], path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create JSON file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, products).context("failed to serialize products")?;
    writer.flush().context("failed to flush JSON writer")?;
    tracing::info!(path = %path.display(), count = products.len(), "wrote JSON output");
    Ok(())
}

/// Output path for a category file with the given extension.
#[must_use]
pub fn output_path(dir: &Path, category: &str, at: DateTime<Utc>, extension: &str) -> PathBuf {
    dir.join(format!("{}.{extension}", file_stem(category, at)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_product(id: &str) -> Product {
        Product {
            product_id: id.to_string(),
            name: "Alphonso Mango".to_string(),
            brand: "Ratnagiri Farms".to_string(),
            price: 80.0,
            mrp: 100.0,
            discount_percent: 20.0,
            weight: "1".to_string(),
            unit: "kg".to_string(),
            availability: true,
            image_url: None,
            category: "fruits".to_string(),
            subcategory: None,
            rating: Some(4.3),
            review_count: 87,
            tags: vec!["seasonal".to_string()],
            scraped_at: Utc.with_ymd_and_hms(2026, 8, 30, 14, 25, 1).unwrap(),
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("kirana-output-test-{}-{name}", std::process::id()))
    }

    #[test]
    fn file_stem_embeds_category_and_timestamp() {
        let at = Utc.with_ymd_and_hms(2026, 8, 30, 14, 25, 1).unwrap();
        assert_eq!(file_stem("fruits", at), "kirana_fruits_20260830_142501");
    }

    #[test]
    fn csv_has_expected_header_and_rows() {
        let path = temp_path("rows.csv");
        write_csv(&[make_product("p-1"), make_product("p-2")], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some(
                "product_id,name,brand,price,mrp,discount_percent,weight,unit,availability,\
                 image_url,category,rating,review_count,scraped_at"
            )
        );
        assert_eq!(lines.clone().count(), 2);
        let first = lines.next().unwrap();
        assert!(first.starts_with("p-1,Alphonso Mango,Ratnagiri Farms,80.0,100.0,20.0,1,kg,true"));
    }

    #[test]
    fn empty_image_url_serializes_as_empty_cell() {
        let path = temp_path("none.csv");
        write_csv(&[make_product("p-1")], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let row = content.lines().nth(1).unwrap();
        assert!(row.contains(",true,,fruits,"), "expected empty image_url cell in: {row}");
    }

    #[test]
    fn json_roundtrips_products() {
        let path = temp_path("products.json");
        write_json(&[make_product("p-1")], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let decoded: Vec<Product> = serde_json::from_str(&content).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].product_id, "p-1");
        assert_eq!(decoded[0].tags, vec!["seasonal"]);
    }
}
