//! Read-only summary statistics over a fetched product set.

use std::collections::HashSet;

use kirana_core::Product;

/// Counts of products falling into the app's standard price bands.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PriceRanges {
    pub under_50: usize,
    pub from_50_to_100: usize,
    pub from_100_to_200: usize,
    pub over_200: usize,
}

#[derive(Debug)]
pub struct CatalogSummary {
    pub total_products: usize,
    pub available: usize,
    pub unavailable: usize,
    pub average_price: f64,
    pub average_mrp: f64,
    pub average_discount: f64,
    pub min_price: f64,
    pub max_price: f64,
    /// Distinct non-empty brand names.
    pub brand_count: usize,
    /// Distinct category slugs present in the set.
    pub category_count: usize,
    pub price_ranges: PriceRanges,
}

impl CatalogSummary {
    /// Computes the summary over `products`. Returns `None` for an empty
    /// set.
    #[must_use]
    pub fn from_products(products: &[Product]) -> Option<Self> {
        if products.is_empty() {
            return None;
        }

        let total = products.len();
        let available = products.iter().filter(|p| p.availability).count();

        let count = total as f64;
        let average_price = products.iter().map(|p| p.price).sum::<f64>() / count;
        let average_mrp = products.iter().map(|p| p.mrp).sum::<f64>() / count;
        let average_discount = products.iter().map(|p| p.discount_percent).sum::<f64>() / count;

        let min_price = products.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);
        let max_price = products
            .iter()
            .map(|p| p.price)
            .fold(f64::NEG_INFINITY, f64::max);

        let brands: HashSet<&str> = products
            .iter()
            .map(|p| p.brand.as_str())
            .filter(|b| !b.is_empty())
            .collect();
        let categories: HashSet<&str> = products.iter().map(|p| p.category.as_str()).collect();

        let mut price_ranges = PriceRanges::default();
        for p in products {
            if p.price < 50.0 {
                price_ranges.under_50 += 1;
            } else if p.price < 100.0 {
                price_ranges.from_50_to_100 += 1;
            } else if p.price < 200.0 {
                price_ranges.from_100_to_200 += 1;
            } else {
                price_ranges.over_200 += 1;
            }
        }

        Some(Self {
            total_products: total,
            available,
            unavailable: total - available,
            average_price,
            average_mrp,
            average_discount,
            min_price,
            max_price,
            brand_count: brands.len(),
            category_count: categories.len(),
            price_ranges,
        })
    }

    /// Renders the summary as the multi-line report printed after a run.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "Total products: {}\n\
             Available: {} | Unavailable: {}\n\
             Average price: {:.2} (MRP {:.2}, discount {:.1}%)\n\
             Price range: {:.2} - {:.2}\n\
             Price bands: <50: {} | 50-100: {} | 100-200: {} | >200: {}\n\
             Brands: {} | Categories: {}",
            self.total_products,
            self.available,
            self.unavailable,
            self.average_price,
            self.average_mrp,
            self.average_discount,
            self.min_price,
            self.max_price,
            self.price_ranges.under_50,
            self.price_ranges.from_50_to_100,
            self.price_ranges.from_100_to_200,
            self.price_ranges.over_200,
            self.brand_count,
            self.category_count,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_product(price: f64, mrp: f64, brand: &str, category: &str, available: bool) -> Product {
        Product {
            product_id: format!("p-{price}"),
            name: "Test".to_string(),
            brand: brand.to_string(),
            price,
            mrp,
            discount_percent: Product::discount_percent(price, mrp),
            weight: String::new(),
            unit: String::new(),
            availability: available,
            image_url: None,
            category: category.to_string(),
            subcategory: None,
            rating: None,
            review_count: 0,
            tags: Vec::new(),
            scraped_at: Utc::now(),
        }
    }

    #[test]
    fn empty_set_has_no_summary() {
        assert!(CatalogSummary::from_products(&[]).is_none());
    }

    #[test]
    fn totals_and_availability() {
        let products = vec![
            make_product(40.0, 50.0, "A", "fruits", true),
            make_product(60.0, 60.0, "B", "fruits", false),
        ];
        let summary = CatalogSummary::from_products(&products).unwrap();
        assert_eq!(summary.total_products, 2);
        assert_eq!(summary.available, 1);
        assert_eq!(summary.unavailable, 1);
    }

    #[test]
    fn price_statistics() {
        let products = vec![
            make_product(40.0, 50.0, "A", "fruits", true),
            make_product(60.0, 80.0, "B", "fruits", true),
        ];
        let summary = CatalogSummary::from_products(&products).unwrap();
        assert!((summary.average_price - 50.0).abs() < f64::EPSILON);
        assert!((summary.average_mrp - 65.0).abs() < f64::EPSILON);
        assert!((summary.min_price - 40.0).abs() < f64::EPSILON);
        assert!((summary.max_price - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn price_bands() {
        let products = vec![
            make_product(10.0, 10.0, "A", "fruits", true),
            make_product(50.0, 50.0, "A", "fruits", true),
            make_product(150.0, 150.0, "A", "fruits", true),
            make_product(200.0, 200.0, "A", "fruits", true),
            make_product(999.0, 999.0, "A", "fruits", true),
        ];
        let summary = CatalogSummary::from_products(&products).unwrap();
        assert_eq!(
            summary.price_ranges,
            PriceRanges {
                under_50: 1,
                from_50_to_100: 1,
                from_100_to_200: 1,
                over_200: 2,
            }
        );
    }

    #[test]
    fn empty_brands_are_not_counted() {
        let products = vec![
            make_product(10.0, 10.0, "", "fruits", true),
            make_product(20.0, 20.0, "Nandini", "dairy", true),
            make_product(30.0, 30.0, "Nandini", "dairy", true),
        ];
        let summary = CatalogSummary::from_products(&products).unwrap();
        assert_eq!(summary.brand_count, 1);
        assert_eq!(summary.category_count, 2);
    }

    #[test]
    fn render_mentions_key_figures() {
        let products = vec![make_product(40.0, 50.0, "A", "fruits", true)];
        let rendered = CatalogSummary::from_products(&products).unwrap().render();
        assert!(rendered.contains("Total products: 1"));
        assert!(rendered.contains("discount 20.0%"));
    }
}
