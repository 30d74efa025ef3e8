//! Multi-category fetch orchestration.
//!
//! Drives one [`Paginator`] per requested category, normalizes every raw
//! item, and isolates failures: a malformed item is skipped with a log
//! entry, and a category whose pagination dies terminally is recorded in
//! the manifest while the run continues with the next category. The only
//! hard failure of `fetch` is an empty category list.

use chrono::Utc;
use futures::stream::{self, StreamExt};

use kirana_core::{AppConfig, Category, Product};

use crate::client::{CatalogClient, SessionSettings};
use crate::error::CatalogError;
use crate::normalize::normalize_item;
use crate::pagination::Paginator;
use crate::rate_limit::RateLimiter;
use crate::retry::RetryPolicy;

use std::time::Duration;

/// Per-category outcome for a fetch run's manifest.
#[derive(Debug, Clone)]
pub struct CategoryReport {
    pub category: String,
    /// Products successfully normalized.
    pub fetched: usize,
    /// Items skipped because they were malformed.
    pub skipped: usize,
    /// Pages retrieved before the category ended (or failed).
    pub pages: usize,
    /// Terminal error message, when the category did not finish cleanly.
    /// Products gathered before the failure are kept.
    pub error: Option<String>,
}

/// Everything a fetch run produced: the accumulated products and the
/// per-category manifest handed to serializers and the analyzer.
#[derive(Debug)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub manifest: Vec<CategoryReport>,
}

pub struct CatalogFetcher {
    client: CatalogClient,
    limiter: RateLimiter,
    retry: RetryPolicy,
    page_size: u32,
    max_pages: usize,
    max_concurrent: usize,
}

impl CatalogFetcher {
    /// Builds a fetcher from the application config: one shared client, one
    /// shared rate limiter (the backend throttles account-wide), one retry
    /// policy.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Transport`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: &AppConfig) -> Result<Self, CatalogError> {
        let client = CatalogClient::new(&SessionSettings::from_config(config))?;
        Ok(Self::from_parts(
            client,
            RateLimiter::new(Duration::from_millis(config.min_request_interval_ms)),
            RetryPolicy::new(
                config.max_attempts,
                Duration::from_secs(config.retry_base_delay_secs),
            ),
            config.page_size,
            config.max_pages,
            config.max_concurrent_categories,
        ))
    }

    /// Assembles a fetcher from already-built parts. Used by tests and by
    /// callers that need a non-default client.
    #[must_use]
    pub fn from_parts(
        client: CatalogClient,
        limiter: RateLimiter,
        retry: RetryPolicy,
        page_size: u32,
        max_pages: usize,
        max_concurrent: usize,
    ) -> Self {
        Self {
            client,
            limiter,
            retry,
            page_size,
            max_pages,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Fetches and normalizes every requested category.
    ///
    /// Categories run sequentially by default, or up to
    /// `max_concurrent_categories` at a time; either way the returned
    /// products and manifest follow the requested category order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NoCategories`] when `categories` is empty.
    /// Per-category and per-item failures never escape as errors; they are
    /// logged and recorded in the manifest.
    pub async fn fetch(&self, categories: &[Category]) -> Result<Catalog, CatalogError> {
        if categories.is_empty() {
            return Err(CatalogError::NoCategories);
        }

        let mut per_category: Vec<(usize, Vec<Product>, CategoryReport)> =
            stream::iter(categories.iter().enumerate())
                .map(|(index, category)| async move {
                    let (products, report) = self.fetch_category(category).await;
                    (index, products, report)
                })
                .buffer_unordered(self.max_concurrent)
                .collect()
                .await;
        per_category.sort_by_key(|(index, _, _)| *index);

        let mut catalog = Catalog {
            products: Vec::new(),
            manifest: Vec::new(),
        };
        for (_, products, report) in per_category {
            catalog.products.extend(products);
            catalog.manifest.push(report);
        }
        Ok(catalog)
    }

    /// Drains one category's paginator, normalizing as pages arrive.
    async fn fetch_category(&self, category: &Category) -> (Vec<Product>, CategoryReport) {
        let mut paginator = Paginator::new(
            &self.client,
            &self.limiter,
            &self.retry,
            &category.slug,
            &category.id,
            self.page_size,
            self.max_pages,
        );

        let mut products = Vec::new();
        let mut skipped = 0usize;
        let mut error = None;

        loop {
            match paginator.next_page().await {
                Ok(Some(items)) => {
                    for item in &items {
                        match normalize_item(item, &category.slug, Utc::now()) {
                            Ok(product) => products.push(product),
                            Err(e) => {
                                skipped += 1;
                                tracing::warn!(
                                    category = %category.slug,
                                    error = %e,
                                    "skipping malformed item"
                                );
                            }
                        }
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(
                        category = %category.slug,
                        error = %e,
                        "category fetch failed, keeping partial results"
                    );
                    error = Some(e.to_string());
                    break;
                }
            }
        }

        tracing::info!(
            category = %category.slug,
            fetched = products.len(),
            skipped,
            pages = paginator.pages_fetched(),
            "category complete"
        );

        let report = CategoryReport {
            category: category.slug.clone(),
            fetched: products.len(),
            skipped,
            pages: paginator.pages_fetched(),
            error,
        };
        (products, report)
    }
}
