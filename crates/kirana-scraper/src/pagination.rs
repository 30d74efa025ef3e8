//! Pull-based page traversal for one category.
//!
//! A [`Paginator`] is a finite, non-restartable sequence of pages: each
//! `next_page` call spaces itself through the rate limiter, fetches one page
//! through the retry policy, and yields the page's raw items in backend
//! order. Nothing is fetched ahead of the caller's pulls.

use serde_json::Value;

use crate::client::CatalogClient;
use crate::error::CatalogError;
use crate::rate_limit::RateLimiter;
use crate::retry::RetryPolicy;

pub struct Paginator<'a> {
    client: &'a CatalogClient,
    limiter: &'a RateLimiter,
    retry: &'a RetryPolicy,
    /// Backend category id used in requests.
    category_id: String,
    /// Category slug, used only for log and error context.
    category: String,
    page_size: u32,
    max_pages: usize,
    cursor: Option<String>,
    pages_fetched: usize,
    done: bool,
}

impl<'a> Paginator<'a> {
    #[must_use]
    pub fn new(
        client: &'a CatalogClient,
        limiter: &'a RateLimiter,
        retry: &'a RetryPolicy,
        category: &str,
        category_id: &str,
        page_size: u32,
        max_pages: usize,
    ) -> Self {
        Self {
            client,
            limiter,
            retry,
            category_id: category_id.to_string(),
            category: category.to_string(),
            page_size,
            max_pages,
            cursor: None,
            pages_fetched: 0,
            done: false,
        }
    }

    /// Number of pages fetched so far.
    #[must_use]
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Pulls the next page of raw items, or `Ok(None)` once the category is
    /// exhausted. After any error, or after exhaustion, every subsequent
    /// call returns `Ok(None)`; the sequence is not restartable.
    ///
    /// Traversal stops when the backend reports no more pages, when it
    /// stops supplying a cursor, or when `max_pages` is reached (logged as
    /// a warning; already-yielded pages remain valid partial results).
    ///
    /// # Errors
    ///
    /// - Any terminal error from the page fetch, after retry exhaustion.
    /// - [`CatalogError::PaginationLoop`] when the backend returns the same
    ///   cursor twice in a row, which would otherwise loop forever.
    pub async fn next_page(&mut self) -> Result<Option<Vec<Value>>, CatalogError> {
        if self.done {
            return Ok(None);
        }

        if self.pages_fetched >= self.max_pages {
            tracing::warn!(
                category = %self.category,
                max_pages = self.max_pages,
                "page cap reached, returning partial results for category"
            );
            self.done = true;
            return Ok(None);
        }

        self.limiter.wait().await;

        let client = self.client;
        let retry = self.retry;
        let category_id = self.category_id.clone();
        let cursor = self.cursor.clone();
        let page_size = self.page_size;

        let fetch = retry.run(|| {
            let category_id = category_id.clone();
            let cursor = cursor.clone();
            async move {
                client
                    .fetch_page(&category_id, cursor.as_deref(), page_size)
                    .await
            }
        });

        let page = match fetch.await {
            Ok(page) => page,
            Err(err) => {
                self.done = true;
                return Err(err);
            }
        };

        self.pages_fetched += 1;
        tracing::debug!(
            category = %self.category,
            page = self.pages_fetched,
            items = page.items.len(),
            has_more = page.has_more,
            "fetched catalog page"
        );

        if page.has_more {
            match page.next_cursor {
                Some(next) if self.cursor.as_deref() == Some(next.as_str()) => {
                    self.done = true;
                    return Err(CatalogError::PaginationLoop {
                        category: self.category.clone(),
                        cursor: next,
                    });
                }
                Some(next) => self.cursor = Some(next),
                None => {
                    // has_more without a cursor: nothing to request next,
                    // treat the category as exhausted.
                    tracing::warn!(
                        category = %self.category,
                        "backend reported more pages but sent no cursor, stopping"
                    );
                    self.done = true;
                }
            }
        } else {
            self.done = true;
        }

        Ok(Some(page.items))
    }
}
