//! HTTP session for the catalog API's paginated product listing endpoint.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;

use kirana_core::{AppConfig, Location, ResponseShape};

use crate::error::CatalogError;
use crate::types::RawPage;

/// Connection settings for a [`CatalogClient`], grouped so construction
/// stays a single validated step rather than a parade of scalars.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// API root including any version prefix, e.g.
    /// `https://api.kiranaapp.example/v2`. The products path is appended.
    pub base_url: String,
    pub location: Location,
    pub user_agent: String,
    /// `app-version` header value the backend expects from mobile clients.
    pub app_version: String,
    /// `platform` header value (`android` / `ios`).
    pub platform: String,
    pub timeout_secs: u64,
    pub shape: ResponseShape,
}

impl SessionSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            location: config.location,
            user_agent: config.user_agent.clone(),
            app_version: config.app_version.clone(),
            platform: config.platform.clone(),
            timeout_secs: config.request_timeout_secs,
            shape: config.response_shape.clone(),
        }
    }
}

/// Owns the persistent HTTP connection state, the default headers the
/// backend requires, and the location the catalog is scoped to.
///
/// `fetch_page` sends exactly one request per invocation; retrying is the
/// paginator's concern, and inter-request spacing is the rate limiter's.
pub struct CatalogClient {
    client: Client,
    base_url: String,
    location: Location,
    shape: ResponseShape,
}

impl CatalogClient {
    /// Creates a `CatalogClient` with configured timeout and default headers
    /// (`User-Agent`, `accept`, `app-version`, `platform`).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Transport`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(settings: &SessionSettings) -> Result<Self, CatalogError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Ok(value) = HeaderValue::from_str(&settings.app_version) {
            headers.insert("app-version", value);
        }
        if let Ok(value) = HeaderValue::from_str(&settings.platform) {
            headers.insert("platform", value);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&settings.user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            location: settings.location,
            shape: settings.shape.clone(),
        })
    }

    /// Fetches one page of products for a category.
    ///
    /// Builds the request from the category id, the session's location, the
    /// page size, and an optional cursor, then interprets the JSON envelope
    /// through the configured [`ResponseShape`].
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Transport`]: connection-level failure.
    /// - [`CatalogError::Status`]: any non-2xx response.
    /// - [`CatalogError::Deserialize`]: body is not valid JSON.
    /// - [`CatalogError::MalformedResponse`]: JSON lacks the items field.
    pub async fn fetch_page(
        &self,
        category_id: &str,
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<RawPage, CatalogError> {
        let url = self.products_url(category_id, cursor, page_size)?;

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let parsed =
            serde_json::from_str::<serde_json::Value>(&body).map_err(|e| {
                CatalogError::Deserialize {
                    context: format!("products page for category {category_id}"),
                    source: e,
                }
            })?;

        RawPage::from_body(parsed, &self.shape, &url)
    }

    /// Builds the products URL for the given category, cursor, and page
    /// size. Query values go through `reqwest::Url` so cursors are always
    /// percent-encoded.
    fn products_url(
        &self,
        category_id: &str,
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<String, CatalogError> {
        let base = format!("{}/products", self.base_url);
        let mut url = reqwest::Url::parse(&base).map_err(|e| CatalogError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;

        url.query_pairs_mut()
            .append_pair("category_id", category_id)
            .append_pair("latitude", &self.location.latitude.to_string())
            .append_pair("longitude", &self.location.longitude.to_string())
            .append_pair("limit", &page_size.to_string());

        if let Some(cursor) = cursor {
            url.query_pairs_mut().append_pair("cursor", cursor);
        }

        Ok(url.to_string())
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
