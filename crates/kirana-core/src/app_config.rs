use std::path::PathBuf;

/// Geographic point the catalog is scoped to. Set once at config load and
/// read-only thereafter; the backend prices and stocks per location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Returns `true` when both coordinates are inside the valid
    /// geographic range (lat -90..90, lon -180..180).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Names of the pagination fields in the backend's JSON page envelope.
///
/// The backend is a mobile-app API with no published contract, so the field
/// names are configuration rather than code. Defaults match the shape
/// observed from the live app: `{"products": [...], "has_more": bool,
/// "next_cursor": "..."}`.
#[derive(Debug, Clone)]
pub struct ResponseShape {
    pub items_field: String,
    pub has_more_field: String,
    pub next_cursor_field: String,
}

impl Default for ResponseShape {
    fn default() -> Self {
        Self {
            items_field: "products".to_string(),
            has_more_field: "has_more".to_string(),
            next_cursor_field: "next_cursor".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub location: Location,
    pub user_agent: String,
    /// Value for the `app-version` header the backend expects from its
    /// mobile clients.
    pub app_version: String,
    /// Value for the `platform` header (`android` / `ios`).
    pub platform: String,
    pub min_request_interval_ms: u64,
    /// Total attempts per page fetch, including the first (not a retry count).
    pub max_attempts: u32,
    pub retry_base_delay_secs: u64,
    pub request_timeout_secs: u64,
    pub page_size: u32,
    pub max_pages: usize,
    pub max_concurrent_categories: usize,
    pub categories_path: PathBuf,
    pub output_dir: PathBuf,
    pub response_shape: ResponseShape,
}
