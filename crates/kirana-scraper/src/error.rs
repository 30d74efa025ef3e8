use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed page from {context}: {reason}")]
    MalformedResponse { context: String, reason: String },

    #[error("malformed item (product_id: {product_id:?}): {reason}")]
    MalformedItem {
        product_id: Option<String>,
        reason: String,
    },

    #[error("pagination loop detected for category {category}: cursor {cursor:?} repeated")]
    PaginationLoop { category: String, cursor: String },

    #[error("invalid API base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("no categories requested")]
    NoCategories,
}

impl CatalogError {
    /// Returns `true` if this error represents a transient condition that a
    /// retry after backoff may recover from.
    ///
    /// Transient: network-level failures and HTTP 429/5xx. Everything else
    /// (other 4xx, parse failures, shape mismatches, pagination loops) is
    /// deterministic and propagated immediately.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            CatalogError::Transport(_) => true,
            CatalogError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_429_is_transient() {
        let err = CatalogError::Status {
            status: 429,
            url: "https://api.example.com/products".to_string(),
        };
        assert!(err.is_transient());
    }

    #[test]
    fn status_5xx_is_transient() {
        for status in [500, 502, 503] {
            let err = CatalogError::Status {
                status,
                url: "https://api.example.com/products".to_string(),
            };
            assert!(err.is_transient(), "expected {status} to be transient");
        }
    }

    #[test]
    fn status_4xx_other_than_429_is_not_transient() {
        for status in [400, 401, 403, 404] {
            let err = CatalogError::Status {
                status,
                url: "https://api.example.com/products".to_string(),
            };
            assert!(!err.is_transient(), "expected {status} to be terminal");
        }
    }

    #[test]
    fn shape_and_item_errors_are_not_transient() {
        let shape = CatalogError::MalformedResponse {
            context: "page 1".to_string(),
            reason: "items field missing".to_string(),
        };
        let item = CatalogError::MalformedItem {
            product_id: None,
            reason: "missing name".to_string(),
        };
        assert!(!shape.is_transient());
        assert!(!item.is_transient());
    }
}
