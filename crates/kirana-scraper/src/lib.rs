pub mod client;
pub mod error;
pub mod fetcher;
pub mod normalize;
pub mod pagination;
pub mod parse;
pub mod rate_limit;
pub mod retry;
pub mod types;

pub use client::{CatalogClient, SessionSettings};
pub use error::CatalogError;
pub use fetcher::{Catalog, CatalogFetcher, CategoryReport};
pub use normalize::normalize_item;
pub use pagination::Paginator;
pub use rate_limit::RateLimiter;
pub use retry::RetryPolicy;
pub use types::RawPage;
