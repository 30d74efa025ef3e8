pub mod app_config;
pub mod categories;
pub mod config;
pub mod product;

use thiserror::Error;

pub use app_config::{AppConfig, Location, ResponseShape};
pub use categories::{load_categories, Category, CategoriesFile};
pub use config::{load_app_config, load_app_config_from_env};
pub use product::Product;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read categories file {path}: {source}")]
    CategoriesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse categories file: {0}")]
    CategoriesFileParse(#[from] serde_yaml::Error),

    #[error("configuration validation failed: {0}")]
    Validation(String),
}
