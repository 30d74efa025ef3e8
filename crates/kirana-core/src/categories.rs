use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One entry from the category registry file: the slug used on the command
/// line and the backend's opaque category id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Human-facing slug, e.g. `"fruits"`.
    pub slug: String,
    /// Backend category identifier passed as the `category_id` query param.
    pub id: String,
    /// Display name as the app shows it, e.g. `"Fruits & Vegetables"`.
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategoriesFile {
    pub categories: Vec<Category>,
}

impl CategoriesFile {
    /// Looks up a category by its slug.
    #[must_use]
    pub fn by_slug(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }
}

/// Load and validate the category registry from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation (empty slug/id, duplicate slug).
pub fn load_categories(path: &Path) -> Result<CategoriesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CategoriesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: CategoriesFile = serde_yaml::from_str(&content)?;
    validate_categories(&file)?;
    Ok(file)
}

fn validate_categories(file: &CategoriesFile) -> Result<(), ConfigError> {
    let mut seen_slugs = HashSet::new();

    for category in &file.categories {
        if category.slug.trim().is_empty() {
            return Err(ConfigError::Validation(
                "category slug must be non-empty".to_string(),
            ));
        }
        if category.id.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "category '{}' has an empty backend id",
                category.slug
            )));
        }
        if !seen_slugs.insert(category.slug.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category slug '{}'",
                category.slug
            )));
        }
    }

    Ok(())
}
