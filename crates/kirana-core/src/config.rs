use std::path::PathBuf;

use crate::app_config::{AppConfig, Location, ResponseShape};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files, which is useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup with no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_f64 = |var: &str| -> Result<f64, ConfigError> {
        let raw = require(var)?;
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let api_base_url = require("KIRANA_API_BASE_URL")?;

    let location = Location {
        latitude: parse_f64("KIRANA_LATITUDE")?,
        longitude: parse_f64("KIRANA_LONGITUDE")?,
    };
    if !location.is_valid() {
        return Err(ConfigError::Validation(format!(
            "location ({}, {}) is outside the valid geographic range",
            location.latitude, location.longitude
        )));
    }

    let user_agent = or_default("KIRANA_USER_AGENT", "kirana/0.1 (catalog-fetcher)");
    let app_version = or_default("KIRANA_APP_VERSION", "23.9.1");
    let platform = or_default("KIRANA_PLATFORM", "android");

    let min_request_interval_ms = parse_u64("KIRANA_MIN_REQUEST_INTERVAL_MS", "1000")?;
    let max_attempts = parse_u32("KIRANA_MAX_ATTEMPTS", "3")?;
    if max_attempts == 0 {
        return Err(ConfigError::Validation(
            "KIRANA_MAX_ATTEMPTS must be at least 1".to_string(),
        ));
    }
    let retry_base_delay_secs = parse_u64("KIRANA_RETRY_BASE_DELAY_SECS", "1")?;
    let request_timeout_secs = parse_u64("KIRANA_REQUEST_TIMEOUT_SECS", "30")?;

    let page_size = parse_u32("KIRANA_PAGE_SIZE", "50")?;
    let max_pages = parse_usize("KIRANA_MAX_PAGES", "1000")?;
    let max_concurrent_categories = parse_usize("KIRANA_MAX_CONCURRENT_CATEGORIES", "1")?;

    let categories_path = PathBuf::from(or_default(
        "KIRANA_CATEGORIES_PATH",
        "./config/categories.yaml",
    ));
    let output_dir = PathBuf::from(or_default("KIRANA_OUTPUT_DIR", "./output"));

    let response_shape = ResponseShape {
        items_field: or_default("KIRANA_ITEMS_FIELD", "products"),
        has_more_field: or_default("KIRANA_HAS_MORE_FIELD", "has_more"),
        next_cursor_field: or_default("KIRANA_NEXT_CURSOR_FIELD", "next_cursor"),
    };

    Ok(AppConfig {
        api_base_url,
        location,
        user_agent,
        app_version,
        platform,
        min_request_interval_ms,
        max_attempts,
        retry_base_delay_secs,
        request_timeout_secs,
        page_size,
        max_pages,
        max_concurrent_categories,
        categories_path,
        output_dir,
        response_shape,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid values.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("KIRANA_API_BASE_URL", "https://api.example.com");
        m.insert("KIRANA_LATITUDE", "12.9716");
        m.insert("KIRANA_LONGITUDE", "77.5946");
        m
    }

    #[test]
    fn fails_without_api_base_url() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "KIRANA_API_BASE_URL"),
            "expected MissingEnvVar(KIRANA_API_BASE_URL), got: {result:?}"
        );
    }

    #[test]
    fn fails_without_latitude() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("KIRANA_API_BASE_URL", "https://api.example.com");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "KIRANA_LATITUDE"),
            "expected MissingEnvVar(KIRANA_LATITUDE), got: {result:?}"
        );
    }

    #[test]
    fn fails_on_non_numeric_latitude() {
        let mut map = full_env();
        map.insert("KIRANA_LATITUDE", "north-of-town");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "KIRANA_LATITUDE"),
            "expected InvalidEnvVar(KIRANA_LATITUDE), got: {result:?}"
        );
    }

    #[test]
    fn fails_on_out_of_range_latitude() {
        let mut map = full_env();
        map.insert("KIRANA_LATITUDE", "91.0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::Validation(_))),
            "expected Validation error, got: {result:?}"
        );
    }

    #[test]
    fn fails_on_out_of_range_longitude() {
        let mut map = full_env();
        map.insert("KIRANA_LONGITUDE", "-180.5");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::Validation(_))),
            "expected Validation error, got: {result:?}"
        );
    }

    #[test]
    fn fails_on_zero_max_attempts() {
        let mut map = full_env();
        map.insert("KIRANA_MAX_ATTEMPTS", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::Validation(_))),
            "expected Validation error, got: {result:?}"
        );
    }

    #[test]
    fn defaults_applied_when_optional_vars_absent() {
        let map = full_env();
        let config = build_app_config(lookup_from_map(&map)).expect("config should load");
        assert_eq!(config.min_request_interval_ms, 1000);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.retry_base_delay_secs, 1);
        assert_eq!(config.page_size, 50);
        assert_eq!(config.max_pages, 1000);
        assert_eq!(config.max_concurrent_categories, 1);
        assert_eq!(config.response_shape.items_field, "products");
        assert_eq!(config.response_shape.has_more_field, "has_more");
        assert_eq!(config.response_shape.next_cursor_field, "next_cursor");
    }

    #[test]
    fn overrides_take_precedence_over_defaults() {
        let mut map = full_env();
        map.insert("KIRANA_PAGE_SIZE", "25");
        map.insert("KIRANA_MAX_PAGES", "10");
        map.insert("KIRANA_ITEMS_FIELD", "items");
        let config = build_app_config(lookup_from_map(&map)).expect("config should load");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.max_pages, 10);
        assert_eq!(config.response_shape.items_field, "items");
    }

    #[test]
    fn location_is_parsed() {
        let map = full_env();
        let config = build_app_config(lookup_from_map(&map)).expect("config should load");
        assert!((config.location.latitude - 12.9716).abs() < f64::EPSILON);
        assert!((config.location.longitude - 77.5946).abs() < f64::EPSILON);
    }
}
