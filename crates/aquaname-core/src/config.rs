use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_PLACES_BASE_URL: &str =
    "https://maps.googleapis.com/maps/api/place/nearbysearch/json";
pub const DEFAULT_GEOCODE_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

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

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let api_key = require("GOOGLE_MAPS_API_KEY")?;
    let log_level = or_default("AQUANAME_LOG_LEVEL", "info");
    let places_base_url = or_default("AQUANAME_PLACES_BASE_URL", DEFAULT_PLACES_BASE_URL);
    let geocode_base_url = or_default("AQUANAME_GEOCODE_BASE_URL", DEFAULT_GEOCODE_BASE_URL);
    let user_agent = or_default("AQUANAME_USER_AGENT", "aquaname/0.1 (water-feature-lookup)");

    let request_timeout_secs = parse_u64("AQUANAME_REQUEST_TIMEOUT_SECS", "20")?;
    let max_attempts = parse_u32("AQUANAME_MAX_ATTEMPTS", "3")?;
    if max_attempts == 0 {
        return Err(invalid("AQUANAME_MAX_ATTEMPTS", "must be at least 1".to_string()));
    }
    let backoff_base_secs = parse_u64("AQUANAME_BACKOFF_BASE_SECS", "5")?;
    let max_pages = parse_usize("AQUANAME_MAX_PAGES", "2")?;
    if max_pages == 0 {
        return Err(invalid("AQUANAME_MAX_PAGES", "must be at least 1".to_string()));
    }
    let page_settle_delay_ms = parse_u64("AQUANAME_PAGE_SETTLE_DELAY_MS", "2000")?;
    let search_radius_m = parse_u32("AQUANAME_SEARCH_RADIUS_M", "100")?;
    if search_radius_m == 0 {
        return Err(invalid("AQUANAME_SEARCH_RADIUS_M", "must be positive".to_string()));
    }

    Ok(AppConfig {
        api_key,
        log_level,
        places_base_url,
        geocode_base_url,
        user_agent,
        request_timeout_secs,
        max_attempts,
        backoff_base_secs,
        max_pages,
        page_settle_delay_ms,
        search_radius_m,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
