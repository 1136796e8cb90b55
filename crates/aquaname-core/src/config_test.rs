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

/// Returns a map with all required env vars populated.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("GOOGLE_MAPS_API_KEY", "test-key");
    m
}

fn assert_invalid(var: &str, value: &str) {
    let mut map = full_env();
    map.insert(var, value);
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { var: ref v, .. }) if v == var),
        "expected InvalidEnvVar({var}) for {value:?}, got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_without_api_key() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "GOOGLE_MAPS_API_KEY"),
        "expected MissingEnvVar(GOOGLE_MAPS_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_api_key_as_missing() {
    let mut map = HashMap::new();
    map.insert("GOOGLE_MAPS_API_KEY", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_app_config_applies_defaults() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.api_key, "test-key");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.places_base_url, DEFAULT_PLACES_BASE_URL);
    assert_eq!(cfg.geocode_base_url, DEFAULT_GEOCODE_BASE_URL);
    assert_eq!(cfg.user_agent, "aquaname/0.1 (water-feature-lookup)");
    assert_eq!(cfg.request_timeout_secs, 20);
    assert_eq!(cfg.max_attempts, 3);
    assert_eq!(cfg.backoff_base_secs, 5);
    assert_eq!(cfg.max_pages, 2);
    assert_eq!(cfg.page_settle_delay_ms, 2000);
    assert_eq!(cfg.search_radius_m, 100);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = full_env();
    map.insert("AQUANAME_PLACES_BASE_URL", "http://127.0.0.1:9000/nearby");
    map.insert("AQUANAME_MAX_ATTEMPTS", "5");
    map.insert("AQUANAME_MAX_PAGES", "3");
    map.insert("AQUANAME_PAGE_SETTLE_DELAY_MS", "0");
    map.insert("AQUANAME_SEARCH_RADIUS_M", "250");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.places_base_url, "http://127.0.0.1:9000/nearby");
    assert_eq!(cfg.max_attempts, 5);
    assert_eq!(cfg.max_pages, 3);
    assert_eq!(cfg.page_settle_delay_ms, 0);
    assert_eq!(cfg.search_radius_m, 250);
}

#[test]
fn build_app_config_rejects_non_numeric_values() {
    assert_invalid("AQUANAME_REQUEST_TIMEOUT_SECS", "not-a-number");
    assert_invalid("AQUANAME_MAX_ATTEMPTS", "three");
    assert_invalid("AQUANAME_BACKOFF_BASE_SECS", "-1");
    assert_invalid("AQUANAME_MAX_PAGES", "2.5");
    assert_invalid("AQUANAME_PAGE_SETTLE_DELAY_MS", "soon");
    assert_invalid("AQUANAME_SEARCH_RADIUS_M", "100m");
}

#[test]
fn build_app_config_rejects_zero_attempts() {
    assert_invalid("AQUANAME_MAX_ATTEMPTS", "0");
}

#[test]
fn build_app_config_rejects_zero_pages() {
    assert_invalid("AQUANAME_MAX_PAGES", "0");
}

#[test]
fn build_app_config_rejects_zero_radius() {
    assert_invalid("AQUANAME_SEARCH_RADIUS_M", "0");
}

#[test]
fn debug_output_redacts_api_key() {
    let mut map = full_env();
    map.insert("GOOGLE_MAPS_API_KEY", "super-secret-key");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret-key"));
    assert!(rendered.contains("[redacted]"));
}
