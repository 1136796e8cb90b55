//! Request policy for [`crate::PlacesClient`].

use std::time::Duration;

use aquaname_core::config::{DEFAULT_GEOCODE_BASE_URL, DEFAULT_PLACES_BASE_URL};
use aquaname_core::AppConfig;

use crate::resolver::WATER_KEYWORDS;

/// Everything the client needs, passed in at construction.
#[derive(Clone)]
pub struct PlacesConfig {
    pub api_key: String,
    pub places_base_url: String,
    pub geocode_base_url: String,
    pub user_agent: String,
    /// Total per-request timeout.
    pub timeout: Duration,
    /// Total attempts per request, including the first. Clamped to at least 1.
    pub max_attempts: u32,
    /// The wait before retry `n` is `backoff_base * n`.
    pub backoff_base: Duration,
    /// Upper bound on pages fetched per search.
    pub max_pages: usize,
    /// Wait before a continuation token is used.
    pub page_settle_delay: Duration,
    pub radius_m: u32,
    /// Lowercase substrings that mark a reverse-geocoded address as
    /// water-related.
    pub address_keywords: Vec<String>,
}

impl PlacesConfig {
    /// Production defaults against the Google endpoints.
    #[must_use]
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_owned(),
            places_base_url: DEFAULT_PLACES_BASE_URL.to_owned(),
            geocode_base_url: DEFAULT_GEOCODE_BASE_URL.to_owned(),
            user_agent: "aquaname/0.1 (water-feature-lookup)".to_owned(),
            timeout: Duration::from_secs(20),
            max_attempts: 3,
            backoff_base: Duration::from_secs(5),
            max_pages: 2,
            page_settle_delay: Duration::from_secs(2),
            radius_m: 100,
            address_keywords: WATER_KEYWORDS.iter().map(|k| (*k).to_owned()).collect(),
        }
    }

    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            places_base_url: config.places_base_url.clone(),
            geocode_base_url: config.geocode_base_url.clone(),
            user_agent: config.user_agent.clone(),
            timeout: Duration::from_secs(config.request_timeout_secs),
            max_attempts: config.max_attempts,
            backoff_base: Duration::from_secs(config.backoff_base_secs),
            max_pages: config.max_pages,
            page_settle_delay: Duration::from_millis(config.page_settle_delay_ms),
            radius_m: config.search_radius_m,
            ..Self::new(&config.api_key)
        }
    }
}

impl std::fmt::Debug for PlacesConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacesConfig")
            .field("api_key", &"[redacted]")
            .field("places_base_url", &self.places_base_url)
            .field("geocode_base_url", &self.geocode_base_url)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("max_attempts", &self.max_attempts)
            .field("backoff_base", &self.backoff_base)
            .field("max_pages", &self.max_pages)
            .field("page_settle_delay", &self.page_settle_delay)
            .field("radius_m", &self.radius_m)
            .field("address_keywords", &self.address_keywords)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_upstream_policy() {
        let cfg = PlacesConfig::new("k");
        assert_eq!(cfg.max_attempts, 3);
        assert_eq!(cfg.backoff_base, Duration::from_secs(5));
        assert_eq!(cfg.max_pages, 2);
        assert_eq!(cfg.page_settle_delay, Duration::from_secs(2));
        assert_eq!(cfg.radius_m, 100);
        assert_eq!(cfg.address_keywords.len(), WATER_KEYWORDS.len());
    }

    #[test]
    fn from_app_config_converts_units() {
        let app = AppConfig {
            api_key: "secret".to_owned(),
            log_level: "debug".to_owned(),
            places_base_url: "http://localhost:1/nearby".to_owned(),
            geocode_base_url: "http://localhost:1/geocode".to_owned(),
            user_agent: "ua".to_owned(),
            request_timeout_secs: 7,
            max_attempts: 4,
            backoff_base_secs: 1,
            max_pages: 3,
            page_settle_delay_ms: 1500,
            search_radius_m: 250,
        };
        let cfg = PlacesConfig::from_app_config(&app);
        assert_eq!(cfg.api_key, "secret");
        assert_eq!(cfg.places_base_url, "http://localhost:1/nearby");
        assert_eq!(cfg.timeout, Duration::from_secs(7));
        assert_eq!(cfg.max_attempts, 4);
        assert_eq!(cfg.backoff_base, Duration::from_secs(1));
        assert_eq!(cfg.max_pages, 3);
        assert_eq!(cfg.page_settle_delay, Duration::from_millis(1500));
        assert_eq!(cfg.radius_m, 250);
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let rendered = format!("{:?}", PlacesConfig::new("top-secret"));
        assert!(!rendered.contains("top-secret"));
    }
}
