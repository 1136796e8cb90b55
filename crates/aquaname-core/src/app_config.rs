#[derive(Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub log_level: String,
    pub places_base_url: String,
    pub geocode_base_url: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    /// Total attempts per request, including the first.
    pub max_attempts: u32,
    pub backoff_base_secs: u64,
    pub max_pages: usize,
    pub page_settle_delay_ms: u64,
    pub search_radius_m: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"[redacted]")
            .field("log_level", &self.log_level)
            .field("places_base_url", &self.places_base_url)
            .field("geocode_base_url", &self.geocode_base_url)
            .field("user_agent", &self.user_agent)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_attempts", &self.max_attempts)
            .field("backoff_base_secs", &self.backoff_base_secs)
            .field("max_pages", &self.max_pages)
            .field("page_settle_delay_ms", &self.page_settle_delay_ms)
            .field("search_radius_m", &self.search_radius_m)
            .finish()
    }
}
