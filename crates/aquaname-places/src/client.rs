//! HTTP client and fail-soft fetcher for the places and geocode APIs.
//!
//! [`PlacesClient::fetch`] sends one GET with retries and reports the result
//! as a [`FetchOutcome`]. [`PlacesClient::fetch_response`] goes one step
//! further and turns an exhausted fetch into the response type's synthetic
//! `ERROR` value, which is what the search and geocode layers consume.

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::config::PlacesConfig;
use crate::error::PlacesError;
use crate::retry::retry_with_backoff;
use crate::types::{ApiStatus, GeocodeResponse, NearbySearchResponse};

/// Query parameters for one request, excluding the API key.
pub type QueryParams = Vec<(&'static str, String)>;

/// Result of a fetch after retries.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    /// A parsed response body. Its upstream `status` may still be non-OK.
    Fetched(T),
    /// No usable response; `error` is the failure from the last attempt.
    Unavailable { attempts: u32, error: PlacesError },
}

impl<T> FetchOutcome<T> {
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, FetchOutcome::Unavailable { .. })
    }
}

impl<T: FailSoft> FetchOutcome<T> {
    /// The fetched response, or the synthetic `ERROR` response.
    #[must_use]
    pub fn into_response(self) -> T {
        match self {
            FetchOutcome::Fetched(response) => response,
            FetchOutcome::Unavailable { .. } => T::unavailable(),
        }
    }
}

/// Response types that have an empty `ERROR` form.
pub trait FailSoft {
    fn unavailable() -> Self;
}

impl FailSoft for NearbySearchResponse {
    fn unavailable() -> Self {
        Self {
            status: ApiStatus::Error,
            results: Vec::new(),
            next_page_token: None,
            error_message: None,
        }
    }
}

impl FailSoft for GeocodeResponse {
    fn unavailable() -> Self {
        Self {
            status: ApiStatus::Error,
            results: Vec::new(),
            error_message: None,
        }
    }
}

/// Client for the nearby-search and reverse-geocode endpoints.
///
/// Holds the HTTP client, the API key, and the request policy. All requests
/// are issued one at a time by the caller.
pub struct PlacesClient {
    pub(crate) client: Client,
    pub(crate) config: PlacesConfig,
    pub(crate) places_url: Url,
    pub(crate) geocode_url: Url,
}

impl PlacesClient {
    /// Builds the client from a [`PlacesConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if either
    /// base URL does not parse.
    pub fn new(config: PlacesConfig) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout.min(std::time::Duration::from_secs(10)))
            .user_agent(config.user_agent.as_str())
            .build()?;
        let places_url = parse_base_url(&config.places_base_url)?;
        let geocode_url = parse_base_url(&config.geocode_base_url)?;
        Ok(Self {
            client,
            config,
            places_url,
            geocode_url,
        })
    }

    #[must_use]
    pub fn config(&self) -> &PlacesConfig {
        &self.config
    }

    #[must_use]
    pub fn places_endpoint(&self) -> &Url {
        &self.places_url
    }

    #[must_use]
    pub fn geocode_endpoint(&self) -> &Url {
        &self.geocode_url
    }

    /// GETs `endpoint` with `params` (plus the API key), retrying transient
    /// failures with linear back-off.
    ///
    /// Never fails: an exhausted or non-retriable failure comes back as
    /// [`FetchOutcome::Unavailable`] and is logged at `warn`.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &Url,
        params: &[(&'static str, String)],
    ) -> FetchOutcome<T> {
        let url = self.build_url(endpoint, params);
        let outcome = retry_with_backoff(self.config.max_attempts, self.config.backoff_base, || {
            self.request_json::<T>(&url)
        })
        .await;
        if let FetchOutcome::Unavailable { attempts, error } = &outcome {
            tracing::warn!(
                endpoint = endpoint.path(),
                attempts,
                error = %error,
                "request abandoned; treating as empty ERROR response"
            );
        }
        outcome
    }

    /// [`Self::fetch`], collapsing `Unavailable` into `T`'s `ERROR` form.
    pub async fn fetch_response<T: DeserializeOwned + FailSoft>(
        &self,
        endpoint: &Url,
        params: &[(&'static str, String)],
    ) -> T {
        self.fetch::<T>(endpoint, params).await.into_response()
    }

    /// Appends `key` and then `params` as percent-encoded query pairs.
    pub(crate) fn build_url(&self, endpoint: &Url, params: &[(&'static str, String)]) -> Url {
        let mut url = endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.config.api_key);
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// One attempt: send, require 2xx, parse the body as JSON.
    async fn request_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, PlacesError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlacesError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint: url.path().to_owned(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: url.path().to_owned(),
            source: e,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, PlacesError> {
    let url = Url::parse(raw).map_err(|e| PlacesError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(PlacesError::InvalidBaseUrl {
            url: raw.to_owned(),
            reason: "not a hierarchical URL".to_owned(),
        });
    }
    Ok(url)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
