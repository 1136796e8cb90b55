//! Wire types for the nearby-search and geocode JSON responses.
//!
//! Both APIs wrap their payload in a `{"status": "...", "results": [...]}`
//! envelope. Fields the pipeline does not need are ignored; fields that may
//! be absent on malformed entries are `Option` so a single bad entry never
//! fails the whole page.

use aquaname_core::{Coordinate, PlaceCandidate};
use serde::Deserialize;

/// Top-level `status` string shared by both APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiStatus {
    Ok,
    ZeroResults,
    OverQueryLimit,
    OverDailyLimit,
    RequestDenied,
    InvalidRequest,
    UnknownError,
    NotFound,
    /// Also used for the synthetic response when every attempt failed.
    Error,
    #[serde(other)]
    Other,
}

impl ApiStatus {
    /// `true` for statuses that signal a problem rather than "no data".
    #[must_use]
    pub fn is_failure(self) -> bool {
        !matches!(self, ApiStatus::Ok | ApiStatus::ZeroResults)
    }
}

// ---------------------------------------------------------------------------
// Nearby search
// ---------------------------------------------------------------------------

/// One nearby-search page.
#[derive(Debug, Deserialize)]
pub struct NearbySearchResponse {
    pub status: ApiStatus,
    #[serde(default)]
    pub results: Vec<RawPlace>,
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl NearbySearchResponse {
    /// The continuation token, if present and non-empty.
    #[must_use]
    pub fn continuation_token(&self) -> Option<&str> {
        self.next_page_token.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct RawPlace {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub location: Option<LatLng>,
}

#[derive(Debug, Deserialize)]
pub struct LatLng {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

impl RawPlace {
    /// Converts to a [`PlaceCandidate`], or `None` when the id or a usable
    /// location is missing.
    #[must_use]
    pub fn into_candidate(self) -> Option<PlaceCandidate> {
        let unique_id = self.place_id.filter(|id| !id.is_empty())?;
        let location = self.geometry?.location?;
        let location = Coordinate::new(location.lat?, location.lng?).ok()?;
        Some(PlaceCandidate {
            unique_id,
            name: self.name.unwrap_or_default(),
            location,
            category_tags: self.types,
        })
    }
}

// ---------------------------------------------------------------------------
// Reverse geocode
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub status: ApiStatus,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub formatted_address: String,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
}

#[derive(Debug, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

impl AddressComponent {
    #[must_use]
    pub fn has_type(&self, wanted: &str) -> bool {
        self.types.iter().any(|t| t == wanted)
    }
}
