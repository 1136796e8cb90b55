//! Reverse geocoding: water-related addresses and city names.

use aquaname_core::Coordinate;

use crate::client::PlacesClient;
use crate::types::{ApiStatus, GeocodeResponse, GeocodeResult};

/// Component types tried in order when picking a city; the first tier with a
/// matching component wins.
const CITY_TIERS: &[&[&str]] = &[
    &["locality", "postal_town"],
    &["administrative_area_level_3", "sublocality"],
    &["administrative_area_level_2"],
];

/// The first `formatted_address` containing one of `keywords`
/// (case-insensitive substring match).
///
/// Matching is plain substring search over the configured vocabulary, so an
/// English-only vocabulary misses addresses written in other languages.
#[must_use]
pub fn water_address<'a>(response: &'a GeocodeResponse, keywords: &[String]) -> Option<&'a str> {
    response
        .results
        .iter()
        .map(|r| r.formatted_address.as_str())
        .find(|address| {
            let lower = address.to_lowercase();
            keywords.iter().any(|k| lower.contains(&k.to_lowercase()))
        })
}

/// City name from one geocode result's address components.
#[must_use]
pub fn city_from_result(result: &GeocodeResult) -> Option<&str> {
    CITY_TIERS.iter().find_map(|tier| {
        result
            .address_components
            .iter()
            .find(|c| tier.iter().any(|t| c.has_type(t)))
            .map(|c| c.long_name.as_str())
    })
}

impl PlacesClient {
    /// Raw reverse-geocode response for `origin`; a synthetic `ERROR`
    /// response when the request could not be completed.
    pub async fn reverse_geocode(&self, origin: Coordinate) -> GeocodeResponse {
        let params = vec![("latlng", origin.to_query_value())];
        let response: GeocodeResponse = self.fetch_response(&self.geocode_url, &params).await;
        if response.status.is_failure() {
            tracing::warn!(
                status = ?response.status,
                error_message = response.error_message.as_deref().unwrap_or(""),
                "reverse geocode returned non-OK status"
            );
        }
        response
    }

    /// The first water-related formatted address near `origin`, if any.
    pub async fn reverse_geocode_water(&self, origin: Coordinate) -> Option<String> {
        let response = self.reverse_geocode(origin).await;
        water_address(&response, &self.config.address_keywords).map(str::to_owned)
    }

    /// The city containing `origin`, taken from the first geocode result.
    pub async fn reverse_geocode_city(&self, origin: Coordinate) -> Option<String> {
        let response = self.reverse_geocode(origin).await;
        if response.status != ApiStatus::Ok {
            return None;
        }
        response
            .results
            .first()
            .and_then(city_from_result)
            .map(str::to_owned)
    }
}
