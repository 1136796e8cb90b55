//! Client for the upstream place-search and reverse-geocode APIs.
//!
//! Every request goes through a fail-soft fetcher: transport failures are
//! retried with linear back-off and, once attempts run out, collapse into a
//! synthetic `ERROR` response instead of an `Err`. On top of that sit the
//! paginated nearby search, the water-keyword fan-out resolver, and the
//! reverse-geocode helpers.

pub mod client;
pub mod config;
pub mod error;
pub mod geocode;
pub mod resolver;
mod retry;
pub mod search;
pub mod types;

pub use client::{FailSoft, FetchOutcome, PlacesClient, QueryParams};
pub use config::PlacesConfig;
pub use error::PlacesError;
pub use geocode::{city_from_result, water_address};
pub use resolver::WATER_KEYWORDS;
pub use search::{merge_candidates, CandidateMap};
pub use types::{ApiStatus, GeocodeResponse, NearbySearchResponse};
