//! Water-feature resolution: one paginated search per keyword, merged by id
//! and ranked by distance.

use aquaname_core::{rank_by_distance, Coordinate, ScoredMatch};

use crate::client::PlacesClient;
use crate::search::{merge_candidates, nearby_params, CandidateMap};

/// Keywords searched around every coordinate, in query order.
pub const WATER_KEYWORDS: &[&str] = &[
    "lake",
    "river",
    "pond",
    "reservoir",
    "creek",
    "stream",
    "bay",
    "canal",
    "waterfall",
    "falls",
    "marsh",
    "wetland",
    "lagoon",
    "harbor",
    "harbour",
];

impl PlacesClient {
    /// Named water features within `radius_m` of `origin`, nearest first.
    ///
    /// Searches every [`WATER_KEYWORDS`] entry with the same radius, merges
    /// the results by place id (a place found under several keywords keeps
    /// the attributes from the last one), then ranks by `(distance, name)`.
    /// A coordinate for which every query fails yields an empty list.
    pub async fn resolve(&self, origin: Coordinate, radius_m: u32) -> Vec<ScoredMatch> {
        let mut combined = CandidateMap::new();
        for keyword in WATER_KEYWORDS {
            let found = self.search(nearby_params(origin, radius_m, keyword)).await;
            let found_count = found.len();
            let added = merge_candidates(&mut combined, found.into_values());
            tracing::debug!(keyword, found = found_count, added, "keyword search done");
        }
        let matches = rank_by_distance(origin, combined.into_values());
        tracing::info!(
            lat = origin.lat(),
            lon = origin.lon(),
            radius_m,
            matches = matches.len(),
            "resolved water features"
        );
        matches
    }

    /// [`Self::resolve`] with the configured radius.
    pub async fn resolve_default(&self, origin: Coordinate) -> Vec<ScoredMatch> {
        self.resolve(origin, self.config.radius_m).await
    }
}
