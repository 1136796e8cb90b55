//! Place candidates and distance-ranked matches.

use std::cmp::Ordering;

use serde::Serialize;

use crate::geo::{distance_meters, Coordinate};

/// A place returned by one search page.
///
/// `unique_id` is the identity: two candidates with the same id are the same
/// physical place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceCandidate {
    pub unique_id: String,
    pub name: String,
    pub location: Coordinate,
    /// Upstream category tags, in upstream order.
    pub category_tags: Vec<String>,
}

/// A candidate scored against a query origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredMatch {
    candidate: PlaceCandidate,
    distance_meters: f64,
}

impl ScoredMatch {
    #[must_use]
    pub fn score(origin: Coordinate, candidate: PlaceCandidate) -> Self {
        let distance_meters = distance_meters(origin, candidate.location);
        Self {
            candidate,
            distance_meters,
        }
    }

    #[must_use]
    pub fn candidate(&self) -> &PlaceCandidate {
        &self.candidate
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.candidate.name
    }

    #[must_use]
    pub fn distance_meters(&self) -> f64 {
        self.distance_meters
    }

    fn result_order(&self, other: &Self) -> Ordering {
        self.distance_meters
            .total_cmp(&other.distance_meters)
            .then_with(|| self.candidate.name.cmp(&other.candidate.name))
    }
}

/// Scores every candidate against `origin` and orders them by
/// `(distance, name)` ascending.
#[must_use]
pub fn rank_by_distance<I>(origin: Coordinate, candidates: I) -> Vec<ScoredMatch>
where
    I: IntoIterator<Item = PlaceCandidate>,
{
    let mut matches: Vec<ScoredMatch> = candidates
        .into_iter()
        .map(|c| ScoredMatch::score(origin, c))
        .collect();
    matches.sort_by(ScoredMatch::result_order);
    matches
}
