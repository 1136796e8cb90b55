//! Paginated nearby search.
//!
//! The nearby-search API returns up to 20 results per page plus an optional
//! `next_page_token`. A token only becomes valid a short while after it is
//! issued, so the client waits `page_settle_delay` before using it. The
//! follow-up request carries only the key and the token.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use aquaname_core::{Coordinate, PlaceCandidate};

use crate::client::{PlacesClient, QueryParams};
use crate::types::{ApiStatus, NearbySearchResponse, RawPlace};

/// Candidates keyed by `unique_id`.
pub type CandidateMap = HashMap<String, PlaceCandidate>;

/// Inserts every candidate into `acc`, replacing any entry with the same
/// `unique_id` (last writer wins). Returns how many were new ids.
pub fn merge_candidates<I>(acc: &mut CandidateMap, incoming: I) -> usize
where
    I: IntoIterator<Item = PlaceCandidate>,
{
    let mut added = 0;
    for candidate in incoming {
        if acc.insert(candidate.unique_id.clone(), candidate).is_none() {
            added += 1;
        }
    }
    added
}

/// First-page parameters for a keyword search around `origin`.
#[must_use]
pub fn nearby_params(origin: Coordinate, radius_m: u32, keyword: &str) -> QueryParams {
    vec![
        ("location", origin.to_query_value()),
        ("radius", radius_m.to_string()),
        ("keyword", keyword.to_owned()),
    ]
}

impl PlacesClient {
    /// Runs one nearby search, following continuation tokens for at most
    /// `max_pages` pages, and returns every well-formed candidate keyed by id.
    ///
    /// Stops early on the first page whose status is not `OK` (including the
    /// synthetic `ERROR` from an exhausted fetch) and on a page without a
    /// token. Candidates missing an id or location are dropped.
    pub async fn search(&self, base_params: QueryParams) -> CandidateMap {
        paginate(
            self.config.max_pages,
            self.config.page_settle_delay,
            base_params,
            |params| async move { self.fetch_response(&self.places_url, &params).await },
        )
        .await
    }
}

/// The page loop behind [`PlacesClient::search`], with the page fetch
/// supplied by the caller.
///
/// Waits `settle_delay` before every follow-up request and never after the
/// last page fetched.
pub(crate) async fn paginate<F, Fut>(
    max_pages: usize,
    settle_delay: Duration,
    base_params: QueryParams,
    mut fetch_page: F,
) -> CandidateMap
where
    F: FnMut(QueryParams) -> Fut,
    Fut: Future<Output = NearbySearchResponse>,
{
    let mut acc = CandidateMap::new();
    let mut params = base_params;
    let max_pages = max_pages.max(1);

    for page in 1..=max_pages {
        let response = fetch_page(params).await;

        if response.status != ApiStatus::Ok {
            log_stop(page, &response);
            break;
        }

        let received = response.results.len();
        let token = response.continuation_token().map(str::to_owned);
        let candidates: Vec<PlaceCandidate> = response
            .results
            .into_iter()
            .filter_map(RawPlace::into_candidate)
            .collect();
        let dropped = received - candidates.len();
        if dropped > 0 {
            tracing::debug!(page, dropped, "skipping places without id or location");
        }
        let added = merge_candidates(&mut acc, candidates);
        tracing::debug!(page, received, added, total = acc.len(), "merged search page");

        let Some(token) = token else { break };
        if page == max_pages {
            tracing::debug!(max_pages, "page cap reached; ignoring continuation token");
            break;
        }

        tokio::time::sleep(settle_delay).await;
        params = vec![("pagetoken", token)];
    }

    acc
}

fn log_stop(page: usize, response: &NearbySearchResponse) {
    if response.status.is_failure() {
        tracing::warn!(
            page,
            status = ?response.status,
            error_message = response.error_message.as_deref().unwrap_or(""),
            "nearby search returned non-OK status"
        );
    } else {
        tracing::debug!(page, status = ?response.status, "nearby search has no more results");
    }
}
