//! Retry with linear back-off for places/geocode requests.
//!
//! [`retry_with_backoff`] wraps one fallible async request and retries on
//! transient errors. Whatever happens, it returns a [`FetchOutcome`] rather
//! than an `Err`.

use std::future::Future;
use std::time::Duration;

use crate::client::FetchOutcome;
use crate::error::PlacesError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - [`PlacesError::Http`]: connection refused, TLS failure, timeout,
///   truncated body.
/// - [`PlacesError::UnexpectedStatus`] with 5xx or 429.
///
/// **Not retriable:**
/// - other [`PlacesError::UnexpectedStatus`] values (4xx).
/// - [`PlacesError::Deserialize`]: the same body would come back again.
/// - [`PlacesError::InvalidBaseUrl`].
pub(crate) fn is_retriable(err: &PlacesError) -> bool {
    match err {
        PlacesError::Http(_) => true,
        PlacesError::UnexpectedStatus { status, .. } => *status >= 500 || *status == 429,
        PlacesError::Deserialize { .. } | PlacesError::InvalidBaseUrl { .. } => false,
    }
}

/// Runs `operation` up to `max_attempts` times in total.
///
/// The wait before attempt `n + 1` is `backoff_base * n`:
///
/// | Failed attempt | Sleep before next attempt (`backoff_base = 5s`) |
/// |----------------|-------------------------------------------------|
/// | 1              | 5 s                                             |
/// | 2              | 10 s                                            |
/// | 3 (last, R=3)  | none, returns `Unavailable`                     |
///
/// `max_attempts` of 0 is treated as 1.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_attempts: u32,
    backoff_base: Duration,
    mut operation: F,
) -> FetchOutcome<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, PlacesError>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return FetchOutcome::Fetched(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_attempts {
                    return FetchOutcome::Unavailable {
                        attempts: attempt,
                        error: err,
                    };
                }
                let delay = backoff_base.saturating_mul(attempt);
                tracing::warn!(
                    attempt,
                    max_attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "places request failed; retrying after back-off"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
