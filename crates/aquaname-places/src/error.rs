use thiserror::Error;

/// Errors raised inside a single places/geocode request attempt.
///
/// These never escape [`crate::PlacesClient`]'s fetch layer as `Err`; they are
/// carried in [`crate::FetchOutcome::Unavailable`] for logging and tests.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {endpoint}")]
    UnexpectedStatus { status: u16, endpoint: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
