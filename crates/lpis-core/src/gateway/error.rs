//! Gateway error taxonomy.
//!
//! Three terminal failure kinds so a caller can tell policy rejection
//! apart from transport problems apart from malformed upstream bodies.
//! None of them is retried; a failed resolution fails the whole
//! expansion attempt that triggered it.

use thiserror::Error;

/// Error returned by a single `Gateway::resolve` call.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The URL matched none of the rewrite rules. No fetch was attempted.
    #[error("blocked context fetch: {url}")]
    BlockedFetch { url: String },

    /// Transport-level failure (curl error, timeout, or non-2xx status)
    /// while fetching the mapped URL.
    #[error("fetch failed for {mapped}: {source}")]
    FetchFailed {
        mapped: String,
        #[source]
        source: FetchError,
    },

    /// The body arrived but is not parseable as JSON.
    #[error("response from {mapped} is not JSON: {source}")]
    NonJsonResponse {
        mapped: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Error from the underlying document fetcher (curl failure or HTTP error).
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection refused, DNS, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// The final response after redirects had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
}
