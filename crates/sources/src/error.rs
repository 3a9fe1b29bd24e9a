//! Source error types
//!
//! Per-attempt failures inside the fetcher. None of these propagate out of a
//! [`crate::SourceFetcher::fetch`] call - they are recorded on the
//! [`crate::SourceResult`] for accounting and logging.

use thiserror::Error;

/// Errors that can occur while fetching one source
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source URL is not http(s)
    #[error("invalid source url '{url}': only http and https are supported")]
    InvalidUrl { url: String },

    /// The server answered with a non-success status
    #[error("unexpected status {status}")]
    Status { status: u16 },

    /// Network-level failure (connect, timeout, body read)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The payload fetched but no descriptors could be extracted
    #[error("no descriptors extracted from payload")]
    NoNodes,
}
