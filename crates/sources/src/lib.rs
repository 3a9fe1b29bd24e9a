//! Subtrawl Sources - fetching node descriptors from remote subscriptions
//!
//! A source is a URL expected to serve a text payload containing node
//! descriptors, either as plaintext or as a (frequently mangled) Base64 blob.
//! This crate owns the path from URL to descriptor list:
//!
//! ```text
//! URL --fetch/retry--> raw text --decode heuristics--> plaintext --extract--> nodes
//! ```
//!
//! # Key Design
//!
//! - **Decoding is heuristic**: an ordered list of decode strategies shares a
//!   single acceptance predicate (does the candidate contain a registered
//!   scheme token?). The first accepted candidate wins; if none qualifies the
//!   raw text is used as-is. False accepts and rejects are tolerated by
//!   construction - extraction simply finds nothing.
//! - **Sources fail quietly**: a source that stays empty after all retries
//!   produces an empty [`SourceResult`], never an error that could abort the
//!   surrounding batch.

mod decode;
mod error;
mod extract;
mod fetch;

pub use decode::decode_payload;
pub use error::SourceError;
pub use extract::extract_nodes;
pub use fetch::{FetcherConfig, SourceFetcher, SourceResult};

/// Result type for source operations
pub type Result<T> = std::result::Result<T, SourceError>;

#[cfg(test)]
mod extract_test;
