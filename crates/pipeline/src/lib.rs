//! Subtrawl Pipeline - aggregation, deduplication, ranking and selection
//!
//! The pipeline turns a list of source URLs into the node sets the output
//! writers consume:
//!
//! ```text
//! [Sources]                 [Aggregator]                 [Outputs]
//!   url ──┐                                          ┌──→ all nodes
//!   url ──┼──→ fan-out fetch ──→ dedupe ──→ filter ──┼──→ best N (probe + select)
//!   url ──┘    (bounded pool)                        └──→ per-scheme / per-country
//! ```
//!
//! # Key Design
//!
//! - **Fan-out/fan-in**: each source fetch is an isolated task; results are
//!   merged in a single-threaded step, so no shared collection is ever
//!   mutated concurrently.
//! - **Two-tier strategies**: concurrent fetch falls back to sequential when
//!   the dispatch machinery itself fails; latency selection falls back to a
//!   static protocol priority when too few probes land. Both tiers are
//!   public and tested independently.
//! - **Quiet degradation**: individual source, decode, identity and probe
//!   failures never abort a batch. The only surfaced error is a run that
//!   produced no descriptors at all.

mod aggregate;
mod categorize;
mod country;
mod dedupe;
mod error;
mod filter;
mod probe;
mod select;

pub use aggregate::{AggregateSummary, Aggregated, Aggregator, AggregatorConfig};
pub use categorize::{Categorized, categorize};
pub use country::categorize_by_country;
pub use dedupe::DedupeSet;
pub use error::PipelineError;
pub use filter::{FilterMetrics, FilterPolicy, QualityFilter};
pub use probe::{AggregatePolicy, Latency, LatencyProber, ProbeResult, ProberConfig};
pub use select::{Selection, Selector, SelectorConfig, rank_by_priority};

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

// Test modules - only compiled during testing
#[cfg(test)]
mod aggregate_test;
#[cfg(test)]
mod country_test;
#[cfg(test)]
mod select_test;
