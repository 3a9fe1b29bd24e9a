//! Source aggregation - bounded fan-out with a sequential fallback
//!
//! One fetch task per source URL runs on a semaphore-bounded pool; results
//! are collected in completion order and merged into the deduplicated set in
//! a single-threaded step. Individual source failures are routine and only
//! affect accounting. If the concurrent dispatch machinery itself fails (a
//! panicked task, a poisoned runtime), the whole batch is refetched strictly
//! sequentially before giving up.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};

use subtrawl_protocol::NodeDescriptor;
use subtrawl_sources::{SourceFetcher, SourceResult};

use crate::dedupe::DedupeSet;
use crate::error::PipelineError;
use crate::Result;

/// Configuration for the aggregator
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Concurrent fetch limit
    pub workers: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self { workers: 10 }
    }
}

impl AggregatorConfig {
    /// Set the concurrent fetch limit
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}

/// Per-run accounting, reported after the merge
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregateSummary {
    /// Sources attempted
    pub sources_total: usize,
    /// Sources that yielded at least one descriptor
    pub sources_succeeded: usize,
    /// Sources that stayed empty (error or zero extraction)
    pub sources_failed: usize,
    /// Descriptors extracted across all sources, before dedup
    pub nodes_extracted: usize,
    /// Descriptors surviving dedup
    pub nodes_unique: usize,
    /// Exact-string repeats dropped in the merge
    pub raw_duplicates: u64,
    /// Identity-level repeats dropped in the merge
    pub identity_duplicates: u64,
}

/// The merged, deduplicated output of one aggregation run
#[derive(Debug)]
pub struct Aggregated {
    /// Unique descriptors in merge order
    pub nodes: Vec<NodeDescriptor>,
    /// Accounting for logging and reporting
    pub summary: AggregateSummary,
}

/// Fans source fetches out over a bounded pool and merges the results
pub struct Aggregator {
    fetcher: Arc<SourceFetcher>,
    config: AggregatorConfig,
}

impl Aggregator {
    /// Create an aggregator around a fetcher
    pub fn new(fetcher: SourceFetcher, config: AggregatorConfig) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            config,
        }
    }

    /// Fetch every source and merge into a deduplicated set
    ///
    /// The only error is a run that produced no descriptors at all; every
    /// lesser failure degrades quietly into the summary counts.
    pub async fn aggregate(&self, sources: &[String]) -> Result<Aggregated> {
        if sources.is_empty() {
            return Err(PipelineError::NoNodes { sources: 0 });
        }

        tracing::info!(
            sources = sources.len(),
            workers = self.config.workers,
            "aggregating sources"
        );

        let results = match self.fetch_concurrent(sources).await {
            Ok(results) => results,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    "concurrent fetch machinery failed, refetching sequentially"
                );
                self.fetch_sequential(sources).await
            }
        };

        let mut summary = AggregateSummary {
            sources_total: sources.len(),
            ..Default::default()
        };
        let mut set = DedupeSet::new();

        for result in results {
            if result.is_productive() {
                summary.sources_succeeded += 1;
            } else {
                summary.sources_failed += 1;
            }
            summary.nodes_extracted += result.nodes.len();
            set.extend(result.nodes);
        }

        summary.raw_duplicates = set.raw_duplicates();
        summary.identity_duplicates = set.identity_duplicates();
        summary.nodes_unique = set.len();

        tracing::info!(
            succeeded = summary.sources_succeeded,
            failed = summary.sources_failed,
            extracted = summary.nodes_extracted,
            unique = summary.nodes_unique,
            raw_duplicates = summary.raw_duplicates,
            identity_duplicates = summary.identity_duplicates,
            "aggregation finished"
        );

        if set.is_empty() {
            return Err(PipelineError::NoNodes {
                sources: sources.len(),
            });
        }

        Ok(Aggregated {
            nodes: set.into_nodes(),
            summary,
        })
    }

    /// Primary tier: one task per source on a bounded pool
    ///
    /// Results come back in completion order. A `JoinError` aborts the tier
    /// (dropping the set cancels the stragglers) so the caller can fall back.
    pub async fn fetch_concurrent(
        &self,
        sources: &[String],
    ) -> std::result::Result<Vec<SourceResult>, JoinError> {
        let semaphore = Arc::new(Semaphore::new(self.config.workers.max(1)));
        let mut tasks: JoinSet<SourceResult> = JoinSet::new();

        for url in sources {
            let fetcher = Arc::clone(&self.fetcher);
            let semaphore = Arc::clone(&semaphore);
            let url = url.clone();

            tasks.spawn(async move {
                // The semaphore is never closed; a failed acquire just means
                // the fetch proceeds without bounding.
                let _permit = semaphore.acquire_owned().await;
                fetcher.fetch(&url).await
            });
        }

        let mut results = Vec::with_capacity(sources.len());
        while let Some(joined) = tasks.join_next().await {
            results.push(joined?);
        }
        Ok(results)
    }

    /// Fallback tier: strictly sequential fetching
    pub async fn fetch_sequential(&self, sources: &[String]) -> Vec<SourceResult> {
        tracing::info!(sources = sources.len(), "fetching sources sequentially");

        let mut results = Vec::with_capacity(sources.len());
        for url in sources {
            results.push(self.fetcher.fetch(url).await);
        }
        results
    }
}
