//! Probe and selection configuration
//!
//! Latency probing is advisory and on by default; when it is disabled or
//! yields too few reachable candidates, selection falls back to the static
//! protocol priority ordering.

use serde::Deserialize;
use std::time::Duration;

/// Hard cap for the derived probe pool size
const MAX_DERIVED_WORKERS: usize = 64;

/// How multiple trial latencies collapse into one value
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AggregateMode {
    /// Mean of the successful trials (default)
    #[default]
    Average,
    /// Fastest successful trial
    Minimum,
}

/// Latency probing and best-N selection configuration
///
/// # Example
///
/// ```toml
/// [probe]
/// enabled = true
/// timeout = "3s"
/// trials = 1
/// max_candidates = 200
/// best_count = 50
/// aggregate = "average"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Probe candidates at all; disabled selection uses priority order only
    /// Default: true
    pub enabled: bool,

    /// Per-connect timeout
    /// Default: 3s
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// Connect trials per candidate
    /// Default: 1
    pub trials: u32,

    /// Concurrent probe limit
    /// Default: none (4x the fetch pool, capped at 64)
    pub workers: Option<usize>,

    /// Upper bound on candidates probed per run
    /// Default: 200
    pub max_candidates: usize,

    /// Size of the best-N selection
    /// Default: 50
    pub best_count: usize,

    /// Finite-latency results required before ranking on latency
    /// Default: none (same as best_count)
    pub min_reachable: Option<usize>,

    /// Trial aggregation policy (average, minimum)
    /// Default: average
    pub aggregate: AggregateMode,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout: Duration::from_secs(3),
            trials: 1,
            workers: None,
            max_candidates: 200,
            best_count: 50,
            min_reachable: None,
            aggregate: AggregateMode::Average,
        }
    }
}

impl ProbeConfig {
    /// Effective probe pool size
    ///
    /// Probes are cheaper per task than fetches, so the derived default is
    /// four times the fetch pool, capped.
    pub fn effective_workers(&self, fetch_workers: usize) -> usize {
        self.workers
            .unwrap_or_else(|| (fetch_workers * 4).min(MAX_DERIVED_WORKERS))
            .max(1)
    }

    /// Effective latency-ranking threshold
    pub fn effective_min_reachable(&self) -> usize {
        self.min_reachable.unwrap_or(self.best_count)
    }
}
