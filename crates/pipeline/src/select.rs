//! Best-N selection
//!
//! Two explicit tiers: rank by probed latency when enough candidates
//! answered, otherwise fall back to the static per-protocol priority table
//! over the full candidate pool. Probing is advisory - it can improve the
//! pick, never block it.

use std::cmp::Reverse;

use subtrawl_protocol::NodeDescriptor;

use crate::probe::ProbeResult;

/// Priority assigned to descriptors whose scheme is not in the registry
const UNREGISTERED_PRIORITY: u8 = 1;

/// Configuration for best-N selection
#[derive(Debug, Clone)]
pub struct SelectorConfig {
    /// How many nodes to select
    pub target: usize,

    /// Minimum finite-latency probe results required to rank on latency
    pub min_reachable: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            target: 50,
            min_reachable: 50,
        }
    }
}

impl SelectorConfig {
    /// Set the selection size
    #[must_use]
    pub fn with_target(mut self, target: usize) -> Self {
        self.target = target;
        self
    }

    /// Set the latency-ranking threshold
    #[must_use]
    pub fn with_min_reachable(mut self, min_reachable: usize) -> Self {
        self.min_reachable = min_reachable;
        self
    }
}

/// Outcome of a selection, with the tier that produced it
#[derive(Debug, Clone)]
pub struct Selection {
    /// The selected nodes, best first, at most `target` of them
    pub nodes: Vec<NodeDescriptor>,

    /// True when the static-priority fallback produced the result
    pub used_fallback: bool,
}

/// Two-tier best-N selector
pub struct Selector {
    config: SelectorConfig,
}

impl Selector {
    /// Create a selector with the given configuration
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    /// Get the selector configuration
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Select the best nodes from probe results, falling back to the static
    /// priority ordering over `pool` when too few probes landed
    pub fn select(&self, probes: Vec<ProbeResult>, pool: &[NodeDescriptor]) -> Selection {
        if let Some(ranked) = self.rank_by_latency(probes) {
            return Selection {
                nodes: truncated(ranked, self.config.target),
                used_fallback: false,
            };
        }

        tracing::warn!(
            min_reachable = self.config.min_reachable,
            "too few reachable probes, selecting by static protocol priority"
        );

        Selection {
            nodes: truncated(rank_by_priority(pool), self.config.target),
            used_fallback: true,
        }
    }

    /// Primary tier: ascending latency, unreachable last
    ///
    /// Returns `None` when fewer than `min_reachable` candidates have a
    /// finite latency - the signal is too thin to rank on.
    pub fn rank_by_latency(&self, mut probes: Vec<ProbeResult>) -> Option<Vec<NodeDescriptor>> {
        let reachable = probes.iter().filter(|p| p.latency.is_reachable()).count();
        if reachable < self.config.min_reachable {
            return None;
        }

        probes.sort_by(|a, b| a.latency.cmp(&b.latency));
        Some(probes.into_iter().map(|p| p.node).collect())
    }
}

/// Fallback tier: static per-protocol priority, descending
///
/// Stable sort, so the pool's original order breaks ties.
pub fn rank_by_priority(pool: &[NodeDescriptor]) -> Vec<NodeDescriptor> {
    let mut nodes = pool.to_vec();
    nodes.sort_by_key(|node| {
        Reverse(
            node.scheme()
                .map(|s| s.priority())
                .unwrap_or(UNREGISTERED_PRIORITY),
        )
    });
    nodes
}

fn truncated(mut nodes: Vec<NodeDescriptor>, target: usize) -> Vec<NodeDescriptor> {
    nodes.truncate(target);
    nodes
}
