//! Protocol categorization
//!
//! Partitions a node set by scheme tag for the per-protocol subscription
//! artifacts. Descriptors whose scheme token is not in the registry land in
//! the `other` bucket rather than being dropped.

use std::collections::BTreeMap;

use subtrawl_protocol::{NodeDescriptor, Scheme};

/// Bucket name for descriptors with an unregistered scheme
pub const OTHER_BUCKET: &str = "other";

/// A node set partitioned by scheme
#[derive(Debug, Default)]
pub struct Categorized {
    by_scheme: BTreeMap<Scheme, Vec<NodeDescriptor>>,
    other: Vec<NodeDescriptor>,
}

impl Categorized {
    /// Nodes for one scheme, if any landed there
    pub fn get(&self, scheme: Scheme) -> Option<&[NodeDescriptor]> {
        self.by_scheme.get(&scheme).map(Vec::as_slice)
    }

    /// Nodes with an unregistered scheme
    pub fn other(&self) -> &[NodeDescriptor] {
        &self.other
    }

    /// Non-empty buckets as `(tag, nodes)`, schemes first, `other` last
    pub fn buckets(&self) -> Vec<(&'static str, &[NodeDescriptor])> {
        let mut buckets: Vec<(&'static str, &[NodeDescriptor])> = self
            .by_scheme
            .iter()
            .map(|(scheme, nodes)| (scheme.as_str(), nodes.as_slice()))
            .collect();
        if !self.other.is_empty() {
            buckets.push((OTHER_BUCKET, self.other.as_slice()));
        }
        buckets
    }

    /// Total nodes across all buckets
    pub fn len(&self) -> usize {
        self.by_scheme.values().map(Vec::len).sum::<usize>() + self.other.len()
    }

    /// Whether every bucket is empty
    pub fn is_empty(&self) -> bool {
        self.by_scheme.is_empty() && self.other.is_empty()
    }
}

/// Partition nodes by scheme tag, preserving order within each bucket
pub fn categorize(nodes: &[NodeDescriptor]) -> Categorized {
    let mut categorized = Categorized::default();

    for node in nodes {
        match node.scheme() {
            Some(scheme) => categorized
                .by_scheme
                .entry(scheme)
                .or_default()
                .push(node.clone()),
            None => categorized.other.push(node.clone()),
        }
    }

    for (tag, bucket) in categorized.buckets() {
        tracing::debug!(tag, count = bucket.len(), "categorized bucket");
    }

    categorized
}
