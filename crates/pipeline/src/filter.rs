//! Quality filter - drop unwanted descriptors
//!
//! Applied to the deduplicated set before ranking and output. Checks run in
//! a fixed order and short-circuit: blacklist match, allow-list violation,
//! structural invalidity - the first failure rejects the descriptor.

use std::sync::atomic::{AtomicU64, Ordering};

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};

use subtrawl_protocol::{NodeDescriptor, ProtocolFamily, Scheme, repair_padding};

/// Filtering policy
///
/// An empty blacklist and `None` allow-list pass everything through (except
/// structurally broken descriptors when the check is enabled).
#[derive(Debug, Clone)]
pub struct FilterPolicy {
    /// Domains and IPs rejected by case-insensitive substring match
    pub blacklist: Vec<String>,

    /// When set, only these schemes survive
    pub allowed_schemes: Option<Vec<Scheme>>,

    /// Verify minimal structural validity per descriptor
    pub structural_check: bool,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            blacklist: Vec::new(),
            allowed_schemes: None,
            structural_check: true,
        }
    }
}

/// Metrics for the quality filter
#[derive(Debug, Default)]
pub struct FilterMetrics {
    /// Descriptors checked
    pub checked: AtomicU64,
    /// Descriptors that passed every active check
    pub passed: AtomicU64,
    /// Rejected by blacklist substring match
    pub blacklisted: AtomicU64,
    /// Rejected by the protocol allow-list
    pub scheme_rejected: AtomicU64,
    /// Rejected by the structural validity check
    pub malformed: AtomicU64,
}

impl FilterMetrics {
    /// Fraction of checked descriptors that were dropped (0.0 - 1.0)
    pub fn drop_rate(&self) -> f64 {
        let checked = self.checked.load(Ordering::Relaxed);
        let passed = self.passed.load(Ordering::Relaxed);
        if checked == 0 {
            0.0
        } else {
            (checked - passed) as f64 / checked as f64
        }
    }
}

/// Why a descriptor was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RejectReason {
    Blacklisted,
    SchemeNotAllowed,
    Malformed,
}

impl RejectReason {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Blacklisted => "blacklisted",
            Self::SchemeNotAllowed => "scheme not allowed",
            Self::Malformed => "malformed",
        }
    }
}

/// Quality filter over a deduplicated descriptor set
pub struct QualityFilter {
    policy: FilterPolicy,
    metrics: FilterMetrics,
}

impl QualityFilter {
    /// Create a filter; blacklist entries are lowercased once here
    pub fn new(mut policy: FilterPolicy) -> Self {
        for entry in &mut policy.blacklist {
            *entry = entry.to_lowercase();
        }
        Self {
            policy,
            metrics: FilterMetrics::default(),
        }
    }

    /// Get filter metrics
    pub fn metrics(&self) -> &FilterMetrics {
        &self.metrics
    }

    /// Apply the policy, keeping input order of the survivors
    pub fn apply(&self, nodes: Vec<NodeDescriptor>) -> Vec<NodeDescriptor> {
        let mut kept = Vec::with_capacity(nodes.len());

        for node in nodes {
            self.metrics.checked.fetch_add(1, Ordering::Relaxed);

            match self.evaluate(&node) {
                None => {
                    self.metrics.passed.fetch_add(1, Ordering::Relaxed);
                    kept.push(node);
                }
                Some(reason) => {
                    tracing::debug!(node = %node, reason = reason.as_str(), "descriptor filtered");
                }
            }
        }

        kept
    }

    /// Evaluate one descriptor; `None` means it passes
    ///
    /// Check order is fixed and short-circuiting.
    fn evaluate(&self, node: &NodeDescriptor) -> Option<RejectReason> {
        if self.is_blacklisted(node) {
            self.metrics.blacklisted.fetch_add(1, Ordering::Relaxed);
            return Some(RejectReason::Blacklisted);
        }

        if let Some(allowed) = &self.policy.allowed_schemes {
            if !node.scheme().is_some_and(|s| allowed.contains(&s)) {
                self.metrics.scheme_rejected.fetch_add(1, Ordering::Relaxed);
                return Some(RejectReason::SchemeNotAllowed);
            }
        }

        if self.policy.structural_check && !is_structurally_valid(node) {
            self.metrics.malformed.fetch_add(1, Ordering::Relaxed);
            return Some(RejectReason::Malformed);
        }

        None
    }

    fn is_blacklisted(&self, node: &NodeDescriptor) -> bool {
        if self.policy.blacklist.is_empty() {
            return false;
        }
        let lowered = node.as_str().to_lowercase();
        self.policy
            .blacklist
            .iter()
            .any(|entry| lowered.contains(entry))
    }
}

/// Minimal structural check
///
/// Registered scheme with a non-trivial payload; for the JSON-payload family
/// the payload must additionally decode into valid JSON.
fn is_structurally_valid(node: &NodeDescriptor) -> bool {
    if !node.is_well_formed() {
        return false;
    }

    let Some(scheme) = node.scheme() else {
        return false;
    };

    if scheme.family() == ProtocolFamily::JsonPayload {
        let Some(payload) = node.payload() else {
            return false;
        };
        let repaired = repair_padding(payload.trim());
        let Ok(bytes) = STANDARD
            .decode(&repaired)
            .or_else(|_| URL_SAFE.decode(&repaired))
        else {
            return false;
        };
        return serde_json::from_slice::<serde_json::Value>(&bytes).is_ok();
    }

    true
}
