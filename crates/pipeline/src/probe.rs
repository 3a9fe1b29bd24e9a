//! Latency probing via bounded-time TCP connects
//!
//! Probing is opportunistic reachability, not protocol validation: one TCP
//! connect per trial against the descriptor's resolved endpoint. Unreachable
//! is a first-class terminal value that sorts after every finite latency -
//! a candidate that cannot even resolve an endpoint is recorded unreachable
//! without a connection attempt and never blocks the batch.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::net::TcpStream;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use subtrawl_protocol::{Endpoint, NodeDescriptor, resolve_endpoint};

/// Probe outcome for one candidate
///
/// `Reachable` carries the aggregated connect latency; `Unreachable` orders
/// after all finite latencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Latency {
    Reachable(Duration),
    Unreachable,
}

impl Latency {
    /// Whether the candidate answered at least one trial
    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Reachable(_))
    }
}

impl Ord for Latency {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (self, other) {
            (Self::Reachable(a), Self::Reachable(b)) => a.cmp(b),
            (Self::Reachable(_), Self::Unreachable) => std::cmp::Ordering::Less,
            (Self::Unreachable, Self::Reachable(_)) => std::cmp::Ordering::Greater,
            (Self::Unreachable, Self::Unreachable) => std::cmp::Ordering::Equal,
        }
    }
}

impl PartialOrd for Latency {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// How multiple trial latencies collapse into one value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AggregatePolicy {
    /// Mean of the successful trials
    #[default]
    Average,
    /// Fastest successful trial
    Minimum,
}

/// One probed candidate
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub node: NodeDescriptor,
    pub latency: Latency,
}

/// Configuration for the latency prober
#[derive(Debug, Clone)]
pub struct ProberConfig {
    /// Per-connect timeout
    pub timeout: Duration,

    /// Connect trials per candidate; failures within a trial are skipped,
    /// not retried
    pub trials: u32,

    /// Concurrent probe limit (probes are cheap, so this pool is sized
    /// larger than the fetch pool)
    pub workers: usize,

    /// Upper bound on how many candidates get probed at all
    pub max_candidates: usize,

    /// Trial aggregation policy
    pub policy: AggregatePolicy,
}

impl Default for ProberConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(3),
            trials: 1,
            workers: 40,
            max_candidates: 200,
            policy: AggregatePolicy::Average,
        }
    }
}

impl ProberConfig {
    /// Set the per-connect timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the trial count per candidate
    #[must_use]
    pub fn with_trials(mut self, trials: u32) -> Self {
        self.trials = trials;
        self
    }

    /// Set the concurrent probe limit
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the candidate cap
    #[must_use]
    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    /// Set the aggregation policy
    #[must_use]
    pub fn with_policy(mut self, policy: AggregatePolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Concurrent TCP latency prober
pub struct LatencyProber {
    config: ProberConfig,
}

impl LatencyProber {
    /// Create a prober with the given configuration
    pub fn new(config: ProberConfig) -> Self {
        Self { config }
    }

    /// Get the prober configuration
    pub fn config(&self) -> &ProberConfig {
        &self.config
    }

    /// Probe up to `max_candidates` descriptors concurrently
    ///
    /// Returns exactly one result per probed candidate. Results arrive in
    /// completion order; callers sort.
    pub async fn probe_all(&self, nodes: &[NodeDescriptor]) -> Vec<ProbeResult> {
        let capped = &nodes[..nodes.len().min(self.config.max_candidates)];
        if capped.len() < nodes.len() {
            tracing::info!(
                probed = capped.len(),
                total = nodes.len(),
                "candidate list capped for probing"
            );
        }

        // Pre-fill with Unreachable so every candidate has an outcome even
        // if its task dies.
        let mut results: Vec<ProbeResult> = capped
            .iter()
            .map(|node| ProbeResult {
                node: node.clone(),
                latency: Latency::Unreachable,
            })
            .collect();

        let semaphore = Arc::new(Semaphore::new(self.config.workers.max(1)));
        let mut tasks: JoinSet<(usize, Latency)> = JoinSet::new();

        for (index, node) in capped.iter().enumerate() {
            let Some(endpoint) = resolve_endpoint(node) else {
                tracing::debug!(node = %node, "no endpoint resolved, recorded unreachable");
                continue;
            };

            let semaphore = Arc::clone(&semaphore);
            let timeout = self.config.timeout;
            let trials = self.config.trials;
            let policy = self.config.policy;

            tasks.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return (index, Latency::Unreachable);
                };
                (index, probe_endpoint(&endpoint, timeout, trials, policy).await)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, latency)) => results[index].latency = latency,
                Err(e) => tracing::error!(error = %e, "probe task failed, candidate stays unreachable"),
            }
        }

        let reachable = results.iter().filter(|r| r.latency.is_reachable()).count();
        tracing::info!(
            probed = results.len(),
            reachable,
            unreachable = results.len() - reachable,
            "latency probing finished"
        );

        results
    }
}

/// Probe one endpoint: `trials` bounded-time connects, aggregated
async fn probe_endpoint(
    endpoint: &Endpoint,
    timeout: Duration,
    trials: u32,
    policy: AggregatePolicy,
) -> Latency {
    let mut samples = Vec::with_capacity(trials as usize);

    for _ in 0..trials.max(1) {
        if let Some(elapsed) = connect_once(endpoint, timeout).await {
            samples.push(elapsed);
        }
    }

    if samples.is_empty() {
        Latency::Unreachable
    } else {
        Latency::Reachable(aggregate_samples(&samples, policy))
    }
}

/// One timed TCP connect attempt
async fn connect_once(endpoint: &Endpoint, timeout: Duration) -> Option<Duration> {
    let start = Instant::now();
    match tokio::time::timeout(
        timeout,
        TcpStream::connect((endpoint.host.as_str(), endpoint.port)),
    )
    .await
    {
        Ok(Ok(_stream)) => Some(start.elapsed()),
        Ok(Err(_)) | Err(_) => None,
    }
}

/// Collapse successful trial samples per the configured policy
pub(crate) fn aggregate_samples(samples: &[Duration], policy: AggregatePolicy) -> Duration {
    match policy {
        AggregatePolicy::Average => {
            let total: Duration = samples.iter().sum();
            total / samples.len() as u32
        }
        AggregatePolicy::Minimum => samples.iter().copied().min().unwrap_or_default(),
    }
}
