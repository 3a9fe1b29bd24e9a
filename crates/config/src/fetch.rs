//! Fetch configuration
//!
//! Controls the source fetch pool: per-attempt timeout, retry budget and
//! concurrency. The timeout doubles as the pause between attempts.

use serde::Deserialize;
use std::time::Duration;

/// Source fetching configuration
///
/// # Example
///
/// ```toml
/// [fetch]
/// timeout = "5s"
/// max_retry = 2
/// workers = 10
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-attempt request timeout, also the inter-attempt pause
    /// Default: 5s
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// Extra attempts after the first failure
    /// Default: 2
    pub max_retry: u32,

    /// Concurrent source fetch limit
    /// Default: 10
    pub workers: usize,

    /// User-Agent header sent with every request
    /// Default: a browser-like string (some mirrors reject unknown agents)
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            max_retry: 2,
            workers: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".into(),
        }
    }
}
