//! Source fetching with retry
//!
//! One fetcher instance serves the whole run; the underlying HTTP client is
//! built once with the configured timeout and User-Agent. Each source is
//! fetched with linear backoff: on any attempt failure (network error,
//! non-success status, empty extraction) the fetcher sleeps for the timeout
//! duration and tries again, up to `max_retry` extra attempts.
//!
//! A source never blocks longer than `(max_retry + 1) * (timeout + request)`,
//! and a source that stays empty is a quiet failure: the batch goes on.

use std::time::Duration;

use subtrawl_protocol::NodeDescriptor;

use crate::error::SourceError;
use crate::{Result, decode_payload, extract_nodes};

/// Configuration for the source fetcher
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Per-attempt request timeout; also the pause between attempts
    pub timeout: Duration,

    /// Extra attempts after the first failure
    pub max_retry: u32,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            max_retry: 2,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".into(),
        }
    }
}

impl FetcherConfig {
    /// Set the per-attempt timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry budget
    #[must_use]
    pub fn with_max_retry(mut self, max_retry: u32) -> Self {
        self.max_retry = max_retry;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Outcome of fetching one source
///
/// Either a node list (possibly empty) or an empty list with an error marker;
/// `nodes` non-empty and `error` set never coexist.
#[derive(Debug, Clone)]
pub struct SourceResult {
    /// The source URL this result belongs to
    pub url: String,

    /// Descriptors extracted from the source, in payload order
    pub nodes: Vec<NodeDescriptor>,

    /// Last failure, when no descriptors were obtained
    pub error: Option<String>,
}

impl SourceResult {
    fn success(url: impl Into<String>, nodes: Vec<NodeDescriptor>) -> Self {
        Self {
            url: url.into(),
            nodes,
            error: None,
        }
    }

    fn failed(url: impl Into<String>, error: impl ToString) -> Self {
        Self {
            url: url.into(),
            nodes: Vec::new(),
            error: Some(error.to_string()),
        }
    }

    /// Whether the source yielded at least one descriptor
    pub fn is_productive(&self) -> bool {
        !self.nodes.is_empty()
    }
}

/// Fetches one source's descriptor list over HTTP
pub struct SourceFetcher {
    config: FetcherConfig,
    client: reqwest::Client,
}

impl SourceFetcher {
    /// Create a fetcher; builds the shared HTTP client
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { config, client })
    }

    /// Get the fetcher configuration
    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Fetch one source, retrying until descriptors appear or the budget runs out
    ///
    /// Never returns an error: exhausted retries produce an empty result with
    /// an error marker for accounting.
    pub async fn fetch(&self, url: &str) -> SourceResult {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            let err = SourceError::InvalidUrl {
                url: url.to_string(),
            };
            tracing::warn!(url = %url, "skipping source with unsupported scheme");
            return SourceResult::failed(url, err);
        }

        let attempts = self.config.max_retry + 1;
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            if attempt > 1 {
                tokio::time::sleep(self.config.timeout).await;
            }

            tracing::debug!(url = %url, attempt, max_attempts = attempts, "fetching source");

            match self.attempt(url).await {
                Ok(nodes) => {
                    tracing::info!(url = %url, count = nodes.len(), "source yielded descriptors");
                    return SourceResult::success(url, nodes);
                }
                Err(e) => {
                    last_error = e.to_string();
                    tracing::debug!(
                        url = %url,
                        attempt,
                        max_attempts = attempts,
                        error = %e,
                        "fetch attempt failed"
                    );
                }
            }
        }

        tracing::warn!(url = %url, error = %last_error, "source exhausted retries without descriptors");
        SourceResult::failed(url, last_error)
    }

    /// One fetch attempt: request, decode, extract
    async fn attempt(&self, url: &str) -> Result<Vec<NodeDescriptor>> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let plaintext = decode_payload(&body);
        let nodes = extract_nodes(&plaintext);

        if nodes.is_empty() {
            return Err(SourceError::NoNodes);
        }

        Ok(nodes)
    }
}
