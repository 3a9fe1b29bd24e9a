//! Subtrawl Configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! Minimal config should just work - a bare source list is enough:
//!
//! ```toml
//! sources = [
//!     "https://mirror-a.example.com/sub.txt",
//!     "https://mirror-b.example.com/nodes",
//! ]
//! ```
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use subtrawl_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("sources = [\"https://example.com/sub\"]").unwrap();
//! assert_eq!(config.sources.len(), 1);
//! ```
//!
//! # Example Full Config
//!
//! ```toml
//! sources = ["https://mirror.example.com/sub.txt"]
//!
//! [fetch]
//! timeout = "5s"
//! max_retry = 2
//! workers = 10
//!
//! [probe]
//! enabled = true
//! timeout = "3s"
//! trials = 1
//! best_count = 50
//! aggregate = "average"
//!
//! [filter]
//! blacklist_domains = ["tracker.example.com"]
//! allowed_protocols = ["vless", "vmess", "trojan"]
//!
//! [output]
//! dir = "subscriptions"
//! per_protocol = true
//! line_ending = "lf"
//!
//! [log]
//! level = "info"
//! ```

mod error;
mod fetch;
mod filter;
mod logging;
mod output;
mod probe;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use error::{ConfigError, Result};
pub use fetch::FetchConfig;
pub use filter::FilterConfig;
pub use logging::{LogConfig, LogLevel};
pub use output::OutputConfig;
pub use probe::{AggregateMode, ProbeConfig};

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults; only `sources` must be
/// non-empty for a run to make sense.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source URLs expected to serve node descriptors
    pub sources: Vec<String>,

    /// Fetching behavior (timeouts, retries, pool size)
    pub fetch: FetchConfig,

    /// Latency probing and best-N selection
    pub probe: ProbeConfig,

    /// Blacklists, allow-list, structural validity
    pub filter: FilterConfig,

    /// Artifact layout (directory, file names, line ending)
    pub output: OutputConfig,

    /// Logging configuration
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, contains invalid TOML, or
    /// fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// Checks source URLs, allow-list entries and numeric bounds. An empty
    /// source list is allowed here - the binary decides whether that is fatal
    /// for the subcommand being run.
    fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
