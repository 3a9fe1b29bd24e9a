//! Output configuration
//!
//! Controls where artifacts land and how their file names are built. The
//! pipeline itself never touches the filesystem; only the binary's writer
//! reads this section.

use std::path::PathBuf;

use serde::Deserialize;
use subtrawl_protocol::LineEnding;

/// Artifact output configuration
///
/// # Example
///
/// ```toml
/// [output]
/// dir = "subscriptions"
/// all_file = "subscription_all.txt"
/// best_file = "subscription_best.txt"
/// per_protocol = true
/// per_country = false
/// line_ending = "lf"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the artifacts are written into (created if absent)
    /// Default: "subscriptions"
    pub dir: PathBuf,

    /// File name for the all-nodes artifact
    /// Default: "subscription_all.txt"
    pub all_file: String,

    /// File name for the best-N artifact
    /// Default: "subscription_best.txt"
    pub best_file: String,

    /// Write one artifact per non-empty protocol bucket
    /// Default: true
    pub per_protocol: bool,

    /// Write one artifact per detected country bucket
    /// Default: false
    pub per_country: bool,

    /// Line separator inside the encoded artifacts (lf, crlf)
    /// Default: lf
    pub line_ending: LineEnding,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("subscriptions"),
            all_file: "subscription_all.txt".into(),
            best_file: "subscription_best.txt".into(),
            per_protocol: true,
            per_country: false,
            line_ending: LineEnding::Lf,
        }
    }
}

impl OutputConfig {
    /// File name for one protocol bucket
    pub fn protocol_file(&self, tag: &str) -> String {
        format!("subscription_{tag}.txt")
    }

    /// File name for one country bucket
    pub fn country_file(&self, code: &str) -> String {
        format!("subscription_{}.txt", code.to_lowercase())
    }
}
