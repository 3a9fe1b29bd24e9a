//! Configuration error types

use std::io;
use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("failed to read config file '{path}': {source}")]
    Io {
        /// Path to the file
        path: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A source URL is malformed or uses an unsupported scheme
    #[error("invalid source url '{url}': {reason}")]
    InvalidSourceUrl {
        /// The offending URL
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// Allow-list names a protocol the registry does not know
    #[error("filter allow-list references unknown protocol '{protocol}'")]
    UnknownProtocol {
        /// The unrecognized protocol tag
        protocol: String,
    },

    /// A numeric field has a value outside its valid range
    #[error("[{section}] has invalid {field}: {message}")]
    InvalidValue {
        /// Config section
        section: &'static str,
        /// Field name
        field: &'static str,
        /// Error message
        message: String,
    },
}

impl ConfigError {
    /// Create an InvalidSourceUrl error
    pub fn invalid_source_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSourceUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidValue error
    pub fn invalid_value(
        section: &'static str,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            section,
            field,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_source_url_display() {
        let err = ConfigError::invalid_source_url("ftp://x", "only http and https");
        assert!(err.to_string().contains("ftp://x"));
        assert!(err.to_string().contains("only http"));
    }

    #[test]
    fn test_unknown_protocol_display() {
        let err = ConfigError::UnknownProtocol {
            protocol: "warpspeed".into(),
        };
        assert!(err.to_string().contains("warpspeed"));
    }

    #[test]
    fn test_invalid_value_display() {
        let err = ConfigError::invalid_value("probe", "best_count", "must be greater than zero");
        assert!(err.to_string().contains("probe"));
        assert!(err.to_string().contains("best_count"));
    }
}
