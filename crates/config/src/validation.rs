//! Configuration validation
//!
//! Runs after parse, before anything network-facing is built. Catches the
//! mistakes that would otherwise surface as confusing mid-run behavior:
//! unusable source URLs, allow-list typos, zero-sized pools.

use subtrawl_protocol::Scheme;
use url::Url;

use crate::{Config, ConfigError, Result};

/// Validate a parsed configuration
pub fn validate_config(config: &Config) -> Result<()> {
    for source in &config.sources {
        validate_source_url(source)?;
    }

    for protocol in &config.filter.allowed_protocols {
        if Scheme::from_token(protocol).is_none() {
            return Err(ConfigError::UnknownProtocol {
                protocol: protocol.clone(),
            });
        }
    }

    if config.fetch.workers == 0 {
        return Err(ConfigError::invalid_value(
            "fetch",
            "workers",
            "must be greater than zero",
        ));
    }

    if config.probe.best_count == 0 {
        return Err(ConfigError::invalid_value(
            "probe",
            "best_count",
            "must be greater than zero",
        ));
    }

    if config.probe.max_candidates == 0 {
        return Err(ConfigError::invalid_value(
            "probe",
            "max_candidates",
            "must be greater than zero",
        ));
    }

    if config.probe.trials == 0 {
        return Err(ConfigError::invalid_value(
            "probe",
            "trials",
            "must be greater than zero",
        ));
    }

    Ok(())
}

/// A source must be an absolute http(s) URL with a host
fn validate_source_url(source: &str) -> Result<()> {
    let url = Url::parse(source)
        .map_err(|e| ConfigError::invalid_source_url(source, e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ConfigError::invalid_source_url(
                source,
                format!("unsupported scheme '{other}', only http and https"),
            ));
        }
    }

    if url.host_str().is_none() {
        return Err(ConfigError::invalid_source_url(source, "missing host"));
    }

    Ok(())
}
