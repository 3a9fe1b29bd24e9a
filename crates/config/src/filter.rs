//! Filter configuration
//!
//! Blacklists are substring matches against the raw descriptor; the
//! allow-list names registered protocol tags.

use serde::Deserialize;

/// Quality filter configuration
///
/// # Example
///
/// ```toml
/// [filter]
/// blacklist_domains = ["tracker.example.com"]
/// blacklist_ips = ["203.0.113.7"]
/// allowed_protocols = ["vless", "vmess", "trojan"]
/// structural_check = true
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Domains rejected by case-insensitive substring match
    pub blacklist_domains: Vec<String>,

    /// IPs rejected by substring match
    pub blacklist_ips: Vec<String>,

    /// When non-empty, only these protocol tags survive
    pub allowed_protocols: Vec<String>,

    /// Verify minimal structural validity per descriptor
    /// Default: true
    pub structural_check: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            blacklist_domains: Vec::new(),
            blacklist_ips: Vec::new(),
            allowed_protocols: Vec::new(),
            structural_check: true,
        }
    }
}

impl FilterConfig {
    /// Combined blacklist (domains then IPs)
    pub fn blacklist(&self) -> Vec<String> {
        self.blacklist_domains
            .iter()
            .chain(self.blacklist_ips.iter())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FilterConfig::default();
        assert!(config.blacklist_domains.is_empty());
        assert!(config.blacklist_ips.is_empty());
        assert!(config.allowed_protocols.is_empty());
    }

    #[test]
    fn test_deserialize_empty_enables_structural_check() {
        let config: FilterConfig = toml::from_str("").unwrap();
        assert!(config.structural_check);
    }

    #[test]
    fn test_combined_blacklist() {
        let toml = r#"
blacklist_domains = ["a.example.com", "b.example.com"]
blacklist_ips = ["203.0.113.7"]
"#;
        let config: FilterConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.blacklist(),
            vec!["a.example.com", "b.example.com", "203.0.113.7"]
        );
    }

    #[test]
    fn test_structural_check_opt_out() {
        let config: FilterConfig = toml::from_str("structural_check = false").unwrap();
        assert!(!config.structural_check);
    }
}
