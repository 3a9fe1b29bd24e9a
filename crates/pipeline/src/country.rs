//! Country categorization from display names
//!
//! Subscription publishers tag node names with flag emoji, ISO alpha-2 codes
//! or country names. This is a best-effort partition over those markers:
//! nodes with no recognizable marker are simply absent from every country
//! bucket, never dropped from other outputs.

use std::collections::BTreeMap;

use subtrawl_protocol::NodeDescriptor;

/// First code point of the regional indicator block (🇦)
const REGIONAL_INDICATOR_BASE: u32 = 0x1F1E6;

/// English country names seen in node remarks, mapped to alpha-2 codes
const COUNTRY_NAMES: &[(&str, &str)] = &[
    ("united states", "US"),
    ("america", "US"),
    ("usa", "US"),
    ("japan", "JP"),
    ("singapore", "SG"),
    ("hong kong", "HK"),
    ("hongkong", "HK"),
    ("taiwan", "TW"),
    ("korea", "KR"),
    ("germany", "DE"),
    ("france", "FR"),
    ("united kingdom", "GB"),
    ("britain", "GB"),
    ("netherlands", "NL"),
    ("russia", "RU"),
    ("canada", "CA"),
    ("australia", "AU"),
    ("india", "IN"),
    ("turkey", "TR"),
    ("brazil", "BR"),
    ("vietnam", "VN"),
    ("thailand", "TH"),
    ("malaysia", "MY"),
    ("indonesia", "ID"),
    ("philippines", "PH"),
];

/// Alpha-2 codes accepted as standalone uppercase tokens
const KNOWN_CODES: &[&str] = &[
    "US", "JP", "SG", "HK", "TW", "KR", "DE", "FR", "GB", "UK", "NL", "RU", "CA", "AU", "IN",
    "TR", "BR", "VN", "TH", "MY", "ID", "PH", "AE", "CN", "CH", "SE", "NO", "FI", "IT", "ES",
];

/// Partition nodes by detected country code
///
/// Nodes without a detectable marker appear in no bucket.
pub fn categorize_by_country(nodes: &[NodeDescriptor]) -> BTreeMap<String, Vec<NodeDescriptor>> {
    let mut buckets: BTreeMap<String, Vec<NodeDescriptor>> = BTreeMap::new();

    for node in nodes {
        if let Some(code) = country_of(node) {
            buckets.entry(code).or_default().push(node.clone());
        }
    }

    for (code, bucket) in &buckets {
        tracing::debug!(country = %code, count = bucket.len(), "country bucket");
    }

    buckets
}

/// Detect the country marker in a node's display name
///
/// Marker precedence: flag emoji, then a standalone uppercase alpha-2 code,
/// then an English country name.
fn country_of(node: &NodeDescriptor) -> Option<String> {
    let name = node.display_name()?;

    if let Some(code) = flag_emoji_code(&name) {
        return Some(code);
    }

    if let Some(code) = alpha2_token(&name) {
        return Some(code);
    }

    let lowered = name.to_lowercase();
    COUNTRY_NAMES
        .iter()
        .find(|(needle, _)| lowered.contains(needle))
        .map(|(_, code)| (*code).to_string())
}

/// Two consecutive regional indicator symbols form a flag
fn flag_emoji_code(name: &str) -> Option<String> {
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        if let Some(first) = regional_indicator_letter(c) {
            if let Some(second) = chars.peek().copied().and_then(regional_indicator_letter) {
                return Some(format!("{first}{second}"));
            }
        }
    }
    None
}

fn regional_indicator_letter(c: char) -> Option<char> {
    let offset = (c as u32).checked_sub(REGIONAL_INDICATOR_BASE)?;
    if offset < 26 {
        char::from_u32('A' as u32 + offset)
    } else {
        None
    }
}

/// Standalone uppercase two-letter token from the known code set
///
/// Uppercase-only on purpose: lowercase pairs collide with ordinary words.
fn alpha2_token(name: &str) -> Option<String> {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| token.len() == 2 && token.chars().all(|c| c.is_ascii_uppercase()))
        .find(|token| KNOWN_CODES.contains(token))
        .map(|code| if code == "UK" { "GB".into() } else { code.to_string() })
}
