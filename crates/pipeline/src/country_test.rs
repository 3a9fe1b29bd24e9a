//! Tests for country categorization

use crate::categorize_by_country;
use subtrawl_protocol::NodeDescriptor;

fn node(raw: &str) -> NodeDescriptor {
    NodeDescriptor::new(raw)
}

#[test]
fn test_flag_emoji_marker() {
    // 🇯🇵 percent-encoded in the fragment.
    let nodes = [node(
        "trojan://pw@relay.example.com:443#%F0%9F%87%AF%F0%9F%87%B5%20Tokyo%2001",
    )];
    let buckets = categorize_by_country(&nodes);
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets["JP"].len(), 1);
}

#[test]
fn test_alpha2_code_marker() {
    let nodes = [
        node("trojan://pw@a.example.com:443#SG-premium-01"),
        node("trojan://pw@b.example.com:443#SG%2002"),
    ];
    let buckets = categorize_by_country(&nodes);
    assert_eq!(buckets["SG"].len(), 2);
}

#[test]
fn test_uk_normalizes_to_gb() {
    let nodes = [node("trojan://pw@a.example.com:443#UK%20London")];
    let buckets = categorize_by_country(&nodes);
    assert!(buckets.contains_key("GB"));
}

#[test]
fn test_country_name_marker() {
    let nodes = [node("trojan://pw@a.example.com:443#Japan%20fast%20node")];
    let buckets = categorize_by_country(&nodes);
    assert_eq!(buckets["JP"].len(), 1);
}

#[test]
fn test_lowercase_pairs_are_not_codes() {
    // "de" is a word fragment, not a German marker.
    let nodes = [node("trojan://pw@a.example.com:443#node-de-luxe")];
    let buckets = categorize_by_country(&nodes);
    assert!(buckets.is_empty());
}

#[test]
fn test_unmarked_nodes_land_nowhere() {
    let nodes = [
        node("trojan://pw@a.example.com:443#fast-01"),
        node("vmess://eyJhZGQiOiIxLjIuMy40In0="),
    ];
    let buckets = categorize_by_country(&nodes);
    assert!(buckets.is_empty());
}

#[test]
fn test_mixed_markers_partition() {
    let nodes = [
        node("trojan://pw@a.example.com:443#%F0%9F%87%BA%F0%9F%87%B8%20NYC"),
        node("trojan://pw@b.example.com:443#JP-osaka"),
        node("trojan://pw@c.example.com:443#Singapore%2001"),
        node("trojan://pw@d.example.com:443#unmarked"),
    ];
    let buckets = categorize_by_country(&nodes);
    assert_eq!(buckets.len(), 3);
    assert_eq!(buckets["US"].len(), 1);
    assert_eq!(buckets["JP"].len(), 1);
    assert_eq!(buckets["SG"].len(), 1);
}
