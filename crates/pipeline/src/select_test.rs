//! Tests for best-N selection
//!
//! Both tiers are exercised independently, then together through `select`.

use std::time::Duration;

use crate::{Latency, ProbeResult, Selection, Selector, SelectorConfig, rank_by_priority};
use subtrawl_protocol::NodeDescriptor;

fn node(raw: &str) -> NodeDescriptor {
    NodeDescriptor::new(raw)
}

fn probe(raw: &str, millis: Option<u64>) -> ProbeResult {
    ProbeResult {
        node: node(raw),
        latency: match millis {
            Some(ms) => Latency::Reachable(Duration::from_millis(ms)),
            None => Latency::Unreachable,
        },
    }
}

// =============================================================================
// Latency tier
// =============================================================================

#[test]
fn test_latency_ranking_takes_fastest_first() {
    let probes = vec![
        probe("trojan://pw@a.example.com:443", Some(50)),
        probe("trojan://pw@b.example.com:443", Some(10)),
        probe("trojan://pw@c.example.com:443", None),
    ];

    let selector = Selector::new(SelectorConfig::default().with_target(2).with_min_reachable(2));
    let Selection {
        nodes,
        used_fallback,
    } = selector.select(probes, &[]);

    assert!(!used_fallback);
    assert_eq!(
        nodes,
        vec![
            node("trojan://pw@b.example.com:443"),
            node("trojan://pw@a.example.com:443"),
        ]
    );
}

#[test]
fn test_latency_ranking_puts_unreachable_last() {
    let probes = vec![
        probe("trojan://pw@dead.example.com:443", None),
        probe("trojan://pw@alive.example.com:443", Some(30)),
    ];

    let selector = Selector::new(SelectorConfig::default().with_min_reachable(1));
    let ranked = selector.rank_by_latency(probes).unwrap();
    assert_eq!(ranked[0], node("trojan://pw@alive.example.com:443"));
    assert_eq!(ranked[1], node("trojan://pw@dead.example.com:443"));
}

#[test]
fn test_latency_ranking_refuses_thin_signal() {
    let probes = vec![
        probe("trojan://pw@a.example.com:443", Some(10)),
        probe("trojan://pw@b.example.com:443", None),
    ];

    let selector = Selector::new(SelectorConfig::default().with_min_reachable(2));
    assert!(selector.rank_by_latency(probes).is_none());
}

// =============================================================================
// Priority tier
// =============================================================================

#[test]
fn test_priority_ranking_follows_static_table() {
    let pool = vec![
        node("http://proxy.example.com:8080/path"),
        node("vless://eyJzb21lIjoiY29uZmlnIn0="),
        node("trojan://pw@relay.example.com:443"),
        node("vmess://eyJhZGQiOiIxLjIuMy40IiwicG9ydCI6NDQzfQ=="),
    ];

    let ranked = rank_by_priority(&pool);
    let schemes: Vec<&str> = ranked
        .iter()
        .map(|n| n.scheme_token().unwrap_or(""))
        .collect();
    assert_eq!(schemes, vec!["vless", "vmess", "trojan", "http"]);
}

#[test]
fn test_priority_ranking_is_stable_within_a_tier() {
    let pool = vec![
        node("trojan://pw@first.example.com:443"),
        node("trojan://pw@second.example.com:443"),
    ];
    let ranked = rank_by_priority(&pool);
    assert_eq!(ranked, pool);
}

// =============================================================================
// Fallback composition
// =============================================================================

#[test]
fn test_select_falls_back_when_probes_insufficient() {
    let probes = vec![probe("trojan://pw@only.example.com:443", Some(10))];
    let pool = vec![
        node("http://proxy.example.com:8080/path"),
        node("vless://eyJzb21lIjoiY29uZmlnIn0="),
        node("trojan://pw@relay.example.com:443"),
    ];

    let selector = Selector::new(SelectorConfig::default().with_target(2).with_min_reachable(5));
    let selection = selector.select(probes, &pool);

    assert!(selection.used_fallback);
    // Fallback ordering is the priority table, not latency.
    assert_eq!(selection.nodes[0].scheme_token(), Some("vless"));
    assert_eq!(selection.nodes[1].scheme_token(), Some("trojan"));
    assert_eq!(selection.nodes.len(), 2);
}

#[test]
fn test_selection_never_exceeds_target() {
    let probes: Vec<ProbeResult> = (0..10)
        .map(|i| probe(&format!("trojan://pw@h{i}.example.com:443"), Some(i)))
        .collect();

    let selector = Selector::new(SelectorConfig::default().with_target(3).with_min_reachable(1));
    let selection = selector.select(probes, &[]);
    assert_eq!(selection.nodes.len(), 3);
}

#[test]
fn test_selection_with_fewer_candidates_than_target() {
    let probes = vec![probe("trojan://pw@a.example.com:443", Some(5))];
    let selector = Selector::new(SelectorConfig::default().with_target(50).with_min_reachable(1));
    let selection = selector.select(probes, &[]);
    assert_eq!(selection.nodes.len(), 1);
}
