//! Tests for node extraction

use crate::extract_nodes;

#[test]
fn test_extracts_known_schemes() {
    let text = "\
vmess://eyJhZGQiOiIxLjIuMy40IiwicG9ydCI6NDQzfQ==
trojan://pw@relay.example.com:443#Tokyo
ss://YWVzLTI1Ni1nY206cHc=@10.0.0.1:8388";
    let nodes = extract_nodes(text);
    assert_eq!(nodes.len(), 3);
    assert!(nodes[0].as_str().starts_with("vmess://"));
    assert!(nodes[1].as_str().starts_with("trojan://"));
    assert!(nodes[2].as_str().starts_with("ss://"));
}

#[test]
fn test_preserves_input_order() {
    let text = "trojan://pw@b.example.com:443 trojan://pw@a.example.com:443";
    let nodes = extract_nodes(text);
    assert_eq!(nodes[0].as_str(), "trojan://pw@b.example.com:443");
    assert_eq!(nodes[1].as_str(), "trojan://pw@a.example.com:443");
}

#[test]
fn test_dedupes_exact_repeats_within_source() {
    let text = "\
trojan://pw@relay.example.com:443
trojan://pw@relay.example.com:443
trojan://pw@other.example.com:443";
    let nodes = extract_nodes(text);
    assert_eq!(nodes.len(), 2);
}

#[test]
fn test_skips_unknown_schemes() {
    let text = "gopher://old.example.com/1 trojan://pw@relay.example.com:443";
    let nodes = extract_nodes(text);
    assert_eq!(nodes.len(), 1);
    assert!(nodes[0].as_str().starts_with("trojan://"));
}

#[test]
fn test_rejects_near_empty_payloads() {
    let text = "vmess:// vmess://abc trojan://pw@relay.example.com:443";
    let nodes = extract_nodes(text);
    assert_eq!(nodes.len(), 1);
}

#[test]
fn test_descriptors_embedded_in_prose() {
    // Descriptors pasted mid-sentence still extract, delimited by whitespace.
    let text = "updated daily: trojan://pw@relay.example.com:443 enjoy!";
    let nodes = extract_nodes(text);
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].as_str(), "trojan://pw@relay.example.com:443");
}

#[test]
fn test_empty_and_nodeless_input() {
    assert!(extract_nodes("").is_empty());
    assert!(extract_nodes("just some text\nwith lines").is_empty());
}
