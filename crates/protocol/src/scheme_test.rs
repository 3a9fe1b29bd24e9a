//! Tests for the scheme registry

use crate::{ProtocolFamily, Scheme};

#[test]
fn test_token_round_trip() {
    for scheme in Scheme::ALL {
        assert_eq!(Scheme::from_token(scheme.as_str()), Some(scheme));
    }
}

#[test]
fn test_from_token_case_insensitive() {
    assert_eq!(Scheme::from_token("VMESS"), Some(Scheme::Vmess));
    assert_eq!(Scheme::from_token("Trojan-Go"), Some(Scheme::TrojanGo));
}

#[test]
fn test_from_token_unknown() {
    assert_eq!(Scheme::from_token("gopher"), None);
    assert_eq!(Scheme::from_token(""), None);
}

#[test]
fn test_no_prefix_ambiguity() {
    // Exact-token matching means the short tags never shadow the long ones.
    assert_eq!(Scheme::from_token("ss"), Some(Scheme::Ss));
    assert_eq!(Scheme::from_token("ssr"), Some(Scheme::Ssr));
    assert_eq!(Scheme::from_token("trojan"), Some(Scheme::Trojan));
    assert_eq!(Scheme::from_token("trojan-go"), Some(Scheme::TrojanGo));
    assert_eq!(Scheme::from_token("hysteria"), Some(Scheme::Hysteria));
    assert_eq!(Scheme::from_token("hysteria2"), Some(Scheme::Hysteria2));
    assert_eq!(Scheme::from_token("http"), Some(Scheme::Http));
    assert_eq!(Scheme::from_token("https"), Some(Scheme::Https));
}

#[test]
fn test_families() {
    assert_eq!(Scheme::Vmess.family(), ProtocolFamily::JsonPayload);
    assert_eq!(Scheme::Vless.family(), ProtocolFamily::JsonPayload);
    assert_eq!(Scheme::Trojan.family(), ProtocolFamily::CredentialHost);
    assert_eq!(Scheme::Ss.family(), ProtocolFamily::CredentialHost);
    assert_eq!(Scheme::Wireguard.family(), ProtocolFamily::Opaque);
    assert_eq!(Scheme::Clash.family(), ProtocolFamily::Opaque);
}

#[test]
fn test_priority_ordering() {
    assert!(Scheme::Vless.priority() > Scheme::Vmess.priority());
    assert!(Scheme::Vmess.priority() > Scheme::Trojan.priority());
    assert!(Scheme::Trojan.priority() > Scheme::Http.priority());
    // Every registered scheme outranks the unregistered floor of 1.
    for scheme in Scheme::ALL {
        assert!(scheme.priority() >= 2, "{scheme}");
    }
}

#[test]
fn test_registry_covers_required_tags() {
    // The registry must stay at or above 15 recognized protocol tags.
    assert!(Scheme::ALL.len() >= 15);
}
