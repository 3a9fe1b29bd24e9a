//! Canonical node identity for semantic deduplication
//!
//! Two descriptors that differ only in display name, transport fluff or query
//! parameters frequently point at the same server. The identity is the
//! canonical `(scheme, host, port)` tuple recovered by protocol-family
//! specific decoding; descriptors whose identity cannot be recovered fall
//! back to raw-string deduplication and are never dropped on that account.
//!
//! Resolution is strictly best-effort: bad Base64, missing fields and
//! malformed JSON all yield `None`, never an error.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};

use crate::{NodeDescriptor, ProtocolFamily, Scheme};

/// Canonical `(scheme, host, port)` key for a logical node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeIdentity {
    pub scheme: Scheme,
    pub host: String,
    pub port: u16,
}

impl std::fmt::Display for NodeIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.scheme, self.host, self.port)
    }
}

/// Resolve the canonical identity of a descriptor, if its family allows it
///
/// Returns `None` for opaque protocol families and for any malformed payload.
pub fn resolve_identity(node: &NodeDescriptor) -> Option<NodeIdentity> {
    let scheme = node.scheme()?;
    let payload = node.payload()?;

    match scheme.family() {
        ProtocolFamily::JsonPayload => resolve_json_payload(scheme, payload),
        ProtocolFamily::CredentialHost => resolve_credential_host(scheme, payload),
        ProtocolFamily::Opaque => None,
    }
}

/// Append `=` padding so the length is a multiple of four
///
/// Subscription publishers routinely strip Base64 padding; a length of
/// `4n + 1` is unrepairable and left alone to fail decoding.
pub fn repair_padding(s: &str) -> String {
    match s.len() % 4 {
        2 => format!("{s}=="),
        3 => format!("{s}="),
        _ => s.to_string(),
    }
}

/// Decode Base64 accepting both standard and URL-safe alphabets
pub(crate) fn decode_base64_forgiving(s: &str) -> Option<Vec<u8>> {
    let repaired = repair_padding(s.trim());
    STANDARD
        .decode(&repaired)
        .or_else(|_| URL_SAFE.decode(&repaired))
        .ok()
}

/// vmess/vless style: Base64-wrapped JSON with `add`/`address` + `port`
fn resolve_json_payload(scheme: Scheme, payload: &str) -> Option<NodeIdentity> {
    let bytes = decode_base64_forgiving(payload)?;
    let json: serde_json::Value = serde_json::from_slice(&bytes).ok()?;

    let host = json
        .get("add")
        .or_else(|| json.get("address"))
        .and_then(|v| v.as_str())?
        .trim()
        .to_string();
    if host.is_empty() {
        return None;
    }

    let port = json_port(json.get("port")?)?;
    Some(NodeIdentity { scheme, host, port })
}

/// trojan/shadowsocks style: `credential@host:port` with trailing decoration
fn resolve_credential_host(scheme: Scheme, payload: &str) -> Option<NodeIdentity> {
    let (_, after_at) = payload.split_once('@')?;

    // Strip `#fragment` then `?query` - both may follow the port.
    let trimmed = after_at.split('#').next().unwrap_or(after_at);
    let trimmed = trimmed.split('?').next().unwrap_or(trimmed);

    let (host, port_str) = trimmed.rsplit_once(':')?;
    let host = host.trim();
    if host.is_empty() {
        return None;
    }

    let port: u16 = port_str.parse().ok()?;
    if port == 0 {
        return None;
    }

    Some(NodeIdentity {
        scheme,
        host: host.to_string(),
        port,
    })
}

/// Ports appear as JSON numbers or strings depending on the publisher
fn json_port(value: &serde_json::Value) -> Option<u16> {
    match value {
        serde_json::Value::Number(n) => {
            let n = n.as_u64()?;
            u16::try_from(n).ok().filter(|p| *p > 0)
        }
        serde_json::Value::String(s) => s.trim().parse().ok().filter(|p| *p > 0),
        _ => None,
    }
}
