//! Best-effort `(host, port)` resolution for reachability probing
//!
//! Probing only needs somewhere to point a TCP connect at. Resolution tries
//! progressively weaker strategies: the canonical identity first, then regex
//! sweeps over the decoded payload and the raw string. A descriptor that
//! yields nothing here is simply recorded unreachable by the prober.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::identity::decode_base64_forgiving;
use crate::{DEFAULT_PROBE_PORT, NodeDescriptor, resolve_identity};

/// A probe target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// `host:port` after `@` or `://` in the raw descriptor
static HOST_PORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:@|://)([A-Za-z0-9][A-Za-z0-9.-]*):(\d{1,5})").unwrap());

/// Bare `host` after `@` or `://` - a dot is required so that Base64 payload
/// text (whose alphabet has no `.`) can never masquerade as a hostname
static HOST_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:@|://)([A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)+)").unwrap());

/// Server field inside a decoded payload, JSON or loosely key=value shaped
static PAYLOAD_HOST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?:server|add|address|host)"?\s*[:=]\s*"?([A-Za-z0-9.-]+)"#).unwrap());

/// Port field inside a decoded payload
static PAYLOAD_PORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"port"?\s*[:=]\s*"?(\d{1,5})"#).unwrap());

/// Resolve the probe endpoint for a descriptor
///
/// Strategy order:
/// 1. canonical identity (exact for the JSON and credential families)
/// 2. host/port fields regex-matched inside the Base64-decoded payload
/// 3. `host:port` pattern in the raw string
/// 4. bare dotted host in the raw string, with the default port
pub fn resolve_endpoint(node: &NodeDescriptor) -> Option<Endpoint> {
    if let Some(id) = resolve_identity(node) {
        return Some(Endpoint {
            host: id.host,
            port: id.port,
        });
    }

    if let Some(ep) = endpoint_from_decoded_payload(node) {
        return Some(ep);
    }

    let raw = node.as_str();
    if let Some(caps) = HOST_PORT.captures(raw) {
        if let Some(port) = parse_port(&caps[2]) {
            return Some(Endpoint {
                host: caps[1].to_string(),
                port,
            });
        }
    }

    HOST_ONLY.captures(raw).map(|caps| Endpoint {
        host: caps[1].to_string(),
        port: DEFAULT_PROBE_PORT,
    })
}

/// Sweep the decoded payload for server/port fields
///
/// Catches payloads that are almost JSON (truncated, trailing commas) where
/// strict identity resolution already gave up.
fn endpoint_from_decoded_payload(node: &NodeDescriptor) -> Option<Endpoint> {
    let payload = node.payload()?;
    let decoded = decode_base64_forgiving(payload)?;
    let text = String::from_utf8_lossy(&decoded);

    let host = PAYLOAD_HOST.captures(&text)?[1].to_string();
    let port = PAYLOAD_PORT
        .captures(&text)
        .and_then(|caps| parse_port(&caps[1]))
        .unwrap_or(DEFAULT_PROBE_PORT);

    Some(Endpoint { host, port })
}

fn parse_port(s: &str) -> Option<u16> {
    s.parse::<u16>().ok().filter(|p| *p > 0)
}
