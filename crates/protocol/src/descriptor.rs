//! Node descriptor - an opaque proxy connection string
//!
//! A descriptor is the unit of data flowing through the whole pipeline. It is
//! immutable once extracted; everything else (scheme, payload, identity,
//! endpoint) is derived from the raw string on demand.

use std::fmt;

use crate::Scheme;

/// A single proxy/relay connection string of the form `<scheme>://<payload>`
///
/// Equality and hashing are raw-string based - semantic equality is handled
/// separately via [`crate::NodeIdentity`].
///
/// # Example
///
/// ```
/// use subtrawl_protocol::{NodeDescriptor, Scheme};
///
/// let node = NodeDescriptor::new("trojan://secret@example.com:443#home");
/// assert_eq!(node.scheme(), Some(Scheme::Trojan));
/// assert_eq!(node.payload(), Some("secret@example.com:443#home"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeDescriptor(String);

impl NodeDescriptor {
    /// Wrap a raw descriptor string
    #[inline]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Get the raw descriptor string
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The token before `://`, if present
    pub fn scheme_token(&self) -> Option<&str> {
        self.0.split_once("://").map(|(token, _)| token)
    }

    /// The registered scheme, if the token is in the registry
    pub fn scheme(&self) -> Option<Scheme> {
        self.scheme_token().and_then(Scheme::from_token)
    }

    /// Everything after `://`, if present
    pub fn payload(&self) -> Option<&str> {
        self.0.split_once("://").map(|(_, payload)| payload)
    }

    /// Whether the descriptor has a registered scheme and a non-trivial payload
    ///
    /// This is the minimal structural check: near-empty payloads are
    /// malformed regardless of scheme.
    pub fn is_well_formed(&self) -> bool {
        self.scheme().is_some()
            && self
                .payload()
                .is_some_and(|p| p.len() >= crate::MIN_PAYLOAD_LENGTH)
    }

    /// The display fragment after `#`, percent-decoded, if present
    ///
    /// Subscription publishers put human-readable names (often with country
    /// markers) here. Absence is normal for JSON-payload schemes.
    pub fn display_name(&self) -> Option<String> {
        let (_, fragment) = self.0.split_once('#')?;
        if fragment.is_empty() {
            return None;
        }
        Some(percent_decode(fragment))
    }
}

impl fmt::Display for NodeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeDescriptor {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NodeDescriptor {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for NodeDescriptor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Decode `%XX` escapes, replacing invalid sequences with the raw bytes
///
/// Fragments are usually UTF-8 percent-encoded; anything that fails to decode
/// is passed through unchanged rather than dropped.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let Some(byte) = std::str::from_utf8(&bytes[i + 1..i + 3])
                .ok()
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
