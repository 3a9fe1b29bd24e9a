//! Subscription wire format
//!
//! A subscription artifact is the node list joined with a line separator and
//! Base64-encoded (RFC 4648, standard alphabet, no line wrapping). Clients
//! decode and split to recover the exact ordered list, so the encoding must
//! round-trip byte-for-byte.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::{NodeDescriptor, ProtocolError, Result};

/// Line separator used when joining descriptors
///
/// LF is the common form; CRLF exists for clients that require it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    /// The separator string
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }
}

/// A named, write-once subscription artifact
///
/// Holds the ordered descriptor list together with its wire encoding; built
/// once per output artifact (all-nodes, best-nodes, per-protocol, ...).
#[derive(Debug, Clone)]
pub struct Subscription {
    name: String,
    nodes: Vec<NodeDescriptor>,
    encoded: String,
}

impl Subscription {
    /// Build an artifact from an ordered node list
    pub fn build(
        name: impl Into<String>,
        nodes: Vec<NodeDescriptor>,
        line_ending: LineEnding,
    ) -> Self {
        let encoded = encode_subscription(&nodes, line_ending);
        Self {
            name: name.into(),
            nodes,
            encoded,
        }
    }

    /// Artifact name (used by writers for file naming)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ordered descriptor list this artifact was built from
    pub fn nodes(&self) -> &[NodeDescriptor] {
        &self.nodes
    }

    /// The Base64 wire encoding
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// Number of descriptors in the artifact
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the artifact holds no descriptors
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Encode an ordered node list into the subscription wire format
pub fn encode_subscription(nodes: &[NodeDescriptor], line_ending: LineEnding) -> String {
    let joined = nodes
        .iter()
        .map(NodeDescriptor::as_str)
        .collect::<Vec<_>>()
        .join(line_ending.as_str());
    STANDARD.encode(joined.as_bytes())
}

/// Decode a subscription blob back into its ordered node list
///
/// Exact inverse of [`encode_subscription`] for the same line ending. Strict:
/// invalid Base64 or UTF-8 is an error here - lenient recovery of damaged
/// files is a caller concern.
pub fn decode_subscription(blob: &str, line_ending: LineEnding) -> Result<Vec<NodeDescriptor>> {
    let bytes = STANDARD.decode(blob.trim())?;
    let text = String::from_utf8(bytes)?;

    if text.is_empty() {
        return Err(ProtocolError::EmptySubscription);
    }

    Ok(text
        .split(line_ending.as_str())
        .map(NodeDescriptor::new)
        .collect())
}
