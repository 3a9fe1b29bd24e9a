//! Subtrawl Protocol - Core node descriptor types
//!
//! This crate provides the foundational types that flow through the pipeline:
//! - `Scheme` - The registry of recognized proxy protocol tags
//! - `NodeDescriptor` - An opaque `<scheme>://<payload>` connection string
//! - `NodeIdentity` - Canonical `(scheme, host, port)` key for semantic dedup
//! - `Endpoint` - Best-effort `(host, port)` resolution for reachability probes
//! - `Subscription` - The Base64 subscription wire format (encode + decode)
//!
//! # Design Principles
//!
//! - **Descriptors stay opaque**: attributes (scheme, payload) are derived on
//!   demand, never stored redundantly alongside the raw string.
//! - **Best-effort parsing**: identity and endpoint resolution return `Option`,
//!   never an error - a malformed payload degrades gracefully downstream.
//! - **Exact round-trip**: `decode(encode(nodes)) == nodes` for any ordered
//!   descriptor list and either line ending.

mod descriptor;
mod endpoint;
mod error;
mod identity;
mod scheme;
mod subscription;

pub use descriptor::NodeDescriptor;
pub use endpoint::{Endpoint, resolve_endpoint};
pub use error::ProtocolError;
pub use identity::{NodeIdentity, repair_padding, resolve_identity};
pub use scheme::{ProtocolFamily, Scheme};
pub use subscription::{LineEnding, Subscription, decode_subscription, encode_subscription};

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Minimum payload length for a descriptor to be considered well-formed
pub const MIN_PAYLOAD_LENGTH: usize = 10;

/// Default port assumed when a descriptor reveals a host but no port
pub const DEFAULT_PROBE_PORT: u16 = 443;

// Test modules - only compiled during testing
#[cfg(test)]
mod endpoint_test;
#[cfg(test)]
mod scheme_test;
