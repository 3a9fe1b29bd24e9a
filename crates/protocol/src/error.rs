//! Protocol error types
//!
//! Only the subscription wire format can fail loudly; descriptor parsing is
//! best-effort and returns `Option` instead.

use thiserror::Error;

/// Errors that can occur during subscription encoding/decoding
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Subscription blob is not valid Base64
    #[error("invalid base64 in subscription: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// Decoded subscription bytes are not valid UTF-8
    #[error("subscription is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// Subscription decoded to an empty node list
    #[error("subscription contains no descriptors")]
    EmptySubscription,
}
