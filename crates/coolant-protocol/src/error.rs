//! Error types for the protocol layer.
//!
//! A `ProtocolError` means the bytes were fine at the transport level but
//! did not turn into (or come from) the expected Rust type.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization of a request body failed.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// A response body was malformed or did not match the expected shape
    /// (missing fields, unknown role, truncated JSON).
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The value decoded but is not valid for the console.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
