//! Codec trait and implementations for request and response bodies.
//!
//! A "codec" (coder/decoder) turns Rust values into body bytes and back.
//! The session layer never calls `serde_json` directly; it goes through a
//! [`Codec`], so the body format is one decision made in one place.
//!
//! The REST API speaks JSON, so [`JsonCodec`] is the only implementation
//! today. The clients in the crates above are generic over `C: Codec` and
//! default to it.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Encodes Rust values to body bytes and decodes them back.
///
/// The methods are generic over the value type: anything `Serialize` can
/// be encoded, and anything `DeserializeOwned` can be decoded.
/// `DeserializeOwned` (rather than `Deserialize<'de>`) means the decoded
/// value owns its strings instead of borrowing them from the input, so the
/// response buffer can be dropped as soon as decoding returns.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`), the REST API's format.
///
/// ## Example
///
/// ```rust
/// use coolant_protocol::{Codec, JsonCodec, LoginRequest};
///
/// let codec = JsonCodec;
/// let body = codec
///     .encode(&LoginRequest { email: "a@b.c".into(), password: "pw".into() })
///     .unwrap();
/// assert_eq!(body, br#"{"email":"a@b.c","password":"pw"}"#);
///
/// let decoded: LoginRequest = codec.decode(&body).unwrap();
/// assert_eq!(decoded.email, "a@b.c");
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
