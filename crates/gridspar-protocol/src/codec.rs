//! Codec trait and the JSON implementation.
//!
//! The rest of the stack never serializes directly. Everything goes
//! through a [`Codec`], so the wire format can be swapped (JSON today, a binary
//! format later) without touching the server or the tests that drive it.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// Converts events to and from bytes.
///
/// `Send + Sync + 'static` because the codec is shared across connection
/// tasks for the life of the server.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError>;
}

/// A [`Codec`] backed by `serde_json`.
///
/// Human-readable on the wire, which keeps browser DevTools and test
/// failures legible.
///
/// ```rust
/// use gridspar_protocol::{Codec, JsonCodec, ClientEvent};
///
/// let codec = JsonCodec;
/// let bytes = codec.encode(&ClientEvent::JoinQuickMatch).unwrap();
/// let back: ClientEvent = codec.decode(&bytes).unwrap();
/// assert_eq!(back, ClientEvent::JoinQuickMatch);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
