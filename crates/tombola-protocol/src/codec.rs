//! Codec trait and implementations for serializing/deserializing values.
//!
//! A "codec" (coder/decoder) converts between Rust types and raw bytes.
//! The persistence layer stores room documents through a [`Codec`], so
//! the on-disk format can change without touching the store logic: the
//! store asks for bytes and hands bytes back, nothing more.
//!
//! [`JsonCodec`] is the only implementation. JSON keeps the data file
//! readable and matches what HTTP clients already send.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// ## Trait bounds explained
///
/// - `Send + Sync`: a store holding a codec is shared by every request
///   task, and Tokio may run those tasks on any worker thread.
/// - `'static`: the codec owns everything it needs and borrows nothing
///   short-lived, so it can live inside the server's shared state.
///
/// ## Generic methods
///
/// `encode` and `decode` are generic over the value type, so one codec
/// handles the whole room file, a single room, or a [`RoomKey`]:
/// - `encode<T: Serialize>`: `T` can be turned into bytes
/// - `decode<T: DeserializeOwned>`: `T` can be rebuilt from bytes
///
/// `DeserializeOwned` (rather than `Deserialize<'de>`) means the result
/// owns its data and does not borrow from the input buffer, which the
/// store drops right after decoding.
///
/// Generic methods make the trait unusable as `dyn Codec`. Stores take
/// the codec as a type parameter instead.
///
/// [`RoomKey`]: crate::RoomKey
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if serialization fails (for
    /// example a map whose keys don't serialize as strings).
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Decode`] if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// Output is pretty-printed: room documents are small and a human may
/// well open the data file to see why a room looks the way it does.
///
/// ```rust
/// use tombola_protocol::{Codec, JsonCodec, RoomKey};
///
/// let codec = JsonCodec;
/// let bytes = codec.encode(&RoomKey::parse(Some("lobby"))).unwrap();
/// let key: RoomKey = codec.decode(&bytes).unwrap();
/// assert_eq!(key.as_str(), "lobby");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec_pretty(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
