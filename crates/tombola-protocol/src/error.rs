//! Error types for the protocol layer.
//!
//! Each crate in Tombola defines its own error enum. A `ProtocolError`
//! always means bytes could not be turned into a value (or back), never
//! that a game rule was violated; rule violations are a `RoomError` in
//! the room crate, and I/O failures are a `StoreError` in the store.

/// Errors that can occur in the protocol layer.
///
/// `#[derive(thiserror::Error)]` generates the `std::error::Error` impl.
/// Each `#[error("...")]` attribute is the message shown when the error
/// is printed, logged, or returned to a client in an error reply.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust value into bytes).
    ///
    /// Printing it reads like `encode failed: key must be a string`.
    /// The inner `serde_json::Error` is kept as-is so its line and column
    /// information survives into the logs.
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust value).
    ///
    /// Common causes: malformed JSON, truncated files, or a document
    /// whose top level is not the expected shape. Missing fields in a
    /// room document are not a cause; those are filled from defaults.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_message_carries_position() {
        let source = serde_json::from_str::<serde_json::Value>("{ oops").unwrap_err();
        let err = ProtocolError::Decode(source);
        let message = err.to_string();
        assert!(message.starts_with("decode failed: "));
        assert!(message.contains("line 1"));
    }
}
