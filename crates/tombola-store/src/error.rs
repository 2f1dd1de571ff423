//! Error types for the persistence layer.

use std::path::PathBuf;

use tombola_protocol::ProtocolError;

/// Errors that can occur while loading or saving rooms.
///
/// None of these are retried by the store. They surface to the caller
/// as an internal failure and the previously stored state stays
/// authoritative.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading the backing file failed.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing (or renaming into place) the backing file failed.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored document could not be encoded or decoded.
    #[error(transparent)]
    Codec(#[from] ProtocolError),
}
