//! Runtime selection between the durable and in-memory stores.

use std::path::PathBuf;

use tombola_protocol::RoomKey;
use tombola_room::RoomState;

use crate::{FileStore, MemoryStore, Store, StoreError};

/// The store a server runs with, chosen once at startup.
#[derive(Debug, Clone)]
pub enum Backend {
    Memory(MemoryStore),
    File(FileStore),
}

impl Backend {
    /// Opens the durable store at `path`, or falls back to memory when
    /// no path is configured. The file (and its directory) is created
    /// if missing.
    pub async fn open(path: Option<PathBuf>) -> Result<Self, StoreError> {
        match path {
            Some(path) => {
                let store = FileStore::new(path);
                store.ensure_ready().await?;
                tracing::info!(path = %store.path().display(), "using file store");
                Ok(Self::File(store))
            }
            None => {
                tracing::warn!("no data path configured, rooms are kept in memory only");
                Ok(Self::Memory(MemoryStore::new()))
            }
        }
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::File(_) => "file",
        }
    }
}

impl Store for Backend {
    async fn load(&self, key: &RoomKey) -> Result<Option<RoomState>, StoreError> {
        match self {
            Self::Memory(store) => store.load(key).await,
            Self::File(store) => store.load(key).await,
        }
    }

    async fn save(&self, key: &RoomKey, state: &RoomState) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.save(key, state).await,
            Self::File(store) => store.save(key, state).await,
        }
    }
}
