//! In-process room store.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tombola_protocol::RoomKey;
use tombola_room::RoomState;

use crate::{Store, StoreError};

/// A [`Store`] backed by a `HashMap` behind a mutex.
///
/// State lives only as long as the process. Cloning is cheap and every
/// clone sees the same rooms.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rooms: Arc<Mutex<HashMap<RoomKey, RoomState>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rooms stored.
    pub async fn len(&self) -> usize {
        self.rooms.lock().await.len()
    }

    /// Returns `true` if no room has been saved.
    pub async fn is_empty(&self) -> bool {
        self.rooms.lock().await.is_empty()
    }
}

impl Store for MemoryStore {
    async fn load(&self, key: &RoomKey) -> Result<Option<RoomState>, StoreError> {
        Ok(self.rooms.lock().await.get(key).cloned())
    }

    async fn save(&self, key: &RoomKey, state: &RoomState) -> Result<(), StoreError> {
        self.rooms.lock().await.insert(key.clone(), state.clone());
        tracing::debug!(room = %key, "room saved in memory");
        Ok(())
    }
}
