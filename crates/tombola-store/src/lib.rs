//! Room persistence for Tombola.
//!
//! The engine never touches storage. Callers go through the [`Store`]
//! trait: `load` a room's state (or learn it doesn't exist), run the
//! transition, `save` the result.
//!
//! # Backends
//!
//! - [`MemoryStore`]: a map in process memory. Used when no durable
//!   backend is configured, and in tests.
//! - [`FileStore`]: every room's document in one JSON file, written
//!   atomically.
//! - [`Backend`]: picks one of the above at startup.
//!
//! # Consistency
//!
//! Saves are whole-document upserts. Two requests racing on the same
//! room both read, both compute, and the last write wins.

mod backend;
mod error;
mod file;
mod memory;

pub use backend::Backend;
pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

use std::future::Future;

use tombola_protocol::RoomKey;
use tombola_room::RoomState;

/// Loads and saves room state by key.
///
/// `Send + Sync + 'static` because the store is shared by every request
/// task for the lifetime of the server. The returned futures are `Send`
/// so handlers can await them on any worker thread.
pub trait Store: Send + Sync + 'static {
    /// Returns the stored state for `key`, or `None` if the room has
    /// never been saved.
    fn load(
        &self,
        key: &RoomKey,
    ) -> impl Future<Output = Result<Option<RoomState>, StoreError>> + Send;

    /// Stores `state` under `key`, replacing whatever was there.
    fn save(
        &self,
        key: &RoomKey,
        state: &RoomState,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
