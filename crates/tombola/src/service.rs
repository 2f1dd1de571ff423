//! The two entry points the HTTP layer calls: `load` and `apply`.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use tombola_protocol::{ActionRequest, RoomKey};
use tombola_room::{RoomState, apply_request};
use tombola_store::Store;

use crate::TombolaError;

/// Couples the transition engine with a [`Store`].
///
/// Every `apply` is a load, a pure transition and a save. Nothing is
/// written when the transition is rejected, so the stored state stays
/// authoritative. Applies to the same room run one at a time; different
/// rooms proceed independently.
#[derive(Debug)]
pub struct RoomService<S: Store> {
    store: S,
    materialize_on_read: bool,
    room_locks: Mutex<HashMap<RoomKey, Arc<Mutex<()>>>>,
}

impl<S: Store> RoomService<S> {
    /// Creates a service over `store`.
    pub fn new(store: S, materialize_on_read: bool) -> Self {
        Self {
            store,
            materialize_on_read,
            room_locks: Mutex::new(HashMap::new()),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the stored state of `key`.
    ///
    /// A room that was never saved is `None`, unless the service was
    /// built to materialize on read: then the default room is saved and
    /// returned.
    pub async fn load(&self, key: &RoomKey) -> Result<Option<RoomState>, TombolaError> {
        if let Some(state) = self.store.load(key).await? {
            return Ok(Some(state));
        }
        if !self.materialize_on_read {
            return Ok(None);
        }
        let _guard = self.lock_room(key).await;
        // Another request may have created the room while we waited.
        if let Some(state) = self.store.load(key).await? {
            return Ok(Some(state));
        }
        let state = RoomState::default();
        self.store.save(key, &state).await?;
        tracing::info!(room = %key, "room materialized on read");
        Ok(Some(state))
    }

    /// Runs `request` against its room and persists the result.
    ///
    /// # Errors
    /// [`TombolaError::Room`] for an unsupported action (nothing is
    /// saved), [`TombolaError::Store`] when loading or saving fails.
    pub async fn apply(&self, request: &ActionRequest) -> Result<RoomState, TombolaError> {
        let key = &request.room;
        let action = request.action.as_deref();
        let _guard = self.lock_room(key).await;

        let current = self.store.load(key).await?;
        let next = {
            let mut rng = rand::rng();
            apply_request(current.as_ref(), action, &request.params, &mut rng)
        };
        let next = match next {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(
                    room = %key,
                    action = action.unwrap_or("<none>"),
                    "rejected request"
                );
                return Err(e.into());
            }
        };

        self.store.save(key, &next).await?;
        tracing::debug!(
            room = %key,
            action = action.unwrap_or("<none>"),
            remaining = next.available_numbers.len(),
            winners = next.winners.len(),
            "action applied"
        );
        Ok(next)
    }

    /// Waits for exclusive use of one room. The map lock is only held
    /// long enough to fetch the room's own lock.
    async fn lock_room(&self, key: &RoomKey) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.room_locks.lock().await;
            Arc::clone(locks.entry(key.clone()).or_default())
        };
        lock.lock_owned().await
    }
}
