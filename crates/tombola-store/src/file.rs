//! Durable room store: one JSON file holding every room's document.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tombola_protocol::{Codec, JsonCodec, ProtocolError, RoomKey};
use tombola_room::RoomState;

use crate::{Store, StoreError};

/// All rooms as stored on disk, keyed by room.
///
/// Rooms stay undecoded until asked for, so one damaged document only
/// fails requests for its own room.
type Documents = BTreeMap<RoomKey, Value>;

/// A [`Store`] that keeps all rooms in a single JSON file.
///
/// ```json
/// { "demo": { "running": false, "numCells": 20, ... } }
/// ```
///
/// Each save rewrites the whole file: the new contents go to a sibling
/// temporary file which is then renamed over the original, so a crash
/// mid-write leaves the previous file intact. Saves within one process
/// are serialized through a mutex. Separate processes sharing the file
/// get last-write-wins.
///
/// A room whose document no longer decodes fails its own `load` with
/// [`StoreError::Codec`]. The other rooms read and save as usual, and a
/// save to the damaged room replaces its document.
#[derive(Debug, Clone)]
pub struct FileStore<C: Codec = JsonCodec> {
    path: PathBuf,
    codec: C,
    write_lock: Arc<Mutex<()>>,
}

impl FileStore<JsonCodec> {
    /// Creates a store backed by the JSON file at `path`. The file need
    /// not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_codec(path, JsonCodec)
    }
}

impl<C: Codec> FileStore<C> {
    /// Creates a store with a custom codec.
    pub fn with_codec(path: impl Into<PathBuf>, codec: C) -> Self {
        Self {
            path: path.into(),
            codec,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the parent directory and an empty document file if they
    /// don't exist yet. Safe to call on every startup.
    pub async fn ensure_ready(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|source| self.write_error(source))?;
        }
        if tokio::fs::try_exists(&self.path)
            .await
            .map_err(|source| self.read_error(source))?
        {
            return Ok(());
        }
        self.write_all(&Documents::new()).await?;
        tracing::info!(path = %self.path.display(), "created room data file");
        Ok(())
    }

    async fn read_all(&self) -> Result<Documents, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Documents::new()),
            Ok(bytes) => Ok(self.codec.decode(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Documents::new()),
            Err(source) => Err(self.read_error(source)),
        }
    }

    async fn write_all(&self, docs: &Documents) -> Result<(), StoreError> {
        let bytes = self.codec.encode(docs)?;
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|source| self.write_error(source))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| self.write_error(source))
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Read {
            path: self.path.clone(),
            source,
        }
    }

    fn write_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl<C: Codec> Store for FileStore<C> {
    async fn load(&self, key: &RoomKey) -> Result<Option<RoomState>, StoreError> {
        let mut docs = self.read_all().await?;
        let Some(doc) = docs.remove(key) else {
            return Ok(None);
        };
        match serde_json::from_value(doc) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                tracing::warn!(
                    room = %key,
                    path = %self.path.display(),
                    error = %e,
                    "stored room does not decode"
                );
                Err(ProtocolError::Decode(e).into())
            }
        }
    }

    async fn save(&self, key: &RoomKey, state: &RoomState) -> Result<(), StoreError> {
        let doc = serde_json::to_value(state).map_err(ProtocolError::Encode)?;
        let _guard = self.write_lock.lock().await;
        let mut docs = self.read_all().await?;
        docs.insert(key.clone(), doc);
        self.write_all(&docs).await?;
        tracing::debug!(room = %key, path = %self.path.display(), "room saved to file");
        Ok(())
    }
}
