//! Request and response types for Tombola's HTTP surface.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Params;

/// Room used when a request names none (or only whitespace).
pub const DEFAULT_ROOM: &str = "demo";

// ---------------------------------------------------------------------------
// RoomKey
// ---------------------------------------------------------------------------

/// Identifies one isolated game instance.
///
/// Always non-empty and trimmed: [`RoomKey::parse`] falls back to
/// [`DEFAULT_ROOM`] for absent or blank input. Serialized as a plain
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomKey(String);

impl RoomKey {
    /// Parses a room key from raw client input.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(key) if !key.is_empty() => Self(key.to_string()),
            _ => Self::default(),
        }
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RoomKey {
    fn default() -> Self {
        Self(DEFAULT_ROOM.to_string())
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// ActionRequest
// ---------------------------------------------------------------------------

/// A client's request to change a room.
///
/// The body is a flat JSON object: `room` and `action` sit next to the
/// action's own parameters (`n`, `k`, `prize`, `names`, ...).
///
/// ```json
/// { "room": "office", "action": "generate", "n": 30, "k": 3 }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRequest {
    /// Target room.
    pub room: RoomKey,
    /// The action label. `None` when the body carried no string `action`.
    pub action: Option<String>,
    /// Every field of the body, including `room` and `action`.
    pub params: Params,
}

impl ActionRequest {
    /// Builds a request from a parsed JSON body.
    pub fn from_value(body: Value) -> Self {
        let params = Params::from_value(body);
        Self {
            room: RoomKey::parse(params.str("room")),
            action: params.str("action").map(str::to_string),
            params,
        }
    }

    /// Builds a request from raw body bytes.
    ///
    /// Never fails: a body that is not valid JSON is read as an empty
    /// object, which then names no action and is rejected downstream.
    pub fn from_json_bytes(body: &[u8]) -> Self {
        let value = serde_json::from_slice(body).unwrap_or(Value::Null);
        Self::from_value(value)
    }
}

// ---------------------------------------------------------------------------
// Reply
// ---------------------------------------------------------------------------

/// The JSON body of every response.
///
/// ```json
/// { "ok": true,  "state": { ... } }
/// { "ok": true,  "state": null }
/// { "ok": false, "error": "unsupported action: frobnicate" }
/// ```
///
/// `#[serde(untagged)]` picks the variant by shape. `Error` is listed
/// first because a missing `state` would otherwise decode as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reply<S> {
    /// The request was rejected or failed.
    Error { ok: bool, error: String },
    /// The request succeeded. `state` is `None` for a room that does
    /// not exist yet.
    State { ok: bool, state: Option<S> },
}

impl<S> Reply<S> {
    /// A successful reply carrying a room's state.
    pub fn state(state: Option<S>) -> Self {
        Self::State { ok: true, state }
    }

    /// A failed reply carrying a human-readable message.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            ok: false,
            error: message.into(),
        }
    }

    /// Returns `true` for successful replies.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::State { ok: true, .. })
    }
}
