//! Error types for the room layer.

/// Errors that can occur while applying an action to a room.
///
/// Malformed or out-of-range parameters are never errors here: they are
/// clamped or defaulted. The only rejection is an action label the engine
/// does not know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    /// The action label is not one of the recognized actions. The room
    /// state is left untouched.
    #[error("unsupported action: {0}")]
    UnsupportedAction(String),
}
