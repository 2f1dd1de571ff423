//! Room state and transitions for Tombola.
//!
//! A room is a board of numbered cells. Each draw picks a random number
//! still in the pool and adds one fill to its cell; a cell that reaches
//! the fill threshold becomes a winner and takes the next prize.
//!
//! # Key types
//!
//! - [`RoomState`]: the whole state of one room, with its invariants
//! - [`Action`]: a parsed client request (`generate`, `next`, ...)
//! - [`apply`] / [`apply_request`]: the pure transition functions
//! - [`RoomError`]: the only rejection, an unsupported action
//!
//! The engine performs no I/O. Callers load a room, apply an action,
//! and persist the result.

mod action;
mod engine;
mod error;
mod model;
mod repr;

pub use action::Action;
pub use engine::{DrawOutcome, apply, apply_request, draw};
pub use error::RoomError;
pub use model::{
    DEFAULT_CELLS, DEFAULT_INTERVAL_MS, DEFAULT_SHAPES, MAX_CELLS, MAX_SHAPES, MIN_CELLS,
    MIN_INTERVAL_MS, MIN_SHAPES, PRIZE_PLACEHOLDER, RoomState, ShapeKind, Winner,
};
