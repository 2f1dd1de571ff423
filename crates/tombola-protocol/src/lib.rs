//! Wire protocol for Tombola.
//!
//! This crate defines what clients and the server exchange over HTTP:
//!
//! - **Types** ([`RoomKey`], [`ActionRequest`], [`Reply`]): the request
//!   and response shapes.
//! - **Params** ([`Params`]): a loosely-typed bag of request fields with
//!   coercion helpers. Clients are never required to pre-validate their
//!   input, so every accessor degrades to `None` instead of failing.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how values are turned
//!   into bytes and back.
//! - **Errors** ([`ProtocolError`]).
//!
//! # Architecture
//!
//! ```text
//! HTTP (bytes) → Protocol (ActionRequest) → Room engine (RoomState)
//! ```
//!
//! The protocol layer knows nothing about the game rules. It only knows
//! how to read a request leniently and how to shape a reply.

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod codec;
mod error;
mod params;
mod types;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use params::Params;
pub use types::{ActionRequest, DEFAULT_ROOM, Reply, RoomKey};
