//! # Tombola
//!
//! Room-scoped bingo drawing over HTTP.
//!
//! A room holds a board of numbered cells. Clients `POST` actions
//! (`generate`, `next`, `addPrize`, ...) and poll the room with `GET`;
//! the server applies each action with the pure engine in
//! [`tombola_room`] and persists the result through a
//! [`tombola_store::Store`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tombola::prelude::*;
//!
//! # async fn run() -> Result<(), TombolaError> {
//! let server = TombolaServer::builder()
//!     .bind("127.0.0.1:8080")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod config;
mod error;
mod handler;
mod server;
mod service;

pub use config::{DEFAULT_BIND, ServerConfig};
pub use error::TombolaError;
pub use handler::app;
pub use server::{TombolaServer, TombolaServerBuilder};
pub use service::RoomService;

/// Everything needed to run a server or drive rooms in-process.
pub mod prelude {
    pub use crate::{
        DEFAULT_BIND, RoomService, ServerConfig, TombolaError, TombolaServer,
        TombolaServerBuilder, app,
    };
    pub use tombola_protocol::{ActionRequest, Params, Reply, RoomKey};
    pub use tombola_room::{Action, RoomError, RoomState, ShapeKind, Winner};
    pub use tombola_store::{Backend, FileStore, MemoryStore, Store, StoreError};
}
