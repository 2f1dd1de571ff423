//! Unified error type for the Tombola server.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tombola_protocol::{ProtocolError, Reply};
use tombola_room::{RoomError, RoomState};
use tombola_store::StoreError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant lets `?` convert sub-crate
/// errors automatically. As an HTTP response it renders the
/// `{ "ok": false, "error": ... }` reply with a status picked by
/// [`status`](Self::status).
#[derive(Debug, thiserror::Error)]
pub enum TombolaError {
    /// A protocol-level error (encode, decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The request named an action the engine does not know.
    #[error(transparent)]
    Room(#[from] RoomError),

    /// The query string could not be read.
    #[error("invalid query: {0}")]
    Query(#[from] QueryRejection),

    /// The persistence backend failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The listener could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The server loop stopped with an I/O error.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

impl TombolaError {
    /// The HTTP status this error maps to.
    ///
    /// Client mistakes are `400`; everything else is the server's
    /// problem and maps to `500`.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Room(RoomError::UnsupportedAction(_)) | Self::Query(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for TombolaError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }
        (status, Json(Reply::<RoomState>::error(self.to_string()))).into_response()
    }
}
