//! HTTP routes.
//!
//! ```text
//! GET  /state?room=<key>               -> { ok: true, state: {...} | null }
//! POST /state {room, action, ...params} -> { ok: true, state: {...} }
//! any other method on /state           -> 405 { ok: false, error }
//! ```

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tombola_protocol::{ActionRequest, Reply, RoomKey};
use tombola_room::RoomState;
use tombola_store::Store;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::{RoomService, TombolaError};

type Shared<S> = Arc<RoomService<S>>;

/// Builds the application router around `service`.
///
/// CORS is fully permissive so a static front-end served from another
/// origin can poll the room.
pub fn app<S: Store>(service: Arc<RoomService<S>>) -> Router {
    Router::new()
        .route(
            "/state",
            get(get_state::<S>)
                .post(post_state::<S>)
                .fallback(method_not_allowed),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}

#[derive(Debug, Deserialize)]
struct StateQuery {
    room: Option<String>,
}

async fn get_state<S: Store>(
    State(service): State<Shared<S>>,
    query: Result<Query<StateQuery>, QueryRejection>,
) -> Result<Json<Reply<RoomState>>, TombolaError> {
    let Query(query) = query?;
    let key = RoomKey::parse(query.room.as_deref());
    let state = service.load(&key).await?;
    tracing::debug!(room = %key, found = state.is_some(), "state read");
    Ok(Json(Reply::state(state)))
}

/// The body is taken as raw bytes: a malformed or non-object body is
/// treated as `{}` and then rejected as an unsupported action, rather
/// than failing JSON extraction.
async fn post_state<S: Store>(
    State(service): State<Shared<S>>,
    body: Bytes,
) -> Result<Json<Reply<RoomState>>, TombolaError> {
    let request = ActionRequest::from_json_bytes(&body);
    let state = service.apply(&request).await?;
    Ok(Json(Reply::state(Some(state))))
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(Reply::<RoomState>::error("method not allowed")),
    )
        .into_response()
}
