//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the map editor's HTTP endpoints under a single Axum
//! router. Route handlers only translate JSON to orchestrator calls; all
//! placement rules live in `services::placement`. When a static directory is
//! configured, the front-end is served from it for every unmatched path.

pub mod map;

use std::path::Path;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState, static_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .route("/state", get(map::get_state))
        .route("/catalog", get(map::get_catalog))
        .route("/place", post(map::place))
        .route("/path/vertex", post(map::append_vertex))
        .route("/path/finish", post(map::finish_path))
        .route("/path/cancel", post(map::cancel_path))
        .route("/undo", post(map::undo))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true)),
        None => router,
    }
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
