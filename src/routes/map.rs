//! Map editing routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use tracing::error;

use crate::geometry::Point;
use crate::outcome::Outcome;
use crate::services::placement::{CatalogItem, StateProjection};
use crate::state::AppState;

/// `POST /place` body: a point element or a complete path.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PlaceBody {
    Path {
        #[serde(rename = "type")]
        type_key: String,
        path: Vec<Point>,
    },
    Point {
        #[serde(rename = "type")]
        type_key: String,
        x: f64,
        y: f64,
    },
}

#[derive(Debug, Deserialize)]
pub struct VertexBody {
    #[serde(rename = "type")]
    pub type_key: String,
    pub point: Point,
}

#[derive(Debug, Deserialize)]
pub struct FinishBody {
    #[serde(rename = "type")]
    pub type_key: String,
}

/// `GET /state` — renderable projection of the map.
pub async fn get_state(State(state): State<AppState>) -> Result<Json<StateProjection>, StatusCode> {
    let editor = state.editor.read().await;
    editor.project_state().map(Json).map_err(|e| {
        error!(error = %e, "state projection failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// `GET /catalog` — every placeable element type.
pub async fn get_catalog(State(state): State<AppState>) -> Json<Vec<CatalogItem>> {
    Json(state.editor.read().await.catalog())
}

/// `POST /place` — place a point element or a whole path.
pub async fn place(State(state): State<AppState>, Json(body): Json<PlaceBody>) -> Json<Outcome> {
    let mut editor = state.editor.write().await;
    let outcome = match body {
        PlaceBody::Point { type_key, x, y } => editor.place_point(&type_key, x, y),
        PlaceBody::Path { type_key, path } => editor.place_path(&type_key, path),
    };
    Json(outcome)
}

/// `POST /path/vertex` — extend the path being drawn.
pub async fn append_vertex(State(state): State<AppState>, Json(body): Json<VertexBody>) -> Json<Outcome> {
    Json(
        state
            .editor
            .write()
            .await
            .append_path_vertex(&body.type_key, body.point),
    )
}

/// `POST /path/finish` — commit the path being drawn.
pub async fn finish_path(State(state): State<AppState>, Json(body): Json<FinishBody>) -> Json<Outcome> {
    Json(state.editor.write().await.finish_path(&body.type_key))
}

/// `POST /path/cancel` — discard the path being drawn.
pub async fn cancel_path(State(state): State<AppState>) -> Json<Outcome> {
    Json(state.editor.write().await.cancel_path())
}

/// `POST /undo` — revert the most recent operation.
pub async fn undo(State(state): State<AppState>) -> Json<Outcome> {
    Json(state.editor.write().await.undo())
}

#[cfg(test)]
#[path = "map_test.rs"]
mod tests;
