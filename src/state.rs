//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the single `PlacementOrchestrator` behind a `RwLock`: mutating
//! handlers hold the write lock for the whole save/validate/commit sequence,
//! while projections share the read lock and never observe a half-rolled-back
//! editor.
//!
//! `EditorState` is the document itself. It is plain data so that snapshots
//! are deep, independent clones.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::geometry::Point;
use crate::services::placement::PlacementOrchestrator;

// =============================================================================
// PLACED ELEMENT
// =============================================================================

/// Extrinsic geometry of a committed element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", rename_all = "lowercase")]
pub enum Shape {
    /// Anchored at the center of the type's bounding box.
    Point { x: f64, y: f64 },
    Path { path: Vec<Point> },
}

/// A committed map entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedElement {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub type_key: String,
    #[serde(flatten)]
    pub shape: Shape,
}

impl PlacedElement {
    #[must_use]
    pub fn point(type_key: &str, at: Point) -> Self {
        Self { id: Uuid::new_v4(), type_key: type_key.to_owned(), shape: Shape::Point { x: at.x, y: at.y } }
    }

    #[must_use]
    pub fn path(type_key: &str, vertices: Vec<Point>) -> Self {
        Self { id: Uuid::new_v4(), type_key: type_key.to_owned(), shape: Shape::Path { path: vertices } }
    }
}

// =============================================================================
// EDITOR STATE
// =============================================================================

/// The mutable document: committed elements in z-order plus the path being drawn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorState {
    pub elements: Vec<PlacedElement>,
    /// Vertices of the path currently being drawn.
    pub temp_path: Vec<Point>,
    /// Type key the in-progress path was started with.
    pub temp_path_type: Option<String>,
}

impl EditorState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_temp_path(&mut self) {
        self.temp_path.clear();
        self.temp_path_type = None;
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub editor: Arc<RwLock<PlacementOrchestrator>>,
}

impl AppState {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self { editor: Arc::new(RwLock::new(PlacementOrchestrator::new(catalog))) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
