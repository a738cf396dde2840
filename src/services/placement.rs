//! Placement service — the single entry point for editing the map.
//!
//! DESIGN
//! ======
//! `PlacementOrchestrator` owns the metadata cache, the editor state and the
//! snapshot history privately. Every mutating operation follows the same
//! protocol: save a snapshot, validate, then either commit in place or undo
//! the snapshot and report the rejection. A rejected call therefore leaves
//! the editor and the history depth exactly as they were.
//!
//! Path drawing is a small state machine over the editor's path buffer:
//! `Idle --append--> Drawing --append--> Drawing --finish/cancel--> Idle`.
//! Only the incoming vertex is validated on append; `finish_path` commits
//! the buffered vertices without re-checking them.
//!
//! The orchestrator is synchronous and not internally locked. Callers must
//! serialize mutating calls (see `AppState`).

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::catalog::{Catalog, CatalogEntry, GeometryClass};
use crate::geometry::Point;
use crate::outcome::{ErrorCode, Outcome};
use crate::services::history::SnapshotHistory;
use crate::services::metadata::{ElementTypeMetadata, RenderMetadataCache};
use crate::services::validation::{self, ValidationRequest};
use crate::state::{EditorState, PlacedElement, Shape};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlacementError {
    #[error("unknown element type: {0}")]
    UnknownType(String),
    #[error("({x}, {y}) is outside the map")]
    OutOfBounds { x: f64, y: f64 },
    #[error("collides with existing {type_key} {id}")]
    Collision { type_key: String, id: Uuid },
    #[error("'{type_key}' is a {actual} type, expected {expected}")]
    WrongGeometry { type_key: String, expected: GeometryClass, actual: GeometryClass },
    #[error("path in progress is '{drawing}', cannot continue it as '{requested}'")]
    PathTypeMismatch { drawing: String, requested: String },
    #[error("a path needs at least 2 vertices, got {0}")]
    TooFewVertices(usize),
}

impl ErrorCode for PlacementError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownType(_) => "E_UNKNOWN_TYPE",
            Self::OutOfBounds { .. } => "E_OUT_OF_BOUNDS",
            Self::Collision { .. } => "E_COLLISION",
            Self::WrongGeometry { .. } => "E_WRONG_GEOMETRY",
            Self::PathTypeMismatch { .. } => "E_TYPE_MISMATCH",
            Self::TooFewVertices(_) => "E_TOO_FEW_VERTICES",
        }
    }
}

/// Intrinsic metadata joined with one element's extrinsic geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderRecord {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub type_key: String,
    pub name: String,
    pub visual: String,
    pub width: Option<f64>,
    pub height: Option<f64>,
    #[serde(flatten)]
    pub shape: Shape,
}

impl RenderRecord {
    fn new(element: &PlacedElement, meta: &ElementTypeMetadata) -> Self {
        Self {
            id: element.id,
            type_key: element.type_key.clone(),
            name: meta.name.clone(),
            visual: meta.visual.clone(),
            width: meta.width,
            height: meta.height,
            shape: element.shape.clone(),
        }
    }
}

/// Read-only view of the editor for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateProjection {
    pub elements: Vec<RenderRecord>,
    pub temp_path: Vec<Point>,
    pub temp_path_type: Option<String>,
    pub undo_depth: usize,
}

/// One palette entry as exposed to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogItem {
    #[serde(rename = "type")]
    pub type_key: String,
    #[serde(flatten)]
    pub entry: CatalogEntry,
}

pub struct PlacementOrchestrator {
    cache: RenderMetadataCache,
    state: EditorState,
    history: SnapshotHistory,
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

impl PlacementOrchestrator {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self { cache: RenderMetadataCache::new(catalog), state: EditorState::new(), history: SnapshotHistory::new() }
    }

    /// Resolve `type_key` and require it to have the given geometric class.
    fn resolve(&self, type_key: &str, expected: GeometryClass) -> Result<(), PlacementError> {
        let meta = self.cache.get(type_key)?;
        if meta.class != expected {
            return Err(PlacementError::WrongGeometry { type_key: type_key.to_owned(), expected, actual: meta.class });
        }
        Ok(())
    }

    /// Roll back the snapshot taken at the start of a rejected operation.
    fn reject(&mut self, op: &str, err: &PlacementError) -> Outcome {
        self.history.undo(&mut self.state);
        info!(op, code = err.error_code(), error = %err, "placement rejected");
        Outcome::from_error(err)
    }
}

// =============================================================================
// POINT PLACEMENT
// =============================================================================

impl PlacementOrchestrator {
    /// Place a single point element centered at `(x, y)`.
    pub fn place_point(&mut self, type_key: &str, x: f64, y: f64) -> Outcome {
        self.history.save(&self.state);
        let at = Point::new(x, y);
        let checked = self
            .resolve(type_key, GeometryClass::Point)
            .and_then(|()| validation::validate(&ValidationRequest::point(type_key, at), &self.state, &self.cache));
        if let Err(e) = checked {
            return self.reject("place_point", &e);
        }

        self.state.elements.push(PlacedElement::point(type_key, at));
        Outcome::ok("Element placed.")
    }

    /// Place a complete path in one step. Every vertex is validated.
    pub fn place_path(&mut self, type_key: &str, vertices: Vec<Point>) -> Outcome {
        self.history.save(&self.state);
        let checked = self.resolve(type_key, GeometryClass::Path).and_then(|()| {
            if vertices.len() < 2 {
                return Err(PlacementError::TooFewVertices(vertices.len()));
            }
            validation::validate(&ValidationRequest::vertices(type_key, &vertices), &self.state, &self.cache)
        });
        if let Err(e) = checked {
            return self.reject("place_path", &e);
        }

        self.state.elements.push(PlacedElement::path(type_key, vertices));
        Outcome::ok("Path placed.")
    }
}

// =============================================================================
// INCREMENTAL PATH DRAWING
// =============================================================================

impl PlacementOrchestrator {
    /// Append one vertex to the path being drawn, starting a path if idle.
    pub fn append_path_vertex(&mut self, type_key: &str, vertex: Point) -> Outcome {
        self.history.save(&self.state);
        let checked = self.check_drawing_type(type_key).and_then(|()| {
            validation::validate(
                &ValidationRequest::vertices(type_key, std::slice::from_ref(&vertex)),
                &self.state,
                &self.cache,
            )
        });
        if let Err(e) = checked {
            return self.reject("append_path_vertex", &e);
        }

        if self.state.temp_path_type.is_none() {
            self.state.temp_path_type = Some(type_key.to_owned());
        }
        self.state.temp_path.push(vertex);
        Outcome::ok("Vertex added.")
    }

    /// Commit the buffered vertices as one path element.
    ///
    /// With fewer than two buffered vertices the buffer is discarded and the
    /// drawing is reported as cancelled, whatever `type_key` says; that is not
    /// a rejection.
    pub fn finish_path(&mut self, type_key: &str) -> Outcome {
        self.history.save(&self.state);
        if self.state.temp_path.len() < 2 {
            self.state.clear_temp_path();
            return Outcome::ok("Drawing cancelled.");
        }

        if let Err(e) = self.check_drawing_type(type_key) {
            return self.reject("finish_path", &e);
        }

        let path_type = self
            .state
            .temp_path_type
            .take()
            .unwrap_or_else(|| type_key.to_owned());
        let vertices = std::mem::take(&mut self.state.temp_path);
        self.state.elements.push(PlacedElement::path(&path_type, vertices));
        Outcome::ok("Path placed.")
    }

    /// Discard the path being drawn. Undo brings it back.
    pub fn cancel_path(&mut self) -> Outcome {
        self.history.save(&self.state);
        self.state.clear_temp_path();
        Outcome::ok("Drawing cancelled.")
    }

    /// The type must be a path type and match the path already in progress.
    fn check_drawing_type(&self, type_key: &str) -> Result<(), PlacementError> {
        self.resolve(type_key, GeometryClass::Path)?;
        match &self.state.temp_path_type {
            Some(drawing) if drawing != type_key => {
                Err(PlacementError::PathTypeMismatch { drawing: drawing.clone(), requested: type_key.to_owned() })
            }
            _ => Ok(()),
        }
    }
}

// =============================================================================
// UNDO + PROJECTION
// =============================================================================

impl PlacementOrchestrator {
    /// Revert the most recent operation. An empty history is not a failure.
    pub fn undo(&mut self) -> Outcome {
        if self.history.undo(&mut self.state) {
            Outcome::ok("Action undone.")
        } else {
            Outcome::ok("Nothing to undo.")
        }
    }

    /// Renderable view of every committed element plus the live path preview.
    ///
    /// # Errors
    ///
    /// Returns `UnknownType` only if a committed element's type vanished from
    /// the catalogue, which the placement checks rule out.
    pub fn project_state(&self) -> Result<StateProjection, PlacementError> {
        let mut elements = Vec::with_capacity(self.state.elements.len());
        for el in &self.state.elements {
            let meta = self.cache.get(&el.type_key)?;
            elements.push(RenderRecord::new(el, &meta));
        }

        Ok(StateProjection {
            elements,
            temp_path: self.state.temp_path.clone(),
            temp_path_type: self.state.temp_path_type.clone(),
            undo_depth: self.history.depth(),
        })
    }

    /// Every catalogue entry, ordered by type key.
    #[must_use]
    pub fn catalog(&self) -> Vec<CatalogItem> {
        self.cache
            .catalog()
            .iter()
            .map(|(key, entry)| CatalogItem { type_key: key.to_owned(), entry: entry.clone() })
            .collect()
    }
}

#[cfg(test)]
#[path = "placement_test.rs"]
mod tests;
