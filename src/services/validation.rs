//! Validation pipeline — ordered placement checks with short-circuit.
//!
//! DESIGN
//! ======
//! The pipeline is a fixed slice of plain stage functions. Each stage either
//! passes or rejects with a `PlacementError`; the first rejection wins and no
//! later stage runs. Stages are pure: they read the editor and the metadata
//! cache but never mutate either.
//!
//! COLLISION RULES
//! ===============
//! - Point candidate vs committed path: rejected when the distance from the
//!   point to any segment is strictly less than half the candidate's width.
//! - Point candidate vs committed point: rejected when the centered boxes
//!   overlap with positive area. Touching edges pass.
//! - Path vertex vs committed point: rejected when the vertex lies inside the
//!   point's centered box, edges included.
//!
//! Only committed elements take part; the in-progress path buffer is never
//! an obstacle.

use tracing::debug;

use crate::geometry::Point;
use crate::services::metadata::RenderMetadataCache;
use crate::services::placement::PlacementError;
use crate::state::{EditorState, Shape};

// =============================================================================
// TYPES
// =============================================================================

/// Geometry being proposed for placement.
#[derive(Debug, Clone, Copy)]
pub enum Candidate<'a> {
    /// A point element anchored at the given coordinate.
    Point(Point),
    /// Path vertices: a single incremental vertex or a whole path.
    Vertices(&'a [Point]),
}

#[derive(Debug, Clone, Copy)]
pub struct ValidationRequest<'a> {
    pub type_key: &'a str,
    pub candidate: Candidate<'a>,
}

impl<'a> ValidationRequest<'a> {
    #[must_use]
    pub fn point(type_key: &'a str, at: Point) -> Self {
        Self { type_key, candidate: Candidate::Point(at) }
    }

    #[must_use]
    pub fn vertices(type_key: &'a str, vertices: &'a [Point]) -> Self {
        Self { type_key, candidate: Candidate::Vertices(vertices) }
    }

    fn points(&self) -> &[Point] {
        match &self.candidate {
            Candidate::Point(p) => std::slice::from_ref(p),
            Candidate::Vertices(vs) => *vs,
        }
    }
}

type Stage = fn(&ValidationRequest<'_>, &EditorState, &RenderMetadataCache) -> Result<(), PlacementError>;

const STAGES: &[(&str, Stage)] = &[("boundary", check_boundary), ("collision", check_collision)];

// =============================================================================
// PIPELINE
// =============================================================================

/// Run every stage in order, stopping at the first rejection.
///
/// # Errors
///
/// Returns the rejection from the first failing stage.
pub fn validate(
    request: &ValidationRequest<'_>,
    state: &EditorState,
    cache: &RenderMetadataCache,
) -> Result<(), PlacementError> {
    for (name, stage) in STAGES {
        if let Err(e) = stage(request, state, cache) {
            debug!(stage = *name, type_key = request.type_key, error = %e, "placement rejected");
            return Err(e);
        }
    }
    Ok(())
}

// =============================================================================
// STAGES
// =============================================================================

/// Every candidate coordinate must lie on the canvas.
fn check_boundary(
    request: &ValidationRequest<'_>,
    _state: &EditorState,
    _cache: &RenderMetadataCache,
) -> Result<(), PlacementError> {
    match request.points().iter().find(|p| !p.in_bounds()) {
        Some(p) => Err(PlacementError::OutOfBounds { x: p.x, y: p.y }),
        None => Ok(()),
    }
}

fn check_collision(
    request: &ValidationRequest<'_>,
    state: &EditorState,
    cache: &RenderMetadataCache,
) -> Result<(), PlacementError> {
    match request.candidate {
        Candidate::Point(at) => check_point_collision(request.type_key, at, state, cache),
        Candidate::Vertices(vertices) => check_vertex_collision(vertices, state, cache),
    }
}

fn check_point_collision(
    type_key: &str,
    at: Point,
    state: &EditorState,
    cache: &RenderMetadataCache,
) -> Result<(), PlacementError> {
    let meta = cache.get(type_key)?;
    let candidate_box = meta.bounds_at(at);

    for element in &state.elements {
        let hit = match &element.shape {
            Shape::Path { path } => at
                .distance_to_polyline(path)
                .is_some_and(|d| d < meta.half_width()),
            Shape::Point { x, y } => {
                let existing = cache.get(&element.type_key)?;
                match (candidate_box, existing.bounds_at(Point::new(*x, *y))) {
                    (Some(a), Some(b)) => a.overlaps(&b),
                    _ => false,
                }
            }
        };
        if hit {
            return Err(PlacementError::Collision { type_key: element.type_key.clone(), id: element.id });
        }
    }
    Ok(())
}

fn check_vertex_collision(
    vertices: &[Point],
    state: &EditorState,
    cache: &RenderMetadataCache,
) -> Result<(), PlacementError> {
    for element in &state.elements {
        let Shape::Point { x, y } = element.shape else {
            continue;
        };
        let Some(bounds) = cache.get(&element.type_key)?.bounds_at(Point::new(x, y)) else {
            continue;
        };
        if vertices.iter().any(|v| bounds.contains(*v)) {
            return Err(PlacementError::Collision { type_key: element.type_key.clone(), id: element.id });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;
