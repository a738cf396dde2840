//! Canvas geometry primitives used by the collision stage.
//!
//! All coordinates live in the same unit space as the canvas bounds. Point
//! elements are anchored at their center: a 40x40 tree at (100, 100) covers
//! `[80, 120] x [80, 120]`.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

/// Canvas width in coordinate units.
pub const MAP_WIDTH: f64 = 500.0;

/// Canvas height in coordinate units.
pub const MAP_HEIGHT: f64 = 300.0;

/// A single canvas coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether the point lies on the canvas, edges included.
    #[must_use]
    pub fn in_bounds(self) -> bool {
        (0.0..=MAP_WIDTH).contains(&self.x) && (0.0..=MAP_HEIGHT).contains(&self.y)
    }

    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Shortest distance from this point to the segment `a`-`b`.
    ///
    /// The projection parameter is clamped to `[0, 1]`. A zero-length segment
    /// degenerates to the distance between this point and `a`.
    #[must_use]
    pub fn distance_to_segment(self, a: Self, b: Self) -> f64 {
        let abx = b.x - a.x;
        let aby = b.y - a.y;
        let ab2 = abx * abx + aby * aby;
        if ab2 <= f64::EPSILON {
            return self.distance_to(a);
        }

        let t = (((self.x - a.x) * abx + (self.y - a.y) * aby) / ab2).clamp(0.0, 1.0);
        self.distance_to(Self::new(a.x + t * abx, a.y + t * aby))
    }

    /// Shortest distance from this point to any segment of a polyline.
    ///
    /// Returns `None` for polylines with fewer than two vertices.
    #[must_use]
    pub fn distance_to_polyline(self, vertices: &[Self]) -> Option<f64> {
        vertices
            .windows(2)
            .map(|seg| self.distance_to_segment(seg[0], seg[1]))
            .reduce(f64::min)
    }
}

/// Axis-aligned box centered on an element's anchor point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    #[must_use]
    pub fn centered(center: Point, width: f64, height: f64) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        Self { min: Point::new(center.x - hw, center.y - hh), max: Point::new(center.x + hw, center.y + hh) }
    }

    /// Overlap with positive area. Boxes that only share an edge or a corner
    /// do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.x < other.max.x && other.min.x < self.max.x && self.min.y < other.max.y && other.min.y < self.max.y
    }

    /// Containment with edges included.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        (self.min.x..=self.max.x).contains(&p.x) && (self.min.y..=self.max.y).contains(&p.y)
    }
}
