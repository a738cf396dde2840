//! Render metadata cache — one shared metadata object per element type.
//!
//! DESIGN
//! ======
//! Read-through memo table over the immutable catalogue. The first `get` for
//! a type key materializes an `Arc<ElementTypeMetadata>`; every later call
//! hands out a clone of that same `Arc`. `get` takes `&self` so the read-only
//! state projection can warm the cache while holding a shared lock.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::catalog::{Catalog, GeometryClass};
use crate::geometry::{Bounds, Point};
use crate::services::placement::PlacementError;

// =============================================================================
// TYPES
// =============================================================================

/// Intrinsic, shareable data for one element type.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementTypeMetadata {
    pub type_key: String,
    pub name: String,
    pub visual: String,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub class: GeometryClass,
}

impl ElementTypeMetadata {
    /// Bounding box of an element of this type anchored at `center`.
    ///
    /// Types without dimensions have no box.
    #[must_use]
    pub fn bounds_at(&self, center: Point) -> Option<Bounds> {
        Some(Bounds::centered(center, self.width?, self.height?))
    }

    /// Half the bounding width, or zero for types without one.
    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.width.unwrap_or(0.0) / 2.0
    }
}

pub struct RenderMetadataCache {
    catalog: Catalog,
    entries: Mutex<HashMap<String, Arc<ElementTypeMetadata>>>,
    constructions: AtomicUsize,
}

// =============================================================================
// LOOKUP
// =============================================================================

impl RenderMetadataCache {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog, entries: Mutex::new(HashMap::new()), constructions: AtomicUsize::new(0) }
    }

    /// Shared metadata for `type_key`, constructing it on first use.
    ///
    /// # Errors
    ///
    /// Returns `UnknownType` if the catalogue has no such key.
    pub fn get(&self, type_key: &str) -> Result<Arc<ElementTypeMetadata>, PlacementError> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(meta) = entries.get(type_key) {
            return Ok(Arc::clone(meta));
        }

        let entry = self
            .catalog
            .get(type_key)
            .ok_or_else(|| PlacementError::UnknownType(type_key.to_owned()))?;
        debug!(type_key, "materializing render metadata");
        let meta = Arc::new(ElementTypeMetadata {
            type_key: type_key.to_owned(),
            name: entry.name.clone(),
            visual: entry.visual.clone(),
            width: entry.width,
            height: entry.height,
            class: entry.class,
        });
        self.constructions.fetch_add(1, Ordering::Relaxed);
        entries.insert(type_key.to_owned(), Arc::clone(&meta));
        Ok(meta)
    }

    /// Number of metadata objects materialized so far.
    #[must_use]
    pub fn constructions(&self) -> usize {
        self.constructions.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[cfg(test)]
#[path = "metadata_test.rs"]
mod tests;
