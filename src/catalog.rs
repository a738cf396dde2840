//! Element type catalogue — static intrinsic data for every placeable type.
//!
//! DESIGN
//! ======
//! The catalogue is loaded once at startup, validated, and then treated as
//! immutable for the process lifetime. It is only read through the metadata
//! cache, never by the validation or projection code directly.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

// =============================================================================
// TYPES
// =============================================================================

/// Geometric class of an element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryClass {
    Point,
    Path,
}

impl GeometryClass {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Path => "path",
        }
    }
}

impl std::fmt::Display for GeometryClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalogue row as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    /// Image URL for point types, color token for path types.
    pub visual: String,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    pub class: GeometryClass,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io { path: String, source: std::io::Error },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("catalog is empty")]
    Empty,
    #[error("point type '{0}' must declare both width and height")]
    MissingDimensions(String),
    #[error("type '{0}' has a non-positive dimension")]
    InvalidDimensions(String),
}

/// Immutable mapping from type key to catalogue entry.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: BTreeMap<String, CatalogEntry>,
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

impl Catalog {
    /// Build a catalogue from pre-parsed entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the map is empty or any entry fails validation.
    pub fn new(entries: BTreeMap<String, CatalogEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (key, entry) in &entries {
            validate_entry(key, entry)?;
        }
        Ok(Self { entries })
    }

    /// Parse a YAML mapping of `type_key: { name, visual, width, height, class }`.
    ///
    /// # Errors
    ///
    /// Returns `Parse` on malformed YAML, or a validation error.
    pub fn from_yaml_str(raw: &str) -> Result<Self, CatalogError> {
        let entries: BTreeMap<String, CatalogEntry> = serde_yaml::from_str(raw)?;
        Self::new(entries)
    }

    /// Load a YAML catalogue from disk.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file can't be read, otherwise as `from_yaml_str`.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|source| CatalogError::Io { path: path.display().to_string(), source })?;
        Self::from_yaml_str(&raw)
    }

    /// The default map palette: three point types and one road type.
    #[must_use]
    pub fn builtin() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert("tree".to_owned(), point_entry("Árvore", "1f332", 40.0));
        entries.insert("building".to_owned(), point_entry("Prédio", "1f3e2", 50.0));
        entries.insert("water".to_owned(), point_entry("Água", "1f30a", 48.0));
        entries.insert(
            "road".to_owned(),
            CatalogEntry {
                name: "Rua".into(),
                visual: "#6b7280".into(),
                width: Some(10.0),
                height: Some(10.0),
                class: GeometryClass::Path,
            },
        );
        Self { entries }
    }
}

fn point_entry(name: &str, emoji: &str, size: f64) -> CatalogEntry {
    CatalogEntry {
        name: name.to_owned(),
        visual: format!("https://cdn.jsdelivr.net/npm/emoji-datasource-apple/img/apple/64/{emoji}.png"),
        width: Some(size),
        height: Some(size),
        class: GeometryClass::Point,
    }
}

fn validate_entry(key: &str, entry: &CatalogEntry) -> Result<(), CatalogError> {
    if entry.class == GeometryClass::Point && (entry.width.is_none() || entry.height.is_none()) {
        return Err(CatalogError::MissingDimensions(key.to_owned()));
    }
    let positive = |d: Option<f64>| d.is_none_or(|v| v.is_finite() && v > 0.0);
    if !positive(entry.width) || !positive(entry.height) {
        return Err(CatalogError::InvalidDimensions(key.to_owned()));
    }
    Ok(())
}

// =============================================================================
// LOOKUP
// =============================================================================

impl Catalog {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.get(key)
    }

    /// All entries, ordered by type key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CatalogEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
