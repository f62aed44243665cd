//! Android launcher density table
//!
//! Maps each `mipmap-*` resource folder to the edge length of the launcher
//! icon it holds. The default table covers the five standard densities; a
//! replacement can be loaded from a JSON file with the same shape.

use crate::error::{IconError, Result};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_DENSITIES: &str = r#"
[
  { "folder": "mipmap-mdpi", "size": 48 },
  { "folder": "mipmap-hdpi", "size": 72 },
  { "folder": "mipmap-xhdpi", "size": 96 },
  { "folder": "mipmap-xxhdpi", "size": 144 },
  { "folder": "mipmap-xxxhdpi", "size": 192 }
]
"#;

/// A single density bucket
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Density {
    /// Resource folder name, relative to the `res` directory (e.g. "mipmap-hdpi")
    pub folder: String,

    /// Icon edge length in pixels
    pub size: u32,
}

/// Ordered list of densities to render
///
/// Entries are kept in file order, which is also the order icons are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DensityTable {
    entries: Vec<Density>,
}

impl DensityTable {
    /// Validate and wrap a list of densities
    pub fn new(entries: Vec<Density>) -> Result<Self> {
        if entries.is_empty() {
            return Err(density_error("table has no entries"));
        }
        for entry in &entries {
            if entry.folder.trim().is_empty() {
                return Err(density_error("folder name must not be empty"));
            }
            if entry.size == 0 {
                return Err(density_error(format!(
                    "{} has size 0; sizes must be positive",
                    entry.folder
                )));
            }
        }
        Ok(Self { entries })
    }

    /// The five standard Android launcher densities (48 to 192 px)
    pub fn defaults() -> Result<Self> {
        Self::from_json_str(DEFAULT_DENSITIES)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<Density> =
            serde_json::from_str(json).map_err(|e| density_error(e.to_string()))?;
        Self::new(entries)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| IconError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Density> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn density_error(message: impl Into<String>) -> IconError {
    IconError::Density {
        message: message.into(),
    }
}
