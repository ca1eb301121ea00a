//! Store configuration.
//!
//! Every field has a default, so a partial JSON file only overrides what it
//! names:
//!
//! ```json
//! { "storageKey": "my-project", "grid": { "snap": true } }
//! ```

use crate::error::{DocumentError, DocumentResult};
use crate::history::DEFAULT_MAX_HISTORY;
use crate::snap::DEFAULT_GRID_SIZE;
use crate::storage::SaveMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Storage key the document blob is written under.
pub const DEFAULT_STORAGE_KEY: &str = "fui-designer-project";

/// Grid settings for the component store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Grid spacing in pixels.
    pub size: f64,
    /// Snap moves to the grid.
    pub snap: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            snap: false,
        }
    }
}

/// Settings shared by the document, component and history stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreConfig {
    pub storage_key: String,
    /// Bound on each of the undo and redo stacks.
    pub max_history: usize,
    pub grid: GridConfig,
    pub autosave: SaveMode,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            max_history: DEFAULT_MAX_HISTORY,
            grid: GridConfig::default(),
            autosave: SaveMode::default(),
        }
    }
}

impl StoreConfig {
    /// Parse configuration from JSON.
    pub fn from_json(json: &str) -> DocumentResult<Self> {
        serde_json::from_str(json).map_err(|e| DocumentError::Config(e.to_string()))
    }

    /// Serialize configuration to pretty JSON.
    pub fn to_json(&self) -> DocumentResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DocumentError::Config(e.to_string()))
    }

    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> DocumentResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            DocumentError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Write configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> DocumentResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?).map_err(|e| {
            DocumentError::Config(format!("Failed to write {}: {}", path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.storage_key, "fui-designer-project");
        assert_eq!(config.max_history, 50);
        assert!((config.grid.size - 10.0).abs() < f64::EPSILON);
        assert!(!config.grid.snap);
        assert_eq!(config.autosave, SaveMode::Immediate);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            StoreConfig::from_json(r#"{ "storageKey": "other", "grid": { "snap": true } }"#)
                .unwrap();
        assert_eq!(config.storage_key, "other");
        assert!(config.grid.snap);
        assert!((config.grid.size - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.max_history, 50);
    }

    #[test]
    fn test_autosave_mode_from_json() {
        let config = StoreConfig::from_json(r#"{ "autosave": { "interval": { "secs": 15 } } }"#)
            .unwrap();
        assert_eq!(config.autosave, SaveMode::Interval { secs: 15 });
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let result = StoreConfig::from_json("{ not json");
        assert!(matches!(result, Err(DocumentError::Config(_))));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut config = StoreConfig::default();
        config.max_history = 10;
        config.autosave = SaveMode::Manual;
        config.save(&path).unwrap();

        let loaded = StoreConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = StoreConfig::load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(DocumentError::Config(_))));
    }
}
