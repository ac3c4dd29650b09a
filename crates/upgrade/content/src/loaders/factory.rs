//! Content factory for building the catalog and config from data files.

use std::path::{Path, PathBuf};

use upgrade_core::{SelectionConfig, UpgradeCatalog};

use crate::builtin::{BUILTIN_CATALOG_RON, BUILTIN_SELECTION_TOML};
use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult};

/// Content factory that loads upgrade content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── selection.toml   (optional, defaults apply when absent)
/// └── upgrades.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load selection tuning from `selection.toml`, or defaults if the file
    /// does not exist.
    pub fn load_config(&self) -> LoadResult<SelectionConfig> {
        let path = self.data_dir.join("selection.toml");
        if !path.exists() {
            tracing::info!(path = %path.display(), "no selection config; using defaults");
            return Ok(SelectionConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load and validate the catalog from `upgrades.ron`.
    pub fn load_catalog(&self, config: &SelectionConfig) -> LoadResult<UpgradeCatalog> {
        let path = self.data_dir.join("upgrades.ron");
        CatalogLoader::load_catalog(&path, config.min_spawn_weight)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Config and catalog shipped with the crate.
    pub fn builtin() -> LoadResult<(SelectionConfig, UpgradeCatalog)> {
        let config = ConfigLoader::parse(BUILTIN_SELECTION_TOML)?;
        let definitions = CatalogLoader::parse(BUILTIN_CATALOG_RON)?;
        let catalog = UpgradeCatalog::from_definitions(definitions, config.min_spawn_weight)?;
        Ok((config, catalog))
    }
}
