//! Upgrade catalog loader.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use upgrade_core::{CatalogError, CatalogSource, UpgradeCatalog, UpgradeDefinition};

use crate::loaders::{LoadResult, read_file};

/// Upgrade catalog structure for RON files.
///
/// Example:
/// ```ron
/// (
///     upgrades: [
///         (
///             id: "rapid_fire",
///             display_name: "Rapid Fire",
///             category: FireRate,
///             tier: Common,
///             effect: (fire_rate_multiplier: 1.15),
///             max_stacks: 5,
///         ),
///     ],
/// )
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeCatalogFile {
    pub upgrades: Vec<UpgradeDefinition>,
}

/// Loader for upgrade catalogs from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load upgrade definitions from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing an UpgradeCatalogFile
    pub fn load(path: &Path) -> LoadResult<Vec<UpgradeDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse upgrade catalog {}: {}", path.display(), e))
    }

    /// Parse upgrade definitions from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<UpgradeDefinition>> {
        let file: UpgradeCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse upgrade catalog RON: {}", e))?;
        Ok(file.upgrades)
    }

    /// Load and validate a catalog in one step.
    ///
    /// Duplicate ids fail the whole load.
    pub fn load_catalog(path: &Path, min_spawn_weight: f32) -> LoadResult<UpgradeCatalog> {
        let catalog = UpgradeCatalog::load(RonCatalogSource::new(path), min_spawn_weight)?;
        tracing::info!(path = %path.display(), upgrades = catalog.len(), "upgrade catalog loaded");
        Ok(catalog)
    }
}

/// [`CatalogSource`] backed by a RON file on disk.
#[derive(Debug, Clone)]
pub struct RonCatalogSource {
    path: PathBuf,
}

impl RonCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for RonCatalogSource {
    fn definitions(self) -> Result<Vec<UpgradeDefinition>, CatalogError> {
        CatalogLoader::load(&self.path).map_err(|e| CatalogError::Source(format!("{e:#}")))
    }
}
