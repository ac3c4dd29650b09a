//! Selection configuration loader.

use std::path::Path;

use upgrade_core::SelectionConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for selection tuning from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their defaults.
    pub fn load(path: &Path) -> LoadResult<SelectionConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<SelectionConfig> {
        let config: SelectionConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse selection config TOML: {}", e))?;
        Ok(config)
    }
}
