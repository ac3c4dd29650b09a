//! Driver configuration from environment variables.
use std::env;
use std::path::PathBuf;

/// Settings for one headless run.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Directory holding `upgrades.ron` and `selection.toml`. Built-in
    /// content is used when unset.
    pub data_dir: Option<PathBuf>,
    pub seed: u64,
    /// Player level at the first decision point.
    pub player_level: u32,
    /// Levels gained between decision points.
    pub level_step: u32,
    pub decisions: u32,
    /// Directory for the log file. Defaults to the platform cache dir.
    pub log_dir: Option<PathBuf>,
}

impl SimConfig {
    pub const DEFAULT_SEED: u64 = 0x5EED;
    pub const DEFAULT_DECISIONS: u32 = 10;

    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `UPGRADE_DATA_DIR` - Content directory (default: built-in content)
    /// - `UPGRADE_SEED` - Random seed (default: 0x5EED)
    /// - `UPGRADE_PLAYER_LEVEL` - Starting player level (default: 1)
    /// - `UPGRADE_LEVEL_STEP` - Levels gained per decision (default: 1)
    /// - `UPGRADE_DECISIONS` - Number of decision points (default: 10)
    /// - `UPGRADE_LOG_DIR` - Log directory override
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = env::var_os("UPGRADE_DATA_DIR").map(PathBuf::from);
        config.log_dir = env::var_os("UPGRADE_LOG_DIR").map(PathBuf::from);

        if let Some(seed) = read_env::<u64>("UPGRADE_SEED") {
            config.seed = seed;
        }
        if let Some(level) = read_env::<u32>("UPGRADE_PLAYER_LEVEL") {
            config.player_level = level.max(1);
        }
        if let Some(step) = read_env::<u32>("UPGRADE_LEVEL_STEP") {
            config.level_step = step;
        }
        if let Some(decisions) = read_env::<u32>("UPGRADE_DECISIONS") {
            config.decisions = decisions;
        }

        config
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_decisions(mut self, decisions: u32) -> Self {
        self.decisions = decisions;
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    /// Player level at the given zero-based decision index.
    pub fn level_at(&self, decision: u32) -> u32 {
        self.player_level
            .saturating_add(self.level_step.saturating_mul(decision))
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            seed: Self::DEFAULT_SEED,
            player_level: 1,
            level_step: 1,
            decisions: Self::DEFAULT_DECISIONS,
            log_dir: None,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_grows_by_step() {
        let config = SimConfig {
            player_level: 2,
            level_step: 3,
            ..SimConfig::default()
        };
        assert_eq!(config.level_at(0), 2);
        assert_eq!(config.level_at(4), 14);
    }

    #[test]
    fn level_saturates() {
        let config = SimConfig {
            player_level: u32::MAX,
            ..SimConfig::default()
        };
        assert_eq!(config.level_at(5), u32::MAX);
    }
}
