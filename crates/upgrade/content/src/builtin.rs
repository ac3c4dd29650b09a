//! Content shipped inside the binary.
//!
//! Used when no data directory is configured, and as a fixture for tests.

/// Default upgrade catalog (RON).
pub const BUILTIN_CATALOG_RON: &str = include_str!("../data/upgrades.ron");

/// Default selection tuning (TOML).
pub const BUILTIN_SELECTION_TOML: &str = include_str!("../data/selection.toml");
