//! Data-driven upgrade content and loaders.
//!
//! This crate houses the shipped upgrade catalog and selection tuning, and
//! provides loaders for RON/TOML data files:
//! - Upgrade catalogs (data-driven via RON)
//! - Selection configuration (data-driven via TOML)
//!
//! Content is handed to `upgrade-core` as plain definitions; parsing and file
//! access never happen inside the engine.

pub mod builtin;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use builtin::{BUILTIN_CATALOG_RON, BUILTIN_SELECTION_TOML};

#[cfg(feature = "loaders")]
pub use loaders::{CatalogLoader, ConfigLoader, ContentFactory, RonCatalogSource, UpgradeCatalogFile};
