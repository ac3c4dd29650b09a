//! Run-scoped upgrade selection and modifier composition.
//!
//! `upgrade-core` owns the rules for two things that happen during a run:
//! offering the player a weighted, constraint-filtered handful of upgrades at
//! each decision point, and folding every accepted upgrade into a single
//! [`ModifierSet`] that weapon and player systems read their stats from.
//!
//! Everything here is synchronous and free of I/O. Catalog files are read by
//! the `upgrade-content` crate; this crate only sees the resulting
//! [`UpgradeDefinition`] values.
pub mod accumulator;
pub mod catalog;
pub mod config;
pub mod coordinator;
pub mod definition;
pub mod eligibility;
pub mod error;
pub mod events;
pub mod modifiers;
pub mod rng;
pub mod selector;
pub mod session;

pub use accumulator::ModifierAccumulator;
pub use catalog::{CatalogSource, UpgradeCatalog};
pub use config::{SelectionConfig, TierWeights};
pub use coordinator::{DecisionOutcome, DecisionPhase, SelectionCoordinator};
pub use definition::{Category, Tier, UpgradeDefinition, UpgradeDefinitionBuilder};
pub use eligibility::{EligibilityFilter, Ineligibility};
pub use error::{AcceptError, CatalogError, EngineError, ErrorSeverity};
pub use events::{FnObserver, ObserverRegistry, UpgradeEvent, UpgradeObserver};
pub use modifiers::{ModifierSet, WeaponFlags, WeaponStats};
pub use rng::{PcgStream, SelectionRng};
pub use selector::WeightedSelector;
pub use session::{ActiveUpgradeSnapshot, RunSession};
