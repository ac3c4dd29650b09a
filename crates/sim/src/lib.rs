//! Headless upgrade run driver.
//!
//! Plays a fixed number of decision points against a catalog, picking from
//! each offer with a deterministic policy, and reports the resulting upgrade
//! state and weapon stats.

pub mod config;
pub mod driver;
pub mod logging;
pub mod observer;

pub use config::SimConfig;
pub use driver::{PickPolicy, RunReport, SimDriver};
pub use observer::{LoggingObserver, WeaponObserver};
