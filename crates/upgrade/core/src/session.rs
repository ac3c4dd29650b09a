//! One run's worth of upgrade state.
//!
//! [`RunSession`] is the single owner of the catalog handle, the accumulator,
//! the coordinator and the random stream for a run. Callers hold the session
//! and pass it by reference; nothing here is global.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;

use crate::accumulator::ModifierAccumulator;
use crate::catalog::UpgradeCatalog;
use crate::config::SelectionConfig;
use crate::coordinator::SelectionCoordinator;
use crate::definition::UpgradeDefinition;
use crate::error::AcceptError;
use crate::events::UpgradeObserver;
use crate::modifiers::ModifierSet;
use crate::rng::PcgStream;

/// Read-only view of the run's upgrades, for save files, debug overlays and
/// replay checks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveUpgradeSnapshot {
    /// Ids in acceptance order.
    pub accepted: Vec<String>,
    pub stacks: BTreeMap<String, u32>,
    pub composed: ModifierSet,
    pub decisions: u64,
    pub rng_state: u64,
}

#[derive(Debug)]
pub struct RunSession {
    config: SelectionConfig,
    accumulator: ModifierAccumulator,
    coordinator: SelectionCoordinator,
    rng: PcgStream,
    seed: u64,
    decisions: u64,
}

impl RunSession {
    pub fn new(catalog: Arc<UpgradeCatalog>, config: SelectionConfig, seed: u64) -> Self {
        let coordinator = SelectionCoordinator::new(config.tier_weights);
        Self {
            accumulator: ModifierAccumulator::new(catalog),
            coordinator,
            config,
            rng: PcgStream::new(seed),
            seed,
            decisions: 0,
        }
    }

    /// Registers `observer` on both the coordinator and the accumulator.
    pub fn subscribe(&mut self, observer: Arc<dyn UpgradeObserver>) {
        self.coordinator.subscribe(Arc::clone(&observer));
        self.accumulator.subscribe(observer);
    }

    /// Opens a decision point using the configured offer size.
    pub fn offer(&mut self, player_level: u32) -> Vec<Arc<UpgradeDefinition>> {
        self.decisions += 1;
        let catalog = Arc::clone(self.accumulator.catalog());
        self.coordinator.offer(
            &catalog,
            player_level,
            &self.accumulator,
            self.config.offer_count,
            self.config.allow_duplicates,
            &mut self.rng,
        )
    }

    /// Accepts one of the offered candidates and closes the decision point.
    pub fn choose(&mut self, id: &str) -> Result<Arc<UpgradeDefinition>, AcceptError> {
        let chosen = self.coordinator.resolve(id, &mut self.accumulator)?;
        self.coordinator.finish();
        Ok(chosen)
    }

    /// Closes the pending decision point without a pick.
    pub fn cancel(&mut self) -> Result<(), AcceptError> {
        self.coordinator.cancel()?;
        self.coordinator.finish();
        Ok(())
    }

    /// Starts the run over: clears upgrades, closes any pending offer and
    /// rewinds the random stream to the original seed.
    pub fn reset(&mut self) {
        info!(seed = self.seed, decisions = self.decisions, "run reset");
        self.accumulator.clear_all();
        self.coordinator.finish();
        self.rng = PcgStream::new(self.seed);
        self.decisions = 0;
    }

    pub fn composed(&self) -> ModifierSet {
        self.accumulator.composed()
    }

    pub fn accumulator(&self) -> &ModifierAccumulator {
        &self.accumulator
    }

    /// Direct access for debug tooling and removals outside a decision point.
    pub fn accumulator_mut(&mut self) -> &mut ModifierAccumulator {
        &mut self.accumulator
    }

    pub fn coordinator(&self) -> &SelectionCoordinator {
        &self.coordinator
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Arc<UpgradeCatalog> {
        self.accumulator.catalog()
    }

    pub fn decisions(&self) -> u64 {
        self.decisions
    }

    pub fn snapshot(&self) -> ActiveUpgradeSnapshot {
        ActiveUpgradeSnapshot {
            accepted: self
                .accumulator
                .active()
                .iter()
                .map(|def| def.id.clone())
                .collect(),
            stacks: self
                .accumulator
                .stack_counts()
                .iter()
                .map(|(id, count)| (id.clone(), *count))
                .collect(),
            composed: self.accumulator.composed(),
            decisions: self.decisions,
            rng_state: self.rng.state(),
        }
    }
}
