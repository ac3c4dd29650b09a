//! Plays decision points end to end.
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use upgrade_content::ContentFactory;
use upgrade_core::{
    ActiveUpgradeSnapshot, RunSession, SelectionConfig, UpgradeCatalog, UpgradeDefinition,
    WeaponStats,
};

use crate::config::SimConfig;
use crate::observer::{LoggingObserver, WeaponObserver};

/// How the driver chooses from an offer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PickPolicy {
    /// Always the first offered card.
    First,
    /// Highest tier; earlier cards win ties.
    #[default]
    HighestTier,
    /// Decline every offer.
    Skip,
}

impl PickPolicy {
    fn pick<'a>(&self, offer: &'a [Arc<UpgradeDefinition>]) -> Option<&'a Arc<UpgradeDefinition>> {
        match self {
            Self::First => offer.first(),
            // max_by_key keeps the last maximum, so walk backwards.
            Self::HighestTier => offer.iter().rev().max_by_key(|def| def.tier),
            Self::Skip => None,
        }
    }
}

/// Outcome of a headless run.
#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    pub seed: u64,
    /// Chosen id per decision point; `None` for skipped or empty offers.
    pub picks: Vec<Option<String>>,
    pub snapshot: ActiveUpgradeSnapshot,
    pub weapon: WeaponStats,
}

/// Runs a session against a catalog.
pub struct SimDriver {
    config: SimConfig,
    selection: SelectionConfig,
    catalog: Arc<UpgradeCatalog>,
    policy: PickPolicy,
}

impl SimDriver {
    pub fn new(config: SimConfig, selection: SelectionConfig, catalog: Arc<UpgradeCatalog>) -> Self {
        Self {
            config,
            selection,
            catalog,
            policy: PickPolicy::default(),
        }
    }

    /// Loads content from `config.data_dir`, or the built-in content when
    /// no directory is set.
    pub fn from_config(config: SimConfig) -> Result<Self> {
        let (selection, catalog) = match &config.data_dir {
            Some(dir) => {
                let factory = ContentFactory::new(dir);
                let selection = factory.load_config()?;
                let catalog = factory
                    .load_catalog(&selection)
                    .with_context(|| format!("loading content from {}", dir.display()))?;
                (selection, catalog)
            }
            None => ContentFactory::builtin().context("loading built-in content")?,
        };
        Ok(Self::new(config, selection, Arc::new(catalog)))
    }

    pub fn with_policy(mut self, policy: PickPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn catalog(&self) -> &Arc<UpgradeCatalog> {
        &self.catalog
    }

    pub fn run(&self) -> Result<RunReport> {
        let mut session = RunSession::new(
            Arc::clone(&self.catalog),
            self.selection.clone(),
            self.config.seed,
        );
        let weapon = Arc::new(WeaponObserver::default());
        session.subscribe(Arc::new(LoggingObserver));
        session.subscribe(weapon.clone());

        tracing::info!(
            seed = self.config.seed,
            decisions = self.config.decisions,
            upgrades = self.catalog.len(),
            "starting run"
        );

        let mut picks = Vec::with_capacity(self.config.decisions as usize);
        for decision in 0..self.config.decisions {
            let level = self.config.level_at(decision);
            let offer = session.offer(level);
            if offer.is_empty() {
                tracing::info!(decision, level, "nothing eligible");
                session.cancel()?;
                picks.push(None);
                continue;
            }

            let pick = match self.policy.pick(&offer) {
                Some(def) => {
                    let chosen = session
                        .choose(&def.id)
                        .with_context(|| format!("decision {decision}: choosing {}", def.id))?;
                    Some(chosen.id.clone())
                }
                None => {
                    session.cancel()?;
                    None
                }
            };
            picks.push(pick);
        }

        let snapshot = session.snapshot();
        tracing::info!(
            accepted = snapshot.accepted.len(),
            decisions = snapshot.decisions,
            "run finished"
        );

        Ok(RunReport {
            seed: self.config.seed,
            picks,
            snapshot,
            weapon: weapon.current(),
        })
    }
}
