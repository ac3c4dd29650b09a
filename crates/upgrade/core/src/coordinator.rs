//! Decision-point orchestration.
//!
//! ```text
//! Idle ──offer──▶ Offered ──resolve(id)──▶ Resolved(Chosen) ──finish──▶ Idle
//!                    │                              ▲
//!                    └────────cancel────────▶ Resolved(Cancelled)
//! ```
//!
//! `offer` may be called from any phase; a pending offer is replaced. The
//! coordinator does not enforce timing or UI policy, it only guarantees that
//! the accepted upgrade was one of the offered candidates.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::accumulator::ModifierAccumulator;
use crate::catalog::UpgradeCatalog;
use crate::config::TierWeights;
use crate::definition::UpgradeDefinition;
use crate::eligibility::EligibilityFilter;
use crate::error::AcceptError;
use crate::events::{ObserverRegistry, UpgradeEvent, UpgradeObserver};
use crate::rng::SelectionRng;
use crate::selector::WeightedSelector;

/// How a decision point ended.
#[derive(Clone, Debug, PartialEq)]
pub enum DecisionOutcome {
    Chosen(Arc<UpgradeDefinition>),
    Cancelled,
}

/// Current phase of the decision point.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DecisionPhase {
    #[default]
    Idle,
    Offered(Vec<Arc<UpgradeDefinition>>),
    Resolved(DecisionOutcome),
}

#[derive(Debug, Default)]
pub struct SelectionCoordinator {
    tier_weights: TierWeights,
    phase: DecisionPhase,
    observers: ObserverRegistry,
}

impl SelectionCoordinator {
    pub fn new(tier_weights: TierWeights) -> Self {
        Self {
            tier_weights,
            phase: DecisionPhase::Idle,
            observers: ObserverRegistry::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Arc<dyn UpgradeObserver>) {
        self.observers.subscribe(observer);
    }

    pub fn unsubscribe(&mut self, name: &str) -> usize {
        self.observers.unsubscribe(name)
    }

    pub fn phase(&self) -> &DecisionPhase {
        &self.phase
    }

    pub fn tier_weights(&self) -> &TierWeights {
        &self.tier_weights
    }

    /// Computes a fresh offer for the player.
    ///
    /// Filters `catalog` through the eligibility rules against `active`, then
    /// draws up to `count` candidates. An empty result is not an error; the
    /// caller decides whether to skip the decision point. A `count` of zero
    /// is rejected with a warning and yields an empty offer without changing
    /// the phase.
    ///
    /// Emits `SelectionOffered` when the phase moves to `Offered`.
    pub fn offer<R>(
        &mut self,
        catalog: &UpgradeCatalog,
        player_level: u32,
        active: &ModifierAccumulator,
        count: usize,
        allow_duplicates: bool,
        rng: &mut R,
    ) -> Vec<Arc<UpgradeDefinition>>
    where
        R: SelectionRng + ?Sized,
    {
        if count == 0 {
            warn!("rejected offer request for zero candidates");
            return Vec::new();
        }

        let pool = EligibilityFilter::eligible_pool(
            catalog,
            player_level,
            active.stack_counts(),
            active.active_ids(),
        );
        debug!(
            eligible = pool.len(),
            catalog = catalog.len(),
            player_level,
            "eligible pool computed"
        );

        let candidates =
            WeightedSelector::new(&self.tier_weights).select(&pool, count, allow_duplicates, rng);

        if matches!(self.phase, DecisionPhase::Offered(_)) {
            warn!("pending offer replaced before it was resolved");
        }
        info!(
            candidates = ?candidates.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(),
            "selection offered"
        );

        self.phase = DecisionPhase::Offered(candidates.clone());
        self.observers
            .notify(&UpgradeEvent::SelectionOffered(candidates.clone()));
        candidates
    }

    /// Accepts the offered candidate `id` into `accumulator`.
    ///
    /// # Errors
    ///
    /// - [`AcceptError::NoPendingOffer`] outside the `Offered` phase
    /// - [`AcceptError::NotOffered`] if `id` was not a candidate
    /// - anything [`ModifierAccumulator::accept`] rejects
    ///
    /// The phase only moves to `Resolved` on success.
    pub fn resolve(
        &mut self,
        id: &str,
        accumulator: &mut ModifierAccumulator,
    ) -> Result<Arc<UpgradeDefinition>, AcceptError> {
        let DecisionPhase::Offered(candidates) = &self.phase else {
            warn!(id, "rejected resolve with no pending offer");
            return Err(AcceptError::NoPendingOffer);
        };
        let Some(chosen) = candidates.iter().find(|def| def.id == id).cloned() else {
            warn!(id, "rejected resolve of upgrade that was not offered");
            return Err(AcceptError::NotOffered { id: id.to_string() });
        };

        accumulator.accept(&chosen)?;
        self.phase = DecisionPhase::Resolved(DecisionOutcome::Chosen(Arc::clone(&chosen)));
        Ok(chosen)
    }

    /// Ends a pending offer without a pick.
    pub fn cancel(&mut self) -> Result<(), AcceptError> {
        if !matches!(self.phase, DecisionPhase::Offered(_)) {
            return Err(AcceptError::NoPendingOffer);
        }
        info!("offer cancelled");
        self.phase = DecisionPhase::Resolved(DecisionOutcome::Cancelled);
        Ok(())
    }

    /// Returns to `Idle` from any phase, discarding a pending offer.
    ///
    /// Hands back the outcome if the decision point was resolved.
    pub fn finish(&mut self) -> Option<DecisionOutcome> {
        match std::mem::take(&mut self.phase) {
            DecisionPhase::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::definition::{Category, Tier};
    use crate::events::FnObserver;
    use crate::rng::PcgStream;

    fn catalog() -> Arc<UpgradeCatalog> {
        let defs = vec![
            UpgradeDefinition::builder("a", Category::Damage).build(),
            UpgradeDefinition::builder("b", Category::FireRate)
                .tier(Tier::Rare)
                .build(),
            UpgradeDefinition::builder("gated", Category::Special)
                .min_level(10)
                .build(),
        ];
        Arc::new(UpgradeCatalog::from_definitions(defs, 0.01).unwrap())
    }

    #[test]
    fn offer_filters_then_selects() {
        let catalog = catalog();
        let acc = ModifierAccumulator::new(catalog.clone());
        let mut coordinator = SelectionCoordinator::new(TierWeights::default());
        let mut rng = PcgStream::new(11);

        let offer = coordinator.offer(&catalog, 1, &acc, 3, false, &mut rng);

        assert_eq!(offer.len(), 2);
        assert!(offer.iter().all(|d| d.id != "gated"));
        assert_eq!(coordinator.phase(), &DecisionPhase::Offered(offer));
    }

    #[test]
    fn zero_count_is_rejected_without_phase_change() {
        let catalog = catalog();
        let acc = ModifierAccumulator::new(catalog.clone());
        let mut coordinator = SelectionCoordinator::new(TierWeights::default());
        let mut rng = PcgStream::new(11);

        assert!(coordinator.offer(&catalog, 1, &acc, 0, false, &mut rng).is_empty());
        assert_eq!(coordinator.phase(), &DecisionPhase::Idle);
    }

    #[test]
    fn empty_pool_still_offers_empty_list() {
        let catalog = catalog();
        let mut acc = ModifierAccumulator::new(catalog.clone());
        acc.accept_id("a").unwrap();
        acc.accept_id("b").unwrap();
        let mut coordinator = SelectionCoordinator::new(TierWeights::default());
        let mut rng = PcgStream::new(11);

        let offer = coordinator.offer(&catalog, 1, &acc, 3, false, &mut rng);
        assert!(offer.is_empty());
    }

    #[test]
    fn resolve_accepts_only_offered_ids() {
        let catalog = catalog();
        let mut acc = ModifierAccumulator::new(catalog.clone());
        let mut coordinator = SelectionCoordinator::new(TierWeights::default());
        let mut rng = PcgStream::new(5);

        assert_eq!(
            coordinator.resolve("a", &mut acc).unwrap_err(),
            AcceptError::NoPendingOffer
        );

        coordinator.offer(&catalog, 1, &acc, 3, false, &mut rng);
        assert_eq!(
            coordinator.resolve("gated", &mut acc).unwrap_err(),
            AcceptError::NotOffered { id: "gated".into() }
        );

        let chosen = coordinator.resolve("b", &mut acc).unwrap();
        assert_eq!(chosen.id, "b");
        assert!(acc.has_upgrade("b"));
        assert_eq!(
            coordinator.finish(),
            Some(DecisionOutcome::Chosen(chosen))
        );
        assert_eq!(coordinator.phase(), &DecisionPhase::Idle);
    }

    #[test]
    fn cancel_resolves_without_pick() {
        let catalog = catalog();
        let acc = ModifierAccumulator::new(catalog.clone());
        let mut coordinator = SelectionCoordinator::new(TierWeights::default());
        let mut rng = PcgStream::new(5);

        assert!(coordinator.cancel().is_err());
        coordinator.offer(&catalog, 1, &acc, 2, false, &mut rng);
        coordinator.cancel().unwrap();

        assert_eq!(coordinator.finish(), Some(DecisionOutcome::Cancelled));
        assert!(acc.is_empty());
    }

    #[test]
    fn offer_notifies_observers() {
        let catalog = catalog();
        let acc = ModifierAccumulator::new(catalog.clone());
        let mut coordinator = SelectionCoordinator::new(TierWeights::default());
        let offered = Arc::new(Mutex::new(Vec::new()));
        let sink = offered.clone();
        coordinator.subscribe(Arc::new(FnObserver::new("cards", move |e: &UpgradeEvent| {
            if let UpgradeEvent::SelectionOffered(candidates) = e {
                sink.lock().unwrap().push(candidates.len());
            }
        })));
        let mut rng = PcgStream::new(5);

        coordinator.offer(&catalog, 1, &acc, 1, false, &mut rng);
        coordinator.offer(&catalog, 1, &acc, 2, false, &mut rng);

        assert_eq!(*offered.lock().unwrap(), [1, 2]);
    }
}
