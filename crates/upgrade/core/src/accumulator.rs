//! Run-scoped record of accepted upgrades.
//!
//! The accumulator owns the acceptance-ordered list, the per-id stack counts
//! and the cached composed [`ModifierSet`]. The composed set is refolded from
//! scratch after every mutation; runs hold tens of upgrades at most.
//!
//! # Removal policy
//!
//! [`ModifierAccumulator::remove`] takes out the most recently accepted
//! instance of an id. Since composition is commutative the choice is not
//! observable through [`ModifierAccumulator::composed`].

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{info, warn};

use crate::catalog::UpgradeCatalog;
use crate::definition::UpgradeDefinition;
use crate::error::AcceptError;
use crate::events::{ObserverRegistry, UpgradeEvent, UpgradeObserver};
use crate::modifiers::ModifierSet;

#[derive(Debug)]
pub struct ModifierAccumulator {
    catalog: Arc<UpgradeCatalog>,
    accepted: Vec<Arc<UpgradeDefinition>>,
    stacks: HashMap<String, u32>,
    active_ids: HashSet<String>,
    composed: ModifierSet,
    observers: ObserverRegistry,
}

impl ModifierAccumulator {
    /// Creates an empty record bound to `catalog`.
    pub fn new(catalog: Arc<UpgradeCatalog>) -> Self {
        Self {
            catalog,
            accepted: Vec::new(),
            stacks: HashMap::new(),
            active_ids: HashSet::new(),
            composed: ModifierSet::IDENTITY,
            observers: ObserverRegistry::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Arc<dyn UpgradeObserver>) {
        self.observers.subscribe(observer);
    }

    pub fn unsubscribe(&mut self, name: &str) -> usize {
        self.observers.unsubscribe(name)
    }

    /// Adds one instance of `def` to the run.
    ///
    /// Emits `UpgradeAccepted` then `ModifiersChanged` before returning.
    ///
    /// # Errors
    ///
    /// - [`AcceptError::UnknownUpgrade`] if `def` is not the catalog's
    ///   definition for its id
    /// - [`AcceptError::StackLimitReached`] if the id is already at
    ///   `max_stacks`
    ///
    /// Nothing is mutated on error.
    pub fn accept(&mut self, def: &Arc<UpgradeDefinition>) -> Result<(), AcceptError> {
        let known = self
            .catalog
            .get(&def.id)
            .is_some_and(|entry| Arc::ptr_eq(entry, def) || **entry == **def);
        if !known {
            warn!(id = %def.id, "rejected accept of upgrade outside the catalog");
            return Err(AcceptError::UnknownUpgrade { id: def.id.clone() });
        }

        let current = self.stacks(&def.id);
        if current >= def.max_stacks {
            warn!(
                id = %def.id,
                stacks = current,
                max = def.max_stacks,
                "rejected accept at stack limit"
            );
            return Err(AcceptError::StackLimitReached {
                id: def.id.clone(),
                max: def.max_stacks,
            });
        }

        self.accepted.push(Arc::clone(def));
        *self.stacks.entry(def.id.clone()).or_insert(0) += 1;
        self.active_ids.insert(def.id.clone());
        self.recompute();

        info!(id = %def.id, stacks = current + 1, total = self.accepted.len(), "upgrade accepted");
        self.observers
            .notify(&UpgradeEvent::UpgradeAccepted(Arc::clone(def)));
        self.observers
            .notify(&UpgradeEvent::ModifiersChanged(self.composed));
        Ok(())
    }

    /// Looks `id` up in the catalog and accepts it.
    pub fn accept_id(&mut self, id: &str) -> Result<Arc<UpgradeDefinition>, AcceptError> {
        let Some(def) = self.catalog.get(id).cloned() else {
            warn!(id, "rejected accept of unknown upgrade id");
            return Err(AcceptError::UnknownUpgrade { id: id.to_string() });
        };
        self.accept(&def)?;
        Ok(def)
    }

    /// Removes the most recently accepted instance of `id`.
    ///
    /// Emits `UpgradeRemoved` then `ModifiersChanged`.
    ///
    /// # Errors
    ///
    /// [`AcceptError::NotActive`] if no instance of `id` is active.
    pub fn remove(&mut self, id: &str) -> Result<Arc<UpgradeDefinition>, AcceptError> {
        let Some(position) = self.accepted.iter().rposition(|def| def.id == id) else {
            warn!(id, "rejected remove of inactive upgrade");
            return Err(AcceptError::NotActive { id: id.to_string() });
        };

        let removed = self.accepted.remove(position);
        if let Some(count) = self.stacks.get_mut(id) {
            *count -= 1;
            if *count == 0 {
                self.stacks.remove(id);
                self.active_ids.remove(id);
            }
        }
        self.recompute();

        info!(id, remaining = self.stacks(id), "upgrade removed");
        self.observers
            .notify(&UpgradeEvent::UpgradeRemoved(Arc::clone(&removed)));
        self.observers
            .notify(&UpgradeEvent::ModifiersChanged(self.composed));
        Ok(removed)
    }

    /// Drops every active upgrade and resets the composed set to identity.
    ///
    /// Emits `Cleared` then `ModifiersChanged`.
    pub fn clear_all(&mut self) {
        let dropped = self.accepted.len();
        self.accepted.clear();
        self.stacks.clear();
        self.active_ids.clear();
        self.composed = ModifierSet::IDENTITY;

        info!(dropped, "active upgrades cleared");
        self.observers.notify(&UpgradeEvent::Cleared);
        self.observers
            .notify(&UpgradeEvent::ModifiersChanged(self.composed));
    }

    pub fn has_upgrade(&self, id: &str) -> bool {
        self.active_ids.contains(id)
    }

    pub fn stacks(&self, id: &str) -> u32 {
        self.stacks.get(id).copied().unwrap_or(0)
    }

    pub fn composed(&self) -> ModifierSet {
        self.composed
    }

    /// Accepted definitions in acceptance order (a copy).
    pub fn active(&self) -> Vec<Arc<UpgradeDefinition>> {
        self.accepted.clone()
    }

    pub fn stack_counts(&self) -> &HashMap<String, u32> {
        &self.stacks
    }

    pub fn active_ids(&self) -> &HashSet<String> {
        &self.active_ids
    }

    pub fn catalog(&self) -> &Arc<UpgradeCatalog> {
        &self.catalog
    }

    /// Number of accepted instances, counting stacks.
    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    fn recompute(&mut self) {
        self.composed = ModifierSet::combine_all(self.accepted.iter().map(|def| &def.effect));
    }
}
