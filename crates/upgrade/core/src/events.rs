//! Outbound notifications.
//!
//! Collaborators (card UI, audio/VFX, the weapon system) register an
//! [`UpgradeObserver`] on the coordinator and/or the accumulator. Delivery is
//! synchronous: every observer has seen the event before the call that
//! produced it returns.
//!
//! # Execution Order
//!
//! Observers are sorted by priority (lower values first). Registration order
//! breaks ties.

use std::sync::Arc;

use tracing::trace;

use crate::definition::UpgradeDefinition;
use crate::modifiers::ModifierSet;

/// Something the engine wants collaborators to know about.
#[derive(Clone, Debug, PartialEq)]
pub enum UpgradeEvent {
    /// A new offer is ready to be shown.
    SelectionOffered(Vec<Arc<UpgradeDefinition>>),
    /// An upgrade was added to the run.
    UpgradeAccepted(Arc<UpgradeDefinition>),
    /// One instance of an upgrade was taken back out of the run.
    UpgradeRemoved(Arc<UpgradeDefinition>),
    /// The composed modifier set changed. Always follows accept/remove/clear.
    ModifiersChanged(ModifierSet),
    /// Every active upgrade was dropped.
    Cleared,
}

impl UpgradeEvent {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SelectionOffered(_) => "selection_offered",
            Self::UpgradeAccepted(_) => "upgrade_accepted",
            Self::UpgradeRemoved(_) => "upgrade_removed",
            Self::ModifiersChanged(_) => "modifiers_changed",
            Self::Cleared => "cleared",
        }
    }
}

/// Receiver of [`UpgradeEvent`]s.
///
/// Observers are shared (`Arc`) so one collaborator can watch both the
/// coordinator and the accumulator; keep any mutable state behind a lock.
pub trait UpgradeObserver: Send + Sync {
    /// Returns a human-readable name (used in logging and debugging).
    fn name(&self) -> &'static str;

    /// Lower values are notified first.
    fn priority(&self) -> i32 {
        0
    }

    fn on_event(&self, event: &UpgradeEvent);
}

/// Adapts a closure into an observer.
pub struct FnObserver<F> {
    name: &'static str,
    callback: F,
}

impl<F> FnObserver<F>
where
    F: Fn(&UpgradeEvent) + Send + Sync,
{
    pub fn new(name: &'static str, callback: F) -> Self {
        Self { name, callback }
    }
}

impl<F> UpgradeObserver for FnObserver<F>
where
    F: Fn(&UpgradeEvent) + Send + Sync,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn on_event(&self, event: &UpgradeEvent) {
        (self.callback)(event)
    }
}

/// Ordered list of observers.
#[derive(Clone, Default)]
pub struct ObserverRegistry {
    observers: Vec<Arc<dyn UpgradeObserver>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an observer, keeping the list sorted by priority.
    pub fn subscribe(&mut self, observer: Arc<dyn UpgradeObserver>) {
        let priority = observer.priority();
        let position = self
            .observers
            .iter()
            .position(|o| o.priority() > priority)
            .unwrap_or(self.observers.len());
        self.observers.insert(position, observer);
    }

    /// Removes every observer registered under `name`. Returns how many went.
    pub fn unsubscribe(&mut self, name: &str) -> usize {
        let before = self.observers.len();
        self.observers.retain(|o| o.name() != name);
        before - self.observers.len()
    }

    pub fn notify(&self, event: &UpgradeEvent) {
        for observer in &self.observers {
            trace!(observer = observer.name(), event = event.kind(), "notify");
            observer.on_event(event);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Observer names in delivery order (for debugging).
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.observers.iter().map(|o| o.name())
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
