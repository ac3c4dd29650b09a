//! Observers the driver attaches to a run.
use std::sync::{Mutex, PoisonError};

use upgrade_core::{UpgradeEvent, UpgradeObserver, WeaponStats};

/// Writes every notification to the log.
#[derive(Debug, Default)]
pub struct LoggingObserver;

impl UpgradeObserver for LoggingObserver {
    fn name(&self) -> &'static str {
        "LoggingObserver"
    }

    fn priority(&self) -> i32 {
        -100
    }

    fn on_event(&self, event: &UpgradeEvent) {
        match event {
            UpgradeEvent::SelectionOffered(offer) => {
                let ids: Vec<&str> = offer.iter().map(|def| def.id.as_str()).collect();
                tracing::info!(?ids, "offer");
            }
            UpgradeEvent::UpgradeAccepted(def) => {
                tracing::info!(id = %def.id, tier = %def.tier, "accepted");
            }
            UpgradeEvent::UpgradeRemoved(def) => {
                tracing::info!(id = %def.id, "removed");
            }
            UpgradeEvent::ModifiersChanged(set) => {
                tracing::debug!(?set, "modifiers changed");
            }
            UpgradeEvent::Cleared => tracing::info!("cleared"),
        }
    }
}

/// Stands in for the weapon system: re-applies the composed modifiers to
/// base stats whenever they change.
#[derive(Debug)]
pub struct WeaponObserver {
    base: WeaponStats,
    current: Mutex<WeaponStats>,
}

impl WeaponObserver {
    pub fn new(base: WeaponStats) -> Self {
        Self {
            base,
            current: Mutex::new(base),
        }
    }

    pub fn base(&self) -> WeaponStats {
        self.base
    }

    /// Stats after the latest `ModifiersChanged`.
    pub fn current(&self) -> WeaponStats {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for WeaponObserver {
    fn default() -> Self {
        Self::new(WeaponStats::default())
    }
}

impl UpgradeObserver for WeaponObserver {
    fn name(&self) -> &'static str {
        "WeaponObserver"
    }

    fn on_event(&self, event: &UpgradeEvent) {
        if let UpgradeEvent::ModifiersChanged(set) = event {
            let stats = self.base.apply(set);
            *self.current.lock().unwrap_or_else(PoisonError::into_inner) = stats;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use upgrade_core::ModifierSet;

    #[test]
    fn weapon_tracks_modifier_changes() {
        let weapon = WeaponObserver::default();
        let doubled = ModifierSet {
            damage_multiplier: 2.0,
            ..ModifierSet::IDENTITY
        };

        weapon.on_event(&UpgradeEvent::ModifiersChanged(doubled));
        assert_eq!(weapon.current().damage, weapon.base().damage * 2.0);

        weapon.on_event(&UpgradeEvent::ModifiersChanged(ModifierSet::IDENTITY));
        assert_eq!(weapon.current(), weapon.base());
    }

    #[test]
    fn weapon_ignores_other_events() {
        let weapon = WeaponObserver::default();
        weapon.on_event(&UpgradeEvent::Cleared);
        assert_eq!(weapon.current(), weapon.base());
    }
}
