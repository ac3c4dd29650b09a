//! Eligibility rules for offering an upgrade.
//!
//! A definition may be offered only if all of the following hold:
//!
//! 1. the player's level reaches `min_player_level`
//! 2. its current stack count is below `max_stacks`
//! 3. every prerequisite id is active
//! 4. no incompatible id is active
//!
//! Checks run cheapest first and stop at the first failure.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::catalog::UpgradeCatalog;
use crate::definition::UpgradeDefinition;

/// Why a definition was filtered out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ineligibility {
    LevelTooLow { required: u32, actual: u32 },
    StackLimit { max: u32 },
    MissingPrerequisite(String),
    Incompatible(String),
}

/// Pure predicate over a definition and the current run state.
pub struct EligibilityFilter;

impl EligibilityFilter {
    /// Returns `true` when `def` may be offered.
    pub fn is_eligible(
        def: &UpgradeDefinition,
        player_level: u32,
        active_stacks: &HashMap<String, u32>,
        active_ids: &HashSet<String>,
    ) -> bool {
        Self::check(def, player_level, active_stacks, active_ids).is_ok()
    }

    /// Like [`Self::is_eligible`] but reports the first failing rule.
    pub fn check(
        def: &UpgradeDefinition,
        player_level: u32,
        active_stacks: &HashMap<String, u32>,
        active_ids: &HashSet<String>,
    ) -> Result<(), Ineligibility> {
        if player_level < def.min_player_level {
            return Err(Ineligibility::LevelTooLow {
                required: def.min_player_level,
                actual: player_level,
            });
        }

        let stacks = active_stacks.get(&def.id).copied().unwrap_or(0);
        if stacks >= def.max_stacks {
            return Err(Ineligibility::StackLimit {
                max: def.max_stacks,
            });
        }

        if let Some(missing) = def
            .prerequisite_ids
            .iter()
            .find(|id| !active_ids.contains(*id))
        {
            return Err(Ineligibility::MissingPrerequisite(missing.clone()));
        }

        if let Some(conflict) = def
            .incompatible_ids
            .iter()
            .find(|id| active_ids.contains(*id))
        {
            return Err(Ineligibility::Incompatible(conflict.clone()));
        }

        Ok(())
    }

    /// Catalog entries that pass every rule, in catalog order.
    pub fn eligible_pool(
        catalog: &UpgradeCatalog,
        player_level: u32,
        active_stacks: &HashMap<String, u32>,
        active_ids: &HashSet<String>,
    ) -> Vec<Arc<UpgradeDefinition>> {
        catalog
            .all()
            .iter()
            .filter(|def| match Self::check(def, player_level, active_stacks, active_ids) {
                Ok(()) => true,
                Err(reason) => {
                    tracing::trace!(id = %def.id, ?reason, "filtered out");
                    false
                }
            })
            .cloned()
            .collect()
    }
}
