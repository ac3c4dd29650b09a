//! Upgrade definitions as loaded from the catalog.
//!
//! A definition is a plain value record: static fields only, no behaviour.
//! All logic lives in the eligibility filter, the selector and the
//! accumulator.

use std::collections::BTreeSet;

use strum::{Display, EnumIter};

use crate::modifiers::ModifierSet;

/// Broad grouping used by the UI and by catalog queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    FireRate,
    Damage,
    Special,
    ProjectileType,
    Utility,
}

/// Rarity class. Drives the base selection weight.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tier {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Common, Tier::Rare, Tier::Epic, Tier::Legendary];
}

/// One entry of the upgrade catalog.
///
/// # Invariants (enforced by [`crate::UpgradeCatalog`])
///
/// - `id` is non-empty and unique within the catalog
/// - `max_stacks >= 1`
/// - `spawn_weight > 0`
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpgradeDefinition {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub display_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub category: Category,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tier: Tier,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effect: ModifierSet,
    /// Every id here must already be active.
    #[cfg_attr(feature = "serde", serde(default))]
    pub prerequisite_ids: BTreeSet<String>,
    /// None of these ids may be active.
    #[cfg_attr(feature = "serde", serde(default))]
    pub incompatible_ids: BTreeSet<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_player_level: u32,
    #[cfg_attr(feature = "serde", serde(default = "default_spawn_weight"))]
    pub spawn_weight: f32,
    #[cfg_attr(feature = "serde", serde(default = "default_max_stacks"))]
    pub max_stacks: u32,
}

#[cfg(feature = "serde")]
fn default_spawn_weight() -> f32 {
    1.0
}

#[cfg(feature = "serde")]
fn default_max_stacks() -> u32 {
    1
}

impl UpgradeDefinition {
    /// Starts a builder with neutral defaults: Common tier, identity effect,
    /// level 0, spawn weight 1, one stack.
    pub fn builder(id: impl Into<String>, category: Category) -> UpgradeDefinitionBuilder {
        UpgradeDefinitionBuilder::new(id, category)
    }

    pub fn is_stackable(&self) -> bool {
        self.max_stacks > 1
    }
}

/// Fluent construction of [`UpgradeDefinition`] values.
///
/// # Example
/// ```
/// # use upgrade_core::{Category, ModifierSet, Tier, UpgradeDefinition};
/// let def = UpgradeDefinition::builder("twin_shot", Category::ProjectileType)
///     .tier(Tier::Rare)
///     .effect(ModifierSet { additional_projectiles: 1, ..ModifierSet::IDENTITY })
///     .requires("rapid_fire")
///     .build();
/// assert_eq!(def.max_stacks, 1);
/// assert!(def.prerequisite_ids.contains("rapid_fire"));
/// ```
#[derive(Clone, Debug)]
pub struct UpgradeDefinitionBuilder {
    definition: UpgradeDefinition,
}

impl UpgradeDefinitionBuilder {
    pub fn new(id: impl Into<String>, category: Category) -> Self {
        let id = id.into();
        Self {
            definition: UpgradeDefinition {
                display_name: id.clone(),
                id,
                description: String::new(),
                category,
                tier: Tier::Common,
                effect: ModifierSet::IDENTITY,
                prerequisite_ids: BTreeSet::new(),
                incompatible_ids: BTreeSet::new(),
                min_player_level: 0,
                spawn_weight: 1.0,
                max_stacks: 1,
            },
        }
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.definition.display_name = name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.definition.description = description.into();
        self
    }

    pub fn tier(mut self, tier: Tier) -> Self {
        self.definition.tier = tier;
        self
    }

    pub fn effect(mut self, effect: ModifierSet) -> Self {
        self.definition.effect = effect;
        self
    }

    pub fn requires(mut self, id: impl Into<String>) -> Self {
        self.definition.prerequisite_ids.insert(id.into());
        self
    }

    pub fn incompatible_with(mut self, id: impl Into<String>) -> Self {
        self.definition.incompatible_ids.insert(id.into());
        self
    }

    pub fn min_level(mut self, level: u32) -> Self {
        self.definition.min_player_level = level;
        self
    }

    pub fn spawn_weight(mut self, weight: f32) -> Self {
        self.definition.spawn_weight = weight;
        self
    }

    pub fn max_stacks(mut self, stacks: u32) -> Self {
        self.definition.max_stacks = stacks;
        self
    }

    pub fn build(self) -> UpgradeDefinition {
        self.definition
    }
}
