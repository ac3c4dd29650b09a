//! Immutable upgrade catalog.
//!
//! Built once per process from a [`CatalogSource`] and shared by handle
//! (`Arc<UpgradeCatalog>`) afterwards. Load order is preserved so that
//! selection over the full catalog is reproducible for a fixed seed.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::definition::{Category, Tier, UpgradeDefinition};
use crate::error::CatalogError;

/// Anything that can produce the raw list of definitions.
///
/// File formats live outside this crate; `upgrade-content` implements this
/// for RON files. A plain `Vec` is a source too, which is what tests use.
pub trait CatalogSource {
    fn definitions(self) -> Result<Vec<UpgradeDefinition>, CatalogError>;
}

impl CatalogSource for Vec<UpgradeDefinition> {
    fn definitions(self) -> Result<Vec<UpgradeDefinition>, CatalogError> {
        Ok(self)
    }
}

/// Read-only collection of upgrade definitions indexed by id.
#[derive(Clone, Debug, Default)]
pub struct UpgradeCatalog {
    definitions: Vec<Arc<UpgradeDefinition>>,
    index: HashMap<String, usize>,
}

impl UpgradeCatalog {
    /// Builds a catalog from `source`.
    ///
    /// Non-positive spawn weights are raised to `min_spawn_weight`, infinite
    /// ones lowered to `f32::MAX`, and a `max_stacks` of zero is raised to
    /// one, each with a warning. An empty
    /// source yields an empty, valid catalog.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Source`] if the source cannot be read
    /// - [`CatalogError::InvalidDefinition`] for an empty id
    /// - [`CatalogError::DuplicateId`] if two definitions share an id
    pub fn load(source: impl CatalogSource, min_spawn_weight: f32) -> Result<Self, CatalogError> {
        let raw = source.definitions()?;
        let floor = if min_spawn_weight > 0.0 {
            min_spawn_weight
        } else {
            f32::EPSILON
        };

        let mut definitions = Vec::with_capacity(raw.len());
        let mut index = HashMap::with_capacity(raw.len());

        for mut def in raw {
            if def.id.trim().is_empty() {
                return Err(CatalogError::InvalidDefinition {
                    id: def.id,
                    reason: "id must not be empty",
                });
            }
            if index.contains_key(&def.id) {
                return Err(CatalogError::DuplicateId { id: def.id });
            }

            // `!(x > 0)` also catches NaN
            if !(def.spawn_weight > 0.0) {
                warn!(
                    id = %def.id,
                    spawn_weight = def.spawn_weight,
                    clamped = floor,
                    "non-positive spawn weight clamped"
                );
                def.spawn_weight = floor;
            }
            if def.spawn_weight.is_infinite() {
                warn!(id = %def.id, clamped = f32::MAX, "infinite spawn weight clamped");
                def.spawn_weight = f32::MAX;
            }
            if def.max_stacks == 0 {
                warn!(id = %def.id, "max_stacks of 0 raised to 1");
                def.max_stacks = 1;
            }

            index.insert(def.id.clone(), definitions.len());
            definitions.push(Arc::new(def));
        }

        let catalog = Self { definitions, index };
        catalog.warn_dangling_references();
        debug!(count = catalog.len(), "upgrade catalog loaded");
        Ok(catalog)
    }

    /// Shorthand for [`Self::load`] over an in-memory list.
    pub fn from_definitions(
        definitions: Vec<UpgradeDefinition>,
        min_spawn_weight: f32,
    ) -> Result<Self, CatalogError> {
        Self::load(definitions, min_spawn_weight)
    }

    pub fn get(&self, id: &str) -> Option<&Arc<UpgradeDefinition>> {
        self.index.get(id).map(|&i| &self.definitions[i])
    }

    /// All definitions in load order.
    pub fn all(&self) -> &[Arc<UpgradeDefinition>] {
        &self.definitions
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Arc<UpgradeDefinition>> {
        self.definitions
            .iter()
            .filter(move |def| def.category == category)
    }

    pub fn by_tier(&self, tier: Tier) -> impl Iterator<Item = &Arc<UpgradeDefinition>> {
        self.definitions.iter().filter(move |def| def.tier == tier)
    }

    /// Prerequisites naming an unknown id can never be satisfied.
    fn warn_dangling_references(&self) {
        for def in &self.definitions {
            for missing in def.prerequisite_ids.iter().filter(|id| !self.contains(id)) {
                warn!(
                    id = %def.id,
                    prerequisite = %missing,
                    "prerequisite is not in the catalog; upgrade can never be offered"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(id: &str) -> UpgradeDefinition {
        UpgradeDefinition::builder(id, Category::Damage).build()
    }

    #[test]
    fn lookup_by_id_and_order() {
        let catalog =
            UpgradeCatalog::from_definitions(vec![def("a"), def("b"), def("c")], 0.01).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("b").unwrap().id, "b");
        assert!(catalog.get("z").is_none());
        let ids: Vec<&str> = catalog.all().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn empty_source_is_valid() {
        let catalog = UpgradeCatalog::from_definitions(Vec::new(), 0.01).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.all().is_empty());
    }

    #[test]
    fn duplicate_id_rejects_whole_load() {
        let err = UpgradeCatalog::from_definitions(vec![def("a"), def("b"), def("a")], 0.01)
            .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId { id: "a".into() });
    }

    #[test]
    fn empty_id_is_invalid() {
        let err = UpgradeCatalog::from_definitions(vec![def("  ")], 0.01).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidDefinition { .. }));
    }

    #[test]
    fn degenerate_weights_and_stacks_are_clamped() {
        let zero = UpgradeDefinition::builder("zero", Category::Utility)
            .spawn_weight(0.0)
            .max_stacks(0)
            .build();
        let negative = UpgradeDefinition::builder("negative", Category::Utility)
            .spawn_weight(-3.0)
            .build();
        let nan = UpgradeDefinition::builder("nan", Category::Utility)
            .spawn_weight(f32::NAN)
            .build();

        let catalog = UpgradeCatalog::from_definitions(vec![zero, negative, nan], 0.01).unwrap();

        for def in catalog.all() {
            assert_eq!(def.spawn_weight, 0.01, "{} not clamped", def.id);
        }
        assert_eq!(catalog.get("zero").unwrap().max_stacks, 1);
    }

    #[test]
    fn infinite_spawn_weight_stays_selectable() {
        let def = UpgradeDefinition::builder("jackpot", Category::Special)
            .spawn_weight(f32::INFINITY)
            .build();
        let catalog = UpgradeCatalog::from_definitions(vec![def], 0.01).unwrap();
        let jackpot = catalog.get("jackpot").unwrap();

        assert_eq!(jackpot.spawn_weight, f32::MAX);
        let weights = crate::config::TierWeights::default();
        assert!(crate::selector::WeightedSelector::new(&weights).weight_of(jackpot) > 0.0);
    }

    #[test]
    fn category_and_tier_queries() {
        let rare = UpgradeDefinition::builder("rare_dmg", Category::Damage)
            .tier(Tier::Rare)
            .build();
        let util = UpgradeDefinition::builder("util", Category::Utility).build();
        let catalog = UpgradeCatalog::from_definitions(vec![rare, util], 0.01).unwrap();

        assert_eq!(catalog.by_category(Category::Damage).count(), 1);
        assert_eq!(catalog.by_tier(Tier::Common).next().unwrap().id, "util");
        assert_eq!(catalog.by_tier(Tier::Legendary).count(), 0);
    }

    #[test]
    fn source_failure_surfaces() {
        struct Broken;
        impl CatalogSource for Broken {
            fn definitions(self) -> Result<Vec<UpgradeDefinition>, CatalogError> {
                Err(CatalogError::Source("disk on fire".into()))
            }
        }
        assert!(matches!(
            UpgradeCatalog::load(Broken, 0.01),
            Err(CatalogError::Source(_))
        ));
    }
}
