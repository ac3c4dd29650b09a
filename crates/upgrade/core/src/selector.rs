//! Weighted random draw of offer candidates.
//!
//! # Algorithm
//!
//! ```text
//! weight(c) = tier_weight(c.tier) × c.spawn_weight
//!
//! repeat until `count` drawn or pool exhausted:
//!     total = Σ weight over remaining pool
//!     if total <= 0: stop
//!     r     = uniform [0, total)
//!     pick the first c whose cumulative weight reaches r (>= r)
//!     without duplicates: remove c from the pool
//! ```
//!
//! Zero-weight candidates are skipped when accumulating, so they are never
//! picked. A draw landing exactly on a boundary belongs to the candidate
//! whose cumulative weight reaches it first, i.e. the earlier one.

use std::sync::Arc;

use tracing::debug;

use crate::config::TierWeights;
use crate::definition::UpgradeDefinition;
use crate::rng::SelectionRng;

/// Stateless selector parameterised by tier weights.
#[derive(Clone, Copy, Debug)]
pub struct WeightedSelector<'a> {
    weights: &'a TierWeights,
}

impl<'a> WeightedSelector<'a> {
    pub fn new(weights: &'a TierWeights) -> Self {
        Self { weights }
    }

    /// Effective weight of one candidate. Non-finite products count as zero;
    /// catalogs clamp infinite spawn weights at load so this only affects
    /// definitions built outside a catalog.
    pub fn weight_of(&self, def: &UpgradeDefinition) -> f64 {
        let weight = f64::from(self.weights.weight(def.tier)) * f64::from(def.spawn_weight);
        if weight.is_finite() && weight > 0.0 {
            weight
        } else {
            0.0
        }
    }

    /// Draws up to `count` candidates from `pool`.
    ///
    /// The result is never padded: a small pool yields a short list, an empty
    /// pool or an all-zero-weight pool yields whatever was collected so far.
    /// Reproducible for a fixed rng state and pool order.
    pub fn select<R>(
        &self,
        pool: &[Arc<UpgradeDefinition>],
        count: usize,
        allow_duplicates: bool,
        rng: &mut R,
    ) -> Vec<Arc<UpgradeDefinition>>
    where
        R: SelectionRng + ?Sized,
    {
        if pool.is_empty() || count == 0 {
            return Vec::new();
        }

        let mut remaining: Vec<(&Arc<UpgradeDefinition>, f64)> =
            pool.iter().map(|def| (def, self.weight_of(def))).collect();
        let target = if allow_duplicates {
            count
        } else {
            count.min(remaining.len())
        };
        let mut picked = Vec::with_capacity(target.min(pool.len()));

        while picked.len() < target && !remaining.is_empty() {
            let total: f64 = remaining.iter().map(|(_, w)| w).sum();
            if total <= 0.0 {
                debug!(
                    drawn = picked.len(),
                    remaining = remaining.len(),
                    "remaining pool has zero total weight"
                );
                break;
            }

            let draw = rng.next_unit() * total;
            let index = Self::locate(&remaining, draw);
            let (def, weight) = remaining[index];
            debug!(id = %def.id, weight, draw, total, "candidate drawn");
            picked.push(Arc::clone(def));

            if !allow_duplicates {
                remaining.remove(index);
            }
        }

        picked
    }

    /// Index of the first positive-weight candidate whose cumulative weight
    /// reaches `draw`.
    ///
    /// Float rounding can leave `draw` at or past the final cumulative sum;
    /// in that case the last positive-weight candidate is returned.
    fn locate(remaining: &[(&Arc<UpgradeDefinition>, f64)], draw: f64) -> usize {
        let mut cumulative = 0.0;
        let mut last_positive = 0;
        for (i, (_, weight)) in remaining.iter().enumerate() {
            if *weight <= 0.0 {
                continue;
            }
            cumulative += weight;
            last_positive = i;
            if draw <= cumulative {
                return i;
            }
        }
        last_positive
    }
}
