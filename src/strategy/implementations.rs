// src/strategy/implementations.rs

use crate::model::catalog::{Gender, SizeClass};
use crate::model::stock::InventoryItem;
use crate::simulation::config::SalesMix;
use crate::simulation::random::RandomSource;
use crate::strategy::traits::SelectionPolicy;

// =========================================================================
// 1. Biased Selection (Weighted Pools)
// =========================================================================

/// Customers drawn toward the same sizes the store over-stocks.
///
/// Available items are split into four pools: the biased gender's large
/// sizes, its small sizes, then the two other genders. A uniform draw is
/// routed by the mix's cumulative thresholds; an empty pool falls through
/// to the next non-empty one, and if every pool from there on is empty the
/// pick is made from everything available.
#[derive(Debug, Clone)]
pub struct BiasedSelection {
    gender: Gender,
    mix: SalesMix,
}

impl BiasedSelection {
    pub fn new(gender: Gender, mix: SalesMix) -> Self {
        Self { gender, mix }
    }

    /// Splits `available` into the four routing pools, in priority order.
    pub fn pools(&self, items: &[InventoryItem], available: &[usize]) -> [Vec<usize>; 4] {
        let [primary, secondary] = self.gender.others();
        let mut pools: [Vec<usize>; 4] = Default::default();

        for &idx in available {
            let item = &items[idx];
            let gender = item.gender();
            let slot = if gender == self.gender {
                match item.size.broad_class() {
                    Some(SizeClass::Large) => Some(0),
                    Some(SizeClass::Small) => Some(1),
                    None => None,
                }
            } else if gender == primary {
                Some(2)
            } else if gender == secondary {
                Some(3)
            } else {
                None
            };

            if let Some(slot) = slot {
                pools[slot].push(idx);
            }
        }
        pools
    }

    /// Pool index a draw lands in before any fall-through.
    pub fn route(&self, draw: f64) -> usize {
        self.mix
            .thresholds()
            .iter()
            .position(|t| draw < *t)
            .unwrap_or(3)
    }
}

impl SelectionPolicy for BiasedSelection {
    fn select(
        &self,
        items: &[InventoryItem],
        available: &[usize],
        rng: &mut dyn RandomSource,
    ) -> Option<usize> {
        if available.is_empty() {
            return None;
        }

        let pools = self.pools(items, available);
        let start = self.route(rng.unit());

        let pool: &[usize] = pools[start..]
            .iter()
            .find(|p| !p.is_empty())
            .map(|p| p.as_slice())
            .unwrap_or(available);

        Some(pool[rng.index(pool.len())])
    }
}

// =========================================================================
// 2. Uniform Selection
// =========================================================================

/// Every in-stock item is equally likely. Used as a control run.
#[derive(Debug, Clone, Default)]
pub struct UniformSelection;

impl UniformSelection {
    pub fn new() -> Self {
        Self
    }
}

impl SelectionPolicy for UniformSelection {
    fn select(
        &self,
        _items: &[InventoryItem],
        available: &[usize],
        rng: &mut dyn RandomSource,
    ) -> Option<usize> {
        if available.is_empty() {
            return None;
        }
        Some(available[rng.index(available.len())])
    }
}
