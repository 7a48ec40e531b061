// src/strategy/traits.rs

use crate::model::stock::InventoryItem;
use crate::simulation::random::RandomSource;
use std::fmt::Debug;

/// Decides which shelf item a customer walks away with.
pub trait SelectionPolicy: Debug + Send + Sync {
    /// Picks one item for a sale attempt.
    ///
    /// # Arguments
    /// * `items` - The whole inventory.
    /// * `available` - Indices into `items` that are in stock for the year.
    /// * `rng` - Source for every draw the policy makes.
    ///
    /// Returns an index into `items`, or `None` when nothing can be sold.
    fn select(
        &self,
        items: &[InventoryItem],
        available: &[usize],
        rng: &mut dyn RandomSource,
    ) -> Option<usize>;
}
