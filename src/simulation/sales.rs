// src/simulation/sales.rs

use crate::error::Result;
use crate::model::stock::{InventoryItem, SaleRecord};
use crate::simulation::config::SimulationConfig;
use crate::simulation::generator::random_date_in_year;
use crate::simulation::random::RandomSource;
use crate::strategy::traits::SelectionPolicy;
use tracing::debug;

/// Runs a year's worth of sale attempts against that year's stock.
///
/// Each attempt asks the policy for an item, sells 1..=max units of it
/// (capped at what is left) and records the sale on a random day of the
/// year. Attempts made once the year is sold out are skipped.
pub fn simulate_sales(
    items: &mut [InventoryItem],
    year: i32,
    config: &SimulationConfig,
    policy: &dyn SelectionPolicy,
    rng: &mut dyn RandomSource,
) -> Result<Vec<SaleRecord>> {
    let mut sales = Vec::new();
    let mut skipped = 0u32;

    for _ in 0..config.transactions_per_year {
        let available: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.lot.year() == year && item.in_stock())
            .map(|(idx, _)| idx)
            .collect();

        let Some(idx) = policy.select(items, &available, rng) else {
            skipped += 1;
            continue;
        };

        let requested = rng.range(1..config.max_units_per_sale + 1);
        let item = &mut items[idx];
        let quantity = item.sell(requested);
        if quantity == 0 {
            skipped += 1;
            continue;
        }

        sales.push(SaleRecord {
            product_id: item.lot.id,
            size: item.size,
            quantity,
            total_price: item.unit_price * quantity as f64,
            date: random_date_in_year(year, rng)?,
        });
    }

    if skipped > 0 {
        debug!(year, skipped, "sale attempts skipped, no stock left");
    }
    Ok(sales)
}
