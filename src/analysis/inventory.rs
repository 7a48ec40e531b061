// src/analysis/inventory.rs

use crate::analysis::percentage;
use crate::model::catalog::{Gender, Size};
use crate::model::stock::InventoryItem;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SizeStock {
    pub item_count: u32,
    pub total_quantity: u32,
    pub percentage_of_inventory: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenderInventory {
    pub total_quantity: u32,
    pub sizes: BTreeMap<Size, SizeStock>,
}

impl GenderInventory {
    pub fn quantity(&self, size: Size) -> u32 {
        self.sizes.get(&size).map_or(0, |s| s.total_quantity)
    }

    pub fn percentage(&self, size: Size) -> f64 {
        self.sizes.get(&size).map_or(0.0, |s| s.percentage_of_inventory)
    }

    /// Summed on-hand quantity over the sizes matching `pred`.
    pub fn quantity_where(&self, pred: impl Fn(Size) -> bool) -> u32 {
        self.sizes
            .iter()
            .filter(|(size, _)| pred(**size))
            .map(|(_, s)| s.total_quantity)
            .sum()
    }
}

pub type InventoryAnalysis = BTreeMap<Gender, GenderInventory>;

/// On-hand stock of `year` per gender and size.
///
/// Every gender in `genders` gets an entry, empty when it has no items.
pub fn analyze_inventory(
    items: &[InventoryItem],
    year: i32,
    genders: &[Gender],
) -> InventoryAnalysis {
    let mut analysis: InventoryAnalysis = genders
        .iter()
        .map(|g| (*g, GenderInventory::default()))
        .collect();

    for item in items.iter().filter(|i| i.lot.year() == year) {
        let Some(entry) = analysis.get_mut(&item.gender()) else {
            continue;
        };
        let stock = entry.sizes.entry(item.size).or_default();
        stock.item_count += 1;
        stock.total_quantity += item.current_quantity();
        entry.total_quantity += item.current_quantity();
    }

    for entry in analysis.values_mut() {
        let total = entry.total_quantity as f64;
        for stock in entry.sizes.values_mut() {
            stock.percentage_of_inventory = percentage(stock.total_quantity as f64, total);
        }
    }

    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::{Catalog, Category, Color};
    use crate::model::stock::{Lot, ProductId};
    use crate::simulation::config::SimulationConfig;
    use crate::simulation::generator::generate_year;
    use crate::simulation::random::RngSource;
    use chrono::NaiveDate;

    fn item(seq: u32, gender: Gender, size: Size, quantity: u32) -> InventoryItem {
        let lot = Lot {
            id: ProductId {
                year: 2025,
                manufacturer_id: 2,
                sequence: seq,
            },
            name: String::new(),
            category: Category::Tops,
            gender,
            color: Color::Red,
            created: NaiveDate::from_ymd_opt(2025, 2, 2).unwrap(),
        };
        InventoryItem::new(lot, size, quantity, 30.0)
    }

    #[test]
    fn shares_are_per_gender() {
        let items = vec![
            item(0, Gender::Men, Size::S, 30),
            item(1, Gender::Men, Size::S, 30),
            item(2, Gender::Men, Size::L, 40),
            item(3, Gender::Women, Size::M, 8),
        ];
        let analysis = analyze_inventory(&items, 2025, &Gender::ALL);

        let men = &analysis[&Gender::Men];
        assert_eq!(men.total_quantity, 100);
        assert_eq!(men.sizes[&Size::S].item_count, 2);
        assert_eq!(men.percentage(Size::S), 60.0);
        assert_eq!(men.percentage(Size::L), 40.0);
        assert_eq!(analysis[&Gender::Women].percentage(Size::M), 100.0);
    }

    #[test]
    fn empty_gender_has_zero_total_and_no_sizes() {
        let items = vec![item(0, Gender::Men, Size::S, 0)];
        let analysis = analyze_inventory(&items, 2025, &Gender::ALL);
        assert_eq!(analysis[&Gender::Unisex], GenderInventory::default());

        // Items exist but hold nothing: no division by zero.
        let men = &analysis[&Gender::Men];
        assert_eq!(men.total_quantity, 0);
        assert_eq!(men.percentage(Size::S), 0.0);
    }

    #[test]
    fn percentages_close_to_one_hundred() {
        let mut rng = RngSource::seeded(77);
        let items =
            generate_year(&Catalog::standard(), &SimulationConfig::default(), 2025, &mut rng)
                .unwrap();
        let analysis = analyze_inventory(&items, 2025, &Gender::ALL);
        for entry in analysis.values().filter(|e| e.total_quantity > 0) {
            let sum: f64 = entry.sizes.values().map(|s| s.percentage_of_inventory).sum();
            assert!((sum - 100.0).abs() < 0.15, "sum was {}", sum);
        }
    }
}
