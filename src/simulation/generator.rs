// src/simulation/generator.rs

use crate::error::{EngineError, Result};
use crate::model::catalog::{Catalog, Gender, Size, SizeClass};
use crate::model::stock::{InventoryItem, Lot, ProductId};
use crate::simulation::config::SimulationConfig;
use crate::simulation::random::RandomSource;
use chrono::{Datelike, NaiveDate};

/// Uniform calendar date within `year`.
pub fn random_date_in_year(year: i32, rng: &mut dyn RandomSource) -> Result<NaiveDate> {
    let days = NaiveDate::from_ymd_opt(year, 12, 31)
        .ok_or(EngineError::InvalidYear(year))?
        .ordinal();
    let day = rng.range(1..days + 1);
    NaiveDate::from_yo_opt(year, day).ok_or(EngineError::InvalidYear(year))
}

/// Quantity stocked for one size of one lot.
///
/// The biased gender gets its small sizes from the elevated range and its
/// large sizes from the depressed range. Everything else uses the default.
pub fn stocking_quantity(
    config: &SimulationConfig,
    gender: Gender,
    size: Size,
    rng: &mut dyn RandomSource,
) -> u32 {
    let range = match (gender == config.biased_gender, size.stocking_class()) {
        (true, Some(SizeClass::Small)) => config.elevated_quantity.clone(),
        (true, Some(SizeClass::Large)) => config.depressed_quantity.clone(),
        _ => config.default_quantity.clone(),
    };
    rng.range(range)
}

/// Stocks one year: a random number of lots per manufacturer, each fanned
/// out into one item per size valid for its category.
pub fn generate_year(
    catalog: &Catalog,
    config: &SimulationConfig,
    year: i32,
    rng: &mut dyn RandomSource,
) -> Result<Vec<InventoryItem>> {
    let mut items = Vec::new();

    for manufacturer in &catalog.manufacturers {
        let lot_count = rng.range(config.lots_per_manufacturer.clone());

        for sequence in 0..lot_count {
            let category = catalog.categories[rng.index(catalog.categories.len())];
            let gender = catalog.genders[rng.index(catalog.genders.len())];
            let color = catalog.colors[rng.index(catalog.colors.len())];

            let lot = Lot {
                id: ProductId {
                    year,
                    manufacturer_id: manufacturer.id,
                    sequence,
                },
                name: format!(
                    "{} {} {} for {}",
                    color,
                    manufacturer.name(),
                    category,
                    gender
                ),
                category,
                gender,
                color,
                created: random_date_in_year(year, rng)?,
            };

            for &size in category.sizes() {
                let quantity = stocking_quantity(config, gender, size, rng);
                let price = config.price_floor + rng.range(config.price_markup.clone()) as f64;
                items.push(InventoryItem::new(lot.clone(), size, quantity, price));
            }
        }
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::Category;
    use crate::simulation::random::RngSource;
    use std::collections::HashSet;

    #[test]
    fn every_lot_fans_out_into_its_category_sizes() {
        let catalog = Catalog::standard();
        let config = SimulationConfig::default();
        let mut rng = RngSource::seeded(11);
        let items = generate_year(&catalog, &config, 2023, &mut rng).unwrap();

        let lots: HashSet<ProductId> = items.iter().map(|i| i.lot.id).collect();
        for id in &lots {
            let sizes: Vec<Size> = items
                .iter()
                .filter(|i| i.lot.id == *id)
                .map(|i| i.size)
                .collect();
            let category = items.iter().find(|i| i.lot.id == *id).unwrap().lot.category;
            assert_eq!(sizes, category.sizes().to_vec());
        }

        for manufacturer in &catalog.manufacturers {
            let count = lots
                .iter()
                .filter(|id| id.manufacturer_id == manufacturer.id)
                .count() as u32;
            assert!(config.lots_per_manufacturer.contains(&count));
        }
    }

    #[test]
    fn biased_gender_quantities_follow_the_skew() {
        let catalog = Catalog::standard();
        let config = SimulationConfig::default();
        let mut rng = RngSource::seeded(3);
        let items = generate_year(&catalog, &config, 2024, &mut rng).unwrap();

        for item in &items {
            let q = item.initial_quantity();
            assert_eq!(q, item.current_quantity());
            let expected = match (item.gender(), item.size.stocking_class()) {
                (Gender::Men, Some(SizeClass::Small)) => &config.elevated_quantity,
                (Gender::Men, Some(SizeClass::Large)) => &config.depressed_quantity,
                _ => &config.default_quantity,
            };
            assert!(expected.contains(&q), "{} {} got {}", item.lot.name, item.size, q);
            assert!(item.unit_price >= 19.99 && item.unit_price < 99.0);
            assert_eq!(item.lot.year(), 2024);
            assert_eq!(item.lot.created.year(), 2024);
        }
    }

    #[test]
    fn xxl_is_not_depressed_for_the_biased_gender() {
        let config = SimulationConfig::default();
        let mut rng = RngSource::seeded(5);
        for _ in 0..100 {
            let q = stocking_quantity(&config, Gender::Men, Size::Xxl, &mut rng);
            assert!(config.default_quantity.contains(&q));
            let q = stocking_quantity(&config, Gender::Women, Size::S, &mut rng);
            assert!(config.default_quantity.contains(&q));
        }
    }

    #[test]
    fn lot_name_reads_naturally() {
        let catalog = Catalog {
            categories: vec![Category::Dresses],
            ..Catalog::standard()
        };
        let mut rng = RngSource::seeded(1);
        let items = generate_year(&catalog, &SimulationConfig::default(), 2022, &mut rng).unwrap();
        let first = &items[0];
        assert!(first.lot.name.contains("UrbanThreads Dresses for"));
        assert_eq!(first.size, Size::Dress0);
    }

    #[test]
    fn random_dates_cover_leap_years() {
        let mut rng = RngSource::seeded(9);
        for _ in 0..400 {
            let d = random_date_in_year(2024, &mut rng).unwrap();
            assert_eq!(d.year(), 2024);
        }
    }
}
