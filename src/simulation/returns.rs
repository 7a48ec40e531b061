// src/simulation/returns.rs

use crate::error::{EngineError, Result};
use crate::model::catalog::Catalog;
use crate::model::stock::{InventoryItem, ReturnRecord};
use chrono::NaiveDate;

/// Year-end sweep: every item of `year` holding more than `threshold`
/// units goes back to its manufacturer at that manufacturer's refund rate.
///
/// Items at or below the threshold stay on the shelf untouched.
pub fn process_returns(
    items: &mut [InventoryItem],
    year: i32,
    catalog: &Catalog,
    threshold: u32,
) -> Result<Vec<ReturnRecord>> {
    let date = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(EngineError::InvalidYear(year))?;

    // A lot from a supplier outside the catalog has no refund rate.
    for item in items.iter().filter(|i| i.lot.year() == year) {
        catalog.manufacturer(item.lot.manufacturer_id())?;
    }

    let mut returns = Vec::new();

    for manufacturer in &catalog.manufacturers {
        let rate = manufacturer.refund_rate();
        for item in items.iter_mut().filter(|i| {
            i.lot.year() == year
                && i.lot.manufacturer_id() == manufacturer.id
                && i.current_quantity() > threshold
        }) {
            let quantity = item.return_all();
            returns.push(ReturnRecord {
                year,
                product_id: item.lot.id,
                size: item.size,
                manufacturer_id: manufacturer.id,
                quantity,
                return_value: item.unit_price * quantity as f64 * rate,
                date,
            });
        }
    }

    Ok(returns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::{Category, Color, Gender, Size};
    use crate::model::stock::{Lot, ProductId};

    fn item(manufacturer_id: u32, year: i32, quantity: u32, price: f64) -> InventoryItem {
        let lot = Lot {
            id: ProductId {
                year,
                manufacturer_id,
                sequence: 0,
            },
            name: "test lot".to_string(),
            category: Category::Bottoms,
            gender: Gender::Women,
            color: Color::Gray,
            created: NaiveDate::from_ymd_opt(year, 6, 1).unwrap(),
        };
        InventoryItem::new(lot, Size::Waist34, quantity, price)
    }

    #[test]
    fn only_residuals_above_threshold_are_returned() {
        let catalog = Catalog::standard();
        let mut items = vec![
            item(1, 2023, 5, 10.0),
            item(1, 2023, 6, 10.0),
            item(4, 2023, 20, 50.0),
            item(4, 2024, 20, 50.0),
        ];
        let returns = process_returns(&mut items, 2023, &catalog, 5).unwrap();

        assert_eq!(returns.len(), 2);
        assert_eq!(items[0].current_quantity(), 5);
        assert_eq!(items[1].current_quantity(), 0);
        assert_eq!(items[2].current_quantity(), 0);
        assert_eq!(items[3].current_quantity(), 20);

        assert_eq!(returns[0].quantity, 6);
        assert!((returns[0].return_value - 10.0 * 6.0 * 0.7).abs() < 1e-9);
        assert!((returns[1].return_value - 50.0 * 20.0 * 0.4).abs() < 1e-9);
        assert_eq!(returns[1].date, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert!(returns.iter().all(|r| r.quantity > 5));
    }

    #[test]
    fn unknown_manufacturer_is_a_defect() {
        let catalog = Catalog::standard();
        let mut items = vec![item(17, 2023, 30, 10.0)];
        assert!(matches!(
            process_returns(&mut items, 2023, &catalog, 5),
            Err(EngineError::UnknownManufacturer(17))
        ));
    }
}
