// src/analysis/sales.rs

use crate::analysis::{percentage, round2};
use crate::model::catalog::{Category, Gender, Size};
use crate::model::stock::{InventoryItem, ProductId, SaleRecord};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SizeSales {
    pub total_sold: u32,
    pub revenue: f64,
    pub transactions: u32,
    pub percentage_of_sales: f64,
    pub percentage_of_revenue: f64,
    pub average_transaction_value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenderSales {
    pub total_sold: u32,
    pub total_revenue: f64,
    pub total_transactions: u32,
    /// Only sizes that actually sold.
    pub sizes: BTreeMap<Size, SizeSales>,
}

impl GenderSales {
    pub fn sold(&self, size: Size) -> u32 {
        self.sizes.get(&size).map_or(0, |s| s.total_sold)
    }

    pub fn percentage(&self, size: Size) -> f64 {
        self.sizes.get(&size).map_or(0.0, |s| s.percentage_of_sales)
    }
}

pub type SalesAnalysis = BTreeMap<Gender, GenderSales>;

/// Aggregates the whole sales history per gender and size.
///
/// The gender of a sale comes from its lot in `items`; a sale whose lot
/// cannot be found is skipped.
pub fn analyze_sales(
    sales: &[SaleRecord],
    items: &[InventoryItem],
    genders: &[Gender],
) -> SalesAnalysis {
    let lot_gender: HashMap<ProductId, Gender> =
        items.iter().map(|i| (i.lot.id, i.gender())).collect();

    // Every catalog size starts at zero so the totals see the full range.
    let mut grouped: BTreeMap<Gender, BTreeMap<Size, SizeSales>> = genders
        .iter()
        .map(|g| {
            let sizes = Category::ALL
                .iter()
                .flat_map(|c| c.sizes())
                .map(|s| (*s, SizeSales::default()))
                .collect();
            (*g, sizes)
        })
        .collect();

    let mut unmatched = 0usize;
    for sale in sales {
        let Some(sizes) = lot_gender
            .get(&sale.product_id)
            .and_then(|g| grouped.get_mut(g))
        else {
            unmatched += 1;
            continue;
        };
        let entry = sizes.entry(sale.size).or_default();
        entry.total_sold += sale.quantity;
        entry.revenue += sale.total_price;
        entry.transactions += 1;
    }
    if unmatched > 0 {
        debug!(unmatched, "sales without a matching lot were skipped");
    }

    grouped
        .into_iter()
        .map(|(gender, sizes)| {
            let total_sold: u32 = sizes.values().map(|s| s.total_sold).sum();
            let total_revenue: f64 = sizes.values().map(|s| s.revenue).sum();
            let total_transactions: u32 = sizes.values().map(|s| s.transactions).sum();

            let sizes = sizes
                .into_iter()
                .filter(|(_, s)| s.total_sold > 0)
                .map(|(size, mut s)| {
                    s.percentage_of_sales = percentage(s.total_sold as f64, total_sold as f64);
                    s.percentage_of_revenue = percentage(s.revenue, total_revenue);
                    s.average_transaction_value = if s.transactions > 0 {
                        round2(s.revenue / s.transactions as f64)
                    } else {
                        0.0
                    };
                    (size, s)
                })
                .collect();

            (
                gender,
                GenderSales {
                    total_sold,
                    total_revenue,
                    total_transactions,
                    sizes,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::Color;
    use crate::model::stock::Lot;
    use chrono::NaiveDate;

    fn lot_item(seq: u32, gender: Gender, size: Size) -> InventoryItem {
        let lot = Lot {
            id: ProductId {
                year: 2023,
                manufacturer_id: 3,
                sequence: seq,
            },
            name: String::new(),
            category: Category::Bottoms,
            gender,
            color: Color::Green,
            created: NaiveDate::from_ymd_opt(2023, 4, 4).unwrap(),
        };
        InventoryItem::new(lot, size, 50, 25.0)
    }

    fn sale(seq: u32, size: Size, quantity: u32, total_price: f64) -> SaleRecord {
        SaleRecord {
            product_id: ProductId {
                year: 2023,
                manufacturer_id: 3,
                sequence: seq,
            },
            size,
            quantity,
            total_price,
            date: NaiveDate::from_ymd_opt(2023, 8, 8).unwrap(),
        }
    }

    #[test]
    fn aggregates_units_revenue_and_transactions() {
        let items = vec![
            lot_item(0, Gender::Men, Size::Waist32),
            lot_item(1, Gender::Men, Size::Waist36),
        ];
        let sales = vec![
            sale(0, Size::Waist32, 3, 75.0),
            sale(0, Size::Waist32, 1, 25.0),
            sale(1, Size::Waist36, 1, 25.0),
        ];
        let analysis = analyze_sales(&sales, &items, &Gender::ALL);
        let men = &analysis[&Gender::Men];

        assert_eq!(men.total_sold, 5);
        assert_eq!(men.total_transactions, 3);
        assert!((men.total_revenue - 125.0).abs() < 1e-9);

        let s32 = &men.sizes[&Size::Waist32];
        assert_eq!(s32.total_sold, 4);
        assert_eq!(s32.transactions, 2);
        assert_eq!(s32.percentage_of_sales, 80.0);
        assert_eq!(s32.percentage_of_revenue, 80.0);
        assert_eq!(s32.average_transaction_value, 50.0);
    }

    #[test]
    fn unsold_sizes_are_dropped() {
        let items = vec![lot_item(0, Gender::Women, Size::Waist28)];
        let sales = vec![sale(0, Size::Waist28, 2, 50.0)];
        let analysis = analyze_sales(&sales, &items, &Gender::ALL);

        assert_eq!(analysis[&Gender::Women].sizes.len(), 1);
        assert!(analysis[&Gender::Men].sizes.is_empty());
        assert_eq!(analysis[&Gender::Men].total_sold, 0);
    }

    #[test]
    fn sales_without_a_lot_are_skipped() {
        let items = vec![lot_item(0, Gender::Unisex, Size::Waist30)];
        let sales = vec![
            sale(0, Size::Waist30, 1, 25.0),
            sale(42, Size::Waist30, 3, 75.0),
        ];
        let analysis = analyze_sales(&sales, &items, &Gender::ALL);
        assert_eq!(analysis[&Gender::Unisex].total_sold, 1);
        assert_eq!(analysis[&Gender::Unisex].percentage(Size::Waist30), 100.0);
    }
}
