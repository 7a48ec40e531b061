// src/analysis/dashboard.rs

use crate::analysis::inventory::InventoryAnalysis;
use crate::analysis::round2;
use crate::analysis::sales::SalesAnalysis;
use crate::model::catalog::{Gender, Size};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderTotal {
    pub gender: Gender,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeMismatch {
    pub size: Size,
    pub inventory_quantity: u32,
    pub sales_quantity: u32,
    pub inventory_percentage: f64,
    pub sales_percentage: f64,
    pub difference: f64,
}

/// Chart-ready totals, with a per-size drill-down for one gender.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    pub focus: Gender,
    pub inventory_by_gender: Vec<GenderTotal>,
    pub sales_by_gender: Vec<GenderTotal>,
    pub size_mismatch: Vec<SizeMismatch>,
}

pub fn dashboard(
    inventory: &InventoryAnalysis,
    sales: &SalesAnalysis,
    genders: &[Gender],
    focus: Gender,
) -> DashboardData {
    let inventory_by_gender = genders
        .iter()
        .map(|&gender| GenderTotal {
            gender,
            quantity: inventory.get(&gender).map_or(0, |g| g.total_quantity),
        })
        .collect();
    let sales_by_gender = genders
        .iter()
        .map(|&gender| GenderTotal {
            gender,
            quantity: sales.get(&gender).map_or(0, |g| g.total_sold),
        })
        .collect();

    let focus_inventory = inventory.get(&focus).cloned().unwrap_or_default();
    let focus_sales = sales.get(&focus).cloned().unwrap_or_default();
    let sizes: BTreeSet<Size> = focus_inventory
        .sizes
        .keys()
        .chain(focus_sales.sizes.keys())
        .copied()
        .collect();

    // Shares come from raw totals here, not the rounded analysis values.
    let size_mismatch = sizes
        .into_iter()
        .filter_map(|size| {
            let inventory_quantity = focus_inventory.quantity(size);
            let sales_quantity = focus_sales.sold(size);
            if inventory_quantity == 0 && sales_quantity == 0 {
                return None;
            }
            let inv_raw = share(inventory_quantity, focus_inventory.total_quantity);
            let sales_raw = share(sales_quantity, focus_sales.total_sold);
            Some(SizeMismatch {
                size,
                inventory_quantity,
                sales_quantity,
                inventory_percentage: round2(inv_raw),
                sales_percentage: round2(sales_raw),
                difference: round2(inv_raw - sales_raw),
            })
        })
        .collect();

    DashboardData {
        focus,
        inventory_by_gender,
        sales_by_gender,
        size_mismatch,
    }
}

fn share(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::inventory::{GenderInventory, SizeStock};
    use crate::analysis::percentage;
    use crate::analysis::sales::{GenderSales, SizeSales};

    fn stock(quantity: u32, pct: f64) -> SizeStock {
        SizeStock {
            item_count: 1,
            total_quantity: quantity,
            percentage_of_inventory: pct,
        }
    }

    #[test]
    fn mismatch_uses_raw_shares() {
        let mut inventory = InventoryAnalysis::new();
        inventory.insert(
            Gender::Men,
            GenderInventory {
                total_quantity: 3,
                sizes: [(Size::S, stock(1, 33.33)), (Size::M, stock(2, 66.67))]
                    .into_iter()
                    .collect(),
            },
        );
        let mut sales = SalesAnalysis::new();
        sales.insert(
            Gender::Men,
            GenderSales {
                total_sold: 3,
                sizes: [(
                    Size::L,
                    SizeSales {
                        total_sold: 3,
                        ..SizeSales::default()
                    },
                )]
                .into_iter()
                .collect(),
                ..GenderSales::default()
            },
        );

        let data = dashboard(&inventory, &sales, &Gender::ALL, Gender::Men);
        assert_eq!(data.inventory_by_gender[0].quantity, 3);
        assert_eq!(data.sales_by_gender[1].quantity, 0);
        assert_eq!(data.size_mismatch.len(), 3);

        let l = data.size_mismatch.iter().find(|m| m.size == Size::L).unwrap();
        assert_eq!(l.difference, -100.0);
        let s = &data.size_mismatch[0];
        assert_eq!(s.size, Size::S);
        assert_eq!(s.inventory_percentage, 33.33);
        assert_eq!(percentage(1.0, 3.0), s.inventory_percentage);
    }
}
