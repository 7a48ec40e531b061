// src/analysis/gap.rs

use crate::analysis::inventory::GenderInventory;
use crate::analysis::round2;
use crate::analysis::sales::GenderSales;
use crate::model::catalog::Size;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Gap below this (in percentage points, either way) counts as balanced.
pub const BALANCED_BAND: f64 = 5.0;
/// Gap beyond this is significant.
pub const SIGNIFICANT_GAP: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StockStatus {
    Balanced,
    Overstocked,
    SignificantlyOverstocked,
    Understocked,
    SignificantlyUnderstocked,
}

impl StockStatus {
    /// Classifies `difference = inventory% - sales%`.
    ///
    /// `|d| < 5` is balanced; `5 <= d <= 15` overstocked; `d > 15`
    /// significantly overstocked; the negative side mirrors it.
    pub fn classify(difference: f64) -> Self {
        if difference.abs() < BALANCED_BAND {
            StockStatus::Balanced
        } else if difference > SIGNIFICANT_GAP {
            StockStatus::SignificantlyOverstocked
        } else if difference > 0.0 {
            StockStatus::Overstocked
        } else if difference < -SIGNIFICANT_GAP {
            StockStatus::SignificantlyUnderstocked
        } else {
            StockStatus::Understocked
        }
    }

    pub fn is_overstocked(self) -> bool {
        matches!(
            self,
            StockStatus::Overstocked | StockStatus::SignificantlyOverstocked
        )
    }

    pub fn is_understocked(self) -> bool {
        matches!(
            self,
            StockStatus::Understocked | StockStatus::SignificantlyUnderstocked
        )
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            StockStatus::Balanced => "Maintain current inventory levels",
            StockStatus::Overstocked => "Reduce inventory by 10-20% in next order",
            StockStatus::SignificantlyOverstocked => {
                "Reduce inventory by 30-40% and return to manufacturer"
            }
            StockStatus::Understocked => "Increase inventory by 10-20% in next order",
            StockStatus::SignificantlyUnderstocked => "Increase inventory by 30-40% immediately",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StockStatus::Balanced => "Balanced",
            StockStatus::Overstocked => "Overstocked",
            StockStatus::SignificantlyOverstocked => "Significantly Overstocked",
            StockStatus::Understocked => "Understocked",
            StockStatus::SignificantlyUnderstocked => "Significantly Understocked",
        };
        f.write_str(label)
    }
}

/// Inventory share vs sales share for one size of one gender.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeRecommendation {
    pub size: Size,
    pub current_inventory: u32,
    pub inventory_percentage: f64,
    pub sales_quantity: u32,
    pub sales_percentage: f64,
    pub difference: f64,
    pub status: StockStatus,
    /// Action text for `status`.
    pub recommendation: &'static str,
}

/// Compares every size present on either side, in size order.
///
/// A size with no stock and no sales is left out.
pub fn compare_sizes(inventory: &GenderInventory, sales: &GenderSales) -> Vec<SizeRecommendation> {
    let sizes: BTreeSet<Size> = inventory
        .sizes
        .keys()
        .chain(sales.sizes.keys())
        .copied()
        .collect();

    sizes
        .into_iter()
        .filter_map(|size| {
            let current_inventory = inventory.quantity(size);
            let sales_quantity = sales.sold(size);
            if current_inventory == 0 && sales_quantity == 0 {
                return None;
            }

            let inventory_percentage = inventory.percentage(size);
            let sales_percentage = sales.percentage(size);
            let difference = round2(inventory_percentage - sales_percentage);
            let status = StockStatus::classify(difference);

            Some(SizeRecommendation {
                size,
                current_inventory,
                inventory_percentage,
                sales_quantity,
                sales_percentage,
                difference,
                status,
                recommendation: status.recommendation(),
            })
        })
        .collect()
}

/// Up to `n` overstocked sizes, largest surplus first.
pub fn most_overstocked(recs: &[SizeRecommendation], n: usize) -> Vec<SizeRecommendation> {
    let mut picked: Vec<SizeRecommendation> = recs
        .iter()
        .filter(|r| r.status.is_overstocked())
        .cloned()
        .collect();
    picked.sort_by(|a, b| b.difference.total_cmp(&a.difference));
    picked.truncate(n);
    picked
}

/// Up to `n` understocked sizes, largest shortfall first.
pub fn most_understocked(recs: &[SizeRecommendation], n: usize) -> Vec<SizeRecommendation> {
    let mut picked: Vec<SizeRecommendation> = recs
        .iter()
        .filter(|r| r.status.is_understocked())
        .cloned()
        .collect();
    picked.sort_by(|a, b| a.difference.total_cmp(&b.difference));
    picked.truncate(n);
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::inventory::SizeStock;
    use crate::analysis::sales::SizeSales;

    #[test]
    fn classifier_boundaries() {
        let cases = [
            (30.0, StockStatus::SignificantlyOverstocked),
            (15.01, StockStatus::SignificantlyOverstocked),
            (15.0, StockStatus::Overstocked),
            (5.0, StockStatus::Overstocked),
            (4.99, StockStatus::Balanced),
            (0.0, StockStatus::Balanced),
            (-4.99, StockStatus::Balanced),
            (-5.0, StockStatus::Understocked),
            (-15.0, StockStatus::Understocked),
            (-15.01, StockStatus::SignificantlyUnderstocked),
        ];
        for (difference, expected) in cases {
            assert_eq!(StockStatus::classify(difference), expected, "d = {}", difference);
        }
    }

    fn inventory(entries: &[(Size, u32, f64)]) -> GenderInventory {
        GenderInventory {
            total_quantity: entries.iter().map(|e| e.1).sum(),
            sizes: entries
                .iter()
                .map(|&(size, q, p)| {
                    (
                        size,
                        SizeStock {
                            item_count: 1,
                            total_quantity: q,
                            percentage_of_inventory: p,
                        },
                    )
                })
                .collect(),
        }
    }

    fn sales(entries: &[(Size, u32, f64)]) -> GenderSales {
        GenderSales {
            total_sold: entries.iter().map(|e| e.1).sum(),
            sizes: entries
                .iter()
                .map(|&(size, q, p)| {
                    (
                        size,
                        SizeSales {
                            total_sold: q,
                            percentage_of_sales: p,
                            ..SizeSales::default()
                        },
                    )
                })
                .collect(),
            ..GenderSales::default()
        }
    }

    #[test]
    fn forty_vs_ten_is_significantly_overstocked() {
        let inv = inventory(&[(Size::M, 40, 40.0), (Size::L, 60, 60.0)]);
        let sold = sales(&[(Size::M, 10, 10.0), (Size::L, 90, 90.0)]);
        let recs = compare_sizes(&inv, &sold);

        let m = recs.iter().find(|r| r.size == Size::M).unwrap();
        assert_eq!(m.difference, 30.0);
        assert_eq!(m.status, StockStatus::SignificantlyOverstocked);
        assert_eq!(
            m.recommendation,
            "Reduce inventory by 30-40% and return to manufacturer"
        );
    }

    #[test]
    fn serialized_rows_keep_the_action_text() {
        let inv = inventory(&[(Size::M, 40, 40.0), (Size::L, 60, 60.0)]);
        let sold = sales(&[(Size::M, 10, 10.0), (Size::L, 90, 90.0)]);
        let recs = compare_sizes(&inv, &sold);

        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.serialize(&recs[0]).unwrap();
        let text = String::from_utf8(wtr.into_inner().unwrap()).unwrap();

        let header = text.lines().next().unwrap();
        assert!(header.ends_with(",status,recommendation"));
        assert!(text.contains("SignificantlyOverstocked,Reduce inventory by 30-40% and return to manufacturer"));
    }

    #[test]
    fn missing_side_counts_as_zero_and_empty_sizes_are_skipped() {
        let inv = inventory(&[(Size::S, 50, 100.0), (Size::Xl, 0, 0.0)]);
        let sold = sales(&[(Size::L, 10, 100.0)]);
        let recs = compare_sizes(&inv, &sold);

        let sizes: Vec<Size> = recs.iter().map(|r| r.size).collect();
        assert_eq!(sizes, vec![Size::S, Size::L]);
        assert_eq!(recs[0].difference, 100.0);
        assert_eq!(recs[1].difference, -100.0);
        assert_eq!(recs[1].status, StockStatus::SignificantlyUnderstocked);
    }

    #[test]
    fn extremes_come_first() {
        let inv = inventory(&[
            (Size::Xs, 1, 10.0),
            (Size::S, 1, 30.0),
            (Size::M, 1, 30.0),
            (Size::L, 1, 20.0),
            (Size::Xl, 1, 5.0),
            (Size::Xxl, 1, 5.0),
        ]);
        let sold = sales(&[
            (Size::Xs, 1, 2.0),
            (Size::S, 1, 5.0),
            (Size::M, 1, 10.0),
            (Size::L, 1, 13.0),
            (Size::Xl, 1, 35.0),
            (Size::Xxl, 1, 35.0),
        ]);
        let recs = compare_sizes(&inv, &sold);

        let over: Vec<Size> = most_overstocked(&recs, 3).iter().map(|r| r.size).collect();
        assert_eq!(over, vec![Size::S, Size::M, Size::Xs]);

        let under: Vec<Size> = most_understocked(&recs, 3).iter().map(|r| r.size).collect();
        assert_eq!(under, vec![Size::Xl, Size::Xxl]);
    }
}
