// src/strategy/optimization.rs

//! Purchase-order optimization.
//!
//! Turns historical sales shares into a size distribution for the next
//! order, so new stock follows what customers actually bought.

use crate::analysis::round2;
use crate::analysis::sales::{GenderSales, SalesAnalysis};
use crate::error::Result;
use crate::model::catalog::{Catalog, Category, Gender, Size, Specialty};
use crate::model::order::{OrderLine, PurchaseOrder, Season};
use crate::simulation::random::RandomSource;

/// No stocked size drops below this share of its sub-order.
pub const MIN_SIZE_SHARE: f64 = 0.05;
/// Smallest quantity ever ordered for a single line.
pub const MIN_LINE_QUANTITY: u32 = 5;

/// Share of the order going to tops, bottoms and outerwear.
///
/// Formal suppliers lean toward outerwear, athletic suppliers toward tops
/// and bottoms.
pub fn category_mix(specialty: Specialty) -> [(Category, f64); 3] {
    let [tops, bottoms, outerwear] = match specialty {
        Specialty::Formal => [0.3, 0.3, 0.4],
        Specialty::Athletic => [0.5, 0.4, 0.1],
        Specialty::Streetwear | Specialty::Seasonal => [0.4, 0.3, 0.3],
    };
    [
        (Category::Tops, tops),
        (Category::Bottoms, bottoms),
        (Category::Outerwear, outerwear),
    ]
}

/// Target share of each size, proportional to its historical sales.
///
/// Every size gets at least `MIN_SIZE_SHARE` before the shares are
/// renormalized to sum to 1. With no sales at all the split is even.
///
/// # Formula
/// share(s) = max(0.05, sold(s) / Σ sold) / Σ max(0.05, ·)
pub fn size_distribution(sizes: &[Size], sales: &GenderSales) -> Vec<(Size, f64)> {
    if sizes.is_empty() {
        return Vec::new();
    }

    let total: u32 = sizes.iter().map(|s| sales.sold(*s)).sum();
    let raw: Vec<(Size, f64)> = sizes
        .iter()
        .map(|&size| {
            let share = if total > 0 {
                (sales.sold(size) as f64 / total as f64).max(MIN_SIZE_SHARE)
            } else {
                1.0 / sizes.len() as f64
            };
            (size, share)
        })
        .collect();

    let sum: f64 = raw.iter().map(|(_, share)| share).sum();
    raw.into_iter()
        .map(|(size, share)| (size, share / sum))
        .collect()
}

/// Builds a purchase order for `manufacturer_id` whose size mix follows
/// the sales history.
///
/// Sub-order per (category, gender) = ceil(MOQ × categoryShare / genders);
/// per-size quantity = max(5, round(sub × sizeShare)). Unit costs are
/// drawn per line.
pub fn optimized_purchase_order(
    catalog: &Catalog,
    manufacturer_id: u32,
    season: Season,
    year: i32,
    sales: &SalesAnalysis,
    rng: &mut dyn RandomSource,
) -> Result<PurchaseOrder> {
    let manufacturer = catalog.manufacturer(manufacturer_id)?;
    let genders = &catalog.genders;
    let no_sales = GenderSales::default();

    let mut order = PurchaseOrder {
        order_id: format!("PO-{}-{}-{}", year, season, manufacturer_id),
        manufacturer_id,
        manufacturer: manufacturer.name(),
        season,
        year,
        lines: Vec::new(),
        total_quantity: 0,
        total_cost: 0.0,
    };
    let mut total_cost = 0.0;

    for (category, category_share) in category_mix(manufacturer.specialty) {
        for &gender in genders.iter() {
            let sub_quantity = (manufacturer.min_order_quantity as f64 * category_share
                / genders.len() as f64)
                .ceil();
            let gender_sales = sales.get(&gender).unwrap_or(&no_sales);

            for (size, share) in size_distribution(category.sizes(), gender_sales) {
                let quantity = ((sub_quantity * share).round() as u32).max(MIN_LINE_QUANTITY);
                let unit_cost = round2(10.0 + rng.unit() * 40.0);
                let line_cost = unit_cost * quantity as f64;

                order.lines.push(OrderLine {
                    name: line_name(season, gender, category, size),
                    category,
                    gender,
                    size,
                    quantity,
                    unit_cost,
                    line_cost: round2(line_cost),
                });
                order.total_quantity += quantity;
                total_cost += line_cost;
            }
        }
    }

    order.total_cost = round2(total_cost);
    Ok(order)
}

fn line_name(season: Season, gender: Gender, category: Category, size: Size) -> String {
    format!("{} {} {} - Size {}", season, gender, category, size)
}
