// src/analysis/report.rs

use crate::analysis::gap::{compare_sizes, most_overstocked, most_understocked, SizeRecommendation};
use crate::analysis::inventory::{GenderInventory, InventoryAnalysis};
use crate::analysis::percentage;
use crate::analysis::sales::{GenderSales, SalesAnalysis};
use crate::model::catalog::{Catalog, Gender, Size, SizeBand, SizeClass};
use crate::model::stock::InventoryItem;
use serde::Serialize;
use std::collections::BTreeSet;

/// Share of the biased gender's skew sizes held in small sizes.
pub const CRITICAL_SHARE: f64 = 80.0;
pub const WARNING_SHARE: f64 = 65.0;
/// Any band holding more than this flags an imbalance.
pub const BAND_IMBALANCE_SHARE: f64 = 50.0;
/// How many sizes the top/over/under lists keep.
pub const TOP_N: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Critical,
    Warning,
    Balanced,
}

/// Verdict on one gender's size mix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Assessment {
    /// The biased gender: small-size share of its small + large stock.
    SmallSkew { small_share: f64, severity: Severity },
    /// Any other gender: stock split across small/medium/large bands.
    Bands {
        small: f64,
        medium: f64,
        large: f64,
        imbalanced: bool,
    },
    NoData,
}

impl Assessment {
    pub fn for_biased(inventory: &GenderInventory) -> Self {
        let small = inventory.quantity_where(|s| s.skew_class() == Some(SizeClass::Small));
        let large = inventory.quantity_where(|s| s.skew_class() == Some(SizeClass::Large));
        let small_share = percentage(small as f64, (small + large) as f64);

        let severity = if small_share > CRITICAL_SHARE {
            Severity::Critical
        } else if small_share > WARNING_SHARE {
            Severity::Warning
        } else {
            Severity::Balanced
        };
        Assessment::SmallSkew {
            small_share,
            severity,
        }
    }

    pub fn for_bands(inventory: &GenderInventory) -> Self {
        let band = |b: SizeBand| inventory.quantity_where(|s| s.band() == Some(b));
        let (small, medium, large) = (
            band(SizeBand::Small),
            band(SizeBand::Medium),
            band(SizeBand::Large),
        );
        let total = (small + medium + large) as f64;
        if total == 0.0 {
            return Assessment::NoData;
        }

        let small = percentage(small as f64, total);
        let medium = percentage(medium as f64, total);
        let large = percentage(large as f64, total);
        Assessment::Bands {
            small,
            medium,
            large,
            imbalanced: [small, medium, large]
                .iter()
                .any(|share| *share > BAND_IMBALANCE_SHARE),
        }
    }

    pub fn severity(&self) -> Option<Severity> {
        match self {
            Assessment::SmallSkew { severity, .. } => Some(*severity),
            _ => None,
        }
    }

    pub fn is_imbalanced(&self) -> bool {
        match self {
            Assessment::SmallSkew { severity, .. } => *severity != Severity::Balanced,
            Assessment::Bands { imbalanced, .. } => *imbalanced,
            Assessment::NoData => false,
        }
    }

    pub fn summary(&self, gender: Gender) -> String {
        let who = gender.possessive();
        match *self {
            Assessment::SmallSkew {
                small_share,
                severity: Severity::Critical,
            } => format!(
                "CRITICAL: {} inventory is severely imbalanced with {:.2}% in S/M sizes. \
                 Immediate rebalancing required.",
                who, small_share
            ),
            Assessment::SmallSkew {
                small_share,
                severity: Severity::Warning,
            } => format!(
                "WARNING: {} inventory is imbalanced with {:.2}% in S/M sizes. \
                 Consider rebalancing in next order cycle.",
                who, small_share
            ),
            Assessment::SmallSkew { small_share, .. } => format!(
                "{} inventory size distribution appears balanced ({:.2}% S/M sizes).",
                who, small_share
            ),
            Assessment::Bands {
                small,
                medium,
                large,
                imbalanced,
            } => {
                let mut text = format!(
                    "{} inventory distribution: {:.2}% small sizes, {:.2}% medium sizes, \
                     {:.2}% large sizes.",
                    who, small, medium, large
                );
                if imbalanced {
                    text.push_str(" Potential imbalance detected, consider rebalancing.");
                }
                text
            }
            Assessment::NoData => {
                format!("No {} inventory data available for analysis.", who)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopSeller {
    pub size: Size,
    pub quantity_sold: u32,
    pub percentage_of_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderReport {
    pub gender: Gender,
    pub assessment: Assessment,
    pub summary: String,
    pub inventory_total: u32,
    pub sales_total: u32,
    pub top_selling: Vec<TopSeller>,
    pub most_overstocked: Vec<SizeRecommendation>,
    pub most_understocked: Vec<SizeRecommendation>,
    /// Every compared size, best seller first.
    pub recommendations: Vec<SizeRecommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnDirective {
    pub size: Size,
    pub quantity: u32,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManufacturerReturn {
    pub manufacturer_id: u32,
    pub manufacturer: String,
    pub return_policy: String,
    pub directives: Vec<ReturnDirective>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationReport {
    pub year: i32,
    pub overall_summary: Vec<String>,
    pub genders: Vec<GenderReport>,
    pub manufacturer_returns: Vec<ManufacturerReturn>,
}

impl OptimizationReport {
    pub fn gender(&self, gender: Gender) -> Option<&GenderReport> {
        self.genders.iter().find(|g| g.gender == gender)
    }
}

/// Inputs the report builder reads besides the two analyses.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub catalog: &'a Catalog,
    pub items: &'a [InventoryItem],
    pub year: i32,
    pub biased_gender: Gender,
    pub return_threshold: u32,
}

pub fn gender_report(
    gender: Gender,
    biased_gender: Gender,
    inventory: &GenderInventory,
    sales: &GenderSales,
) -> GenderReport {
    let mut recommendations = compare_sizes(inventory, sales);

    let assessment = if gender == biased_gender {
        Assessment::for_biased(inventory)
    } else {
        Assessment::for_bands(inventory)
    };

    let mut top_selling: Vec<TopSeller> = sales
        .sizes
        .iter()
        .map(|(size, s)| TopSeller {
            size: *size,
            quantity_sold: s.total_sold,
            percentage_of_sales: s.percentage_of_sales,
        })
        .collect();
    top_selling.sort_by(|a, b| b.quantity_sold.cmp(&a.quantity_sold));
    top_selling.truncate(TOP_N);

    let over = most_overstocked(&recommendations, TOP_N);
    let under = most_understocked(&recommendations, TOP_N);
    recommendations.sort_by(|a, b| b.sales_quantity.cmp(&a.sales_quantity));

    GenderReport {
        gender,
        summary: assessment.summary(gender),
        assessment,
        inventory_total: inventory.total_quantity,
        sales_total: sales.total_sold,
        top_selling,
        most_overstocked: over,
        most_understocked: under,
        recommendations,
    }
}

/// Stock each manufacturer should take back: current-year items in any
/// size that is most-overstocked for some gender, holding more than the
/// threshold.
///
/// Sizes are matched regardless of the item's gender, and a size listed by
/// several genders is only counted once.
pub fn manufacturer_returns(
    ctx: &ReportContext<'_>,
    genders: &[GenderReport],
) -> Vec<ManufacturerReturn> {
    let overstocked: BTreeSet<Size> = genders
        .iter()
        .flat_map(|g| g.most_overstocked.iter().map(|rec| rec.size))
        .collect();

    ctx.catalog
        .manufacturers
        .iter()
        .filter_map(|manufacturer| {
            let directives: Vec<ReturnDirective> = overstocked
                .iter()
                .filter_map(|&size| {
                    let matching: Vec<&InventoryItem> = ctx
                        .items
                        .iter()
                        .filter(|i| {
                            i.lot.year() == ctx.year
                                && i.lot.manufacturer_id() == manufacturer.id
                                && i.size == size
                                && i.current_quantity() > ctx.return_threshold
                        })
                        .collect();
                    if matching.is_empty() {
                        return None;
                    }
                    Some(ReturnDirective {
                        size,
                        quantity: matching.iter().map(|i| i.current_quantity()).sum(),
                        items: matching.iter().map(|i| i.lot.name.clone()).collect(),
                    })
                })
                .collect();

            if directives.is_empty() {
                return None;
            }
            Some(ManufacturerReturn {
                manufacturer_id: manufacturer.id,
                manufacturer: manufacturer.name(),
                return_policy: manufacturer.return_policy.to_string(),
                directives,
            })
        })
        .collect()
}

/// Builds the optimization report from the current-year stock analysis and
/// the full sales history analysis.
pub fn build_report(
    ctx: &ReportContext<'_>,
    inventory: &InventoryAnalysis,
    sales: &SalesAnalysis,
) -> OptimizationReport {
    let empty_inventory = GenderInventory::default();
    let empty_sales = GenderSales::default();

    let genders: Vec<GenderReport> = ctx
        .catalog
        .genders
        .iter()
        .map(|&gender| {
            gender_report(
                gender,
                ctx.biased_gender,
                inventory.get(&gender).unwrap_or(&empty_inventory),
                sales.get(&gender).unwrap_or(&empty_sales),
            )
        })
        .collect();

    let mut overall_summary = Vec::new();

    if let Some(biased) = genders.iter().find(|g| g.gender == ctx.biased_gender) {
        if biased.assessment.severity() == Some(Severity::Critical) {
            overall_summary.push(biased.summary.clone());

            if !biased.most_overstocked.is_empty() {
                overall_summary.push(format!(
                    "Recommended actions for {} inventory:",
                    biased.gender.possessive().to_lowercase()
                ));
                for rec in &biased.most_overstocked {
                    overall_summary.push(format!(
                        "- Return size {} items to manufacturers (currently {} units, {:.2}% over sales rate)",
                        rec.size, rec.current_inventory, rec.difference
                    ));
                }
            }

            if !biased.most_understocked.is_empty() {
                overall_summary.push("Immediate purchase recommendations:".to_string());
                for rec in &biased.most_understocked {
                    overall_summary.push(format!(
                        "- Order more size {} items (currently {} units, {:.2}% under sales rate)",
                        rec.size,
                        rec.current_inventory,
                        rec.difference.abs()
                    ));
                }
            }
        }
    }

    for report in genders
        .iter()
        .filter(|g| g.gender != ctx.biased_gender && g.assessment.is_imbalanced())
    {
        overall_summary.push(report.summary.clone());
    }

    let manufacturer_returns = manufacturer_returns(ctx, &genders);
    overall_summary.push("Manufacturer return recommendations:".to_string());
    for entry in &manufacturer_returns {
        overall_summary.push(format!("{} ({}):", entry.manufacturer, entry.return_policy));
        for d in &entry.directives {
            overall_summary.push(format!(
                "- Return {} units of size {}",
                d.quantity, d.size
            ));
        }
    }

    OptimizationReport {
        year: ctx.year,
        overall_summary,
        genders,
        manufacturer_returns,
    }
}
