// src/io/reporting.rs

use crate::analysis::report::OptimizationReport;
use crate::error::Result;
use crate::model::catalog::Gender;
use crate::model::order::PurchaseOrder;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::info;

/// Writes any flat record type to a CSV file, one row per record.
///
/// # Arguments
/// * `path` - Where to save the file (e.g., "out/sales.csv").
/// * `records` - Rows to serialize; the header comes from the field names.
///
/// Returns the number of rows written.
pub fn write_records<T: Serialize>(path: impl AsRef<Path>, records: &[T]) -> Result<usize> {
    let path = path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;

    for record in records {
        wtr.serialize(record)?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;

    info!(rows = records.len(), path = %path.display(), "csv exported");
    Ok(records.len())
}

/// Console view of the overall summary and the focus gender's lists.
pub struct ReportView<'a> {
    pub report: &'a OptimizationReport,
    pub focus: Gender,
}

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== INVENTORY OPTIMIZATION REPORT ({}) ===", self.report.year)?;
        writeln!(f, "\nOverall Summary:")?;
        for line in &self.report.overall_summary {
            writeln!(f, "{}", line)?;
        }

        let Some(g) = self.report.gender(self.focus) else {
            return Ok(());
        };
        writeln!(
            f,
            "\n=== {} INVENTORY ANALYSIS ===",
            self.focus.possessive().to_uppercase()
        )?;
        writeln!(f, "{}", g.summary)?;

        writeln!(f, "\nTop selling sizes:")?;
        for top in &g.top_selling {
            writeln!(
                f,
                "- Size {}: {} units ({:.2}% of sales)",
                top.size, top.quantity_sold, top.percentage_of_sales
            )?;
        }

        writeln!(f, "\nMost overstocked sizes:")?;
        for rec in &g.most_overstocked {
            writeln!(
                f,
                "- Size {}: {} units, {:.2}% over sales rate",
                rec.size, rec.current_inventory, rec.difference
            )?;
        }

        writeln!(f, "\nMost understocked sizes:")?;
        for rec in &g.most_understocked {
            writeln!(
                f,
                "- Size {}: {} units, {:.2}% under sales rate",
                rec.size,
                rec.current_inventory,
                rec.difference.abs()
            )?;
        }
        Ok(())
    }
}

/// Console view of an order header and one gender's size mix.
pub struct OrderView<'a> {
    pub order: &'a PurchaseOrder,
    pub focus: Gender,
}

impl fmt::Display for OrderView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order = self.order;
        writeln!(f, "=== OPTIMIZED PURCHASE ORDER ===")?;
        writeln!(f, "Order ID: {}", order.order_id)?;
        writeln!(f, "Manufacturer: {}", order.manufacturer)?;
        writeln!(f, "Season: {} {}", order.season, order.year)?;
        writeln!(f, "Total Quantity: {}", order.total_quantity)?;
        writeln!(f, "Total Cost: ${:.2}", order.total_cost)?;

        writeln!(f, "\nSize Distribution in New Order ({}):", self.focus)?;
        for (size, share) in order.size_mix(self.focus) {
            writeln!(
                f,
                "- Size {}: {} units ({:.2}%)",
                size, share.quantity, share.percentage
            )?;
        }
        Ok(())
    }
}

pub fn render_report(report: &OptimizationReport, focus: Gender) -> String {
    ReportView { report, focus }.to_string()
}

pub fn render_order(order: &PurchaseOrder, focus: Gender) -> String {
    OrderView { order, focus }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::{Category, Size};
    use crate::model::order::{OrderLine, Season};

    fn order() -> PurchaseOrder {
        PurchaseOrder {
            order_id: "PO-2025-Fall-1".to_string(),
            manufacturer_id: 1,
            manufacturer: "UrbanThreads".to_string(),
            season: Season::Fall,
            year: 2025,
            lines: vec![OrderLine {
                name: "Fall Men Tops - Size XL".to_string(),
                category: Category::Tops,
                gender: Gender::Men,
                size: Size::Xl,
                quantity: 12,
                unit_cost: 20.5,
                line_cost: 246.0,
            }],
            total_quantity: 12,
            total_cost: 246.0,
        }
    }

    #[test]
    fn order_lines_export_as_flat_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("order.csv");
        let rows = write_records(&path, &order().lines).unwrap();
        assert_eq!(rows, 1);

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("name,category,gender,size,quantity,unit_cost,line_cost")
        );
        assert_eq!(
            lines.next(),
            Some("Fall Men Tops - Size XL,Tops,Men,XL,12,20.5,246.0")
        );
    }

    #[test]
    fn report_rendering_lists_summary_and_focus_sections() {
        let report = OptimizationReport {
            year: 2025,
            overall_summary: vec!["Manufacturer return recommendations:".to_string()],
            genders: Vec::new(),
            manufacturer_returns: Vec::new(),
        };
        let text = render_report(&report, Gender::Men);
        assert_eq!(
            text,
            "=== INVENTORY OPTIMIZATION REPORT (2025) ===\n\nOverall Summary:\n\
             Manufacturer return recommendations:\n"
        );
    }

    #[test]
    fn order_rendering_lists_the_size_mix() {
        let text = render_order(&order(), Gender::Men);
        assert!(text.contains("Order ID: PO-2025-Fall-1"));
        assert!(text.contains("- Size XL: 12 units (100.00%)"));
    }
}
