// src/model/order.rs

use crate::model::catalog::{Category, Gender, Size};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::str::FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "fall" | "autumn" => Ok(Season::Fall),
            "winter" => Ok(Season::Winter),
            other => Err(format!("unknown season '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub name: String,
    pub category: Category,
    pub gender: Gender,
    pub size: Size,
    pub quantity: u32,
    pub unit_cost: f64,
    pub line_cost: f64,
}

/// A replenishment order. Built once by the optimizer and never changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseOrder {
    pub order_id: String,
    pub manufacturer_id: u32,
    pub manufacturer: String,
    pub season: Season,
    pub year: i32,
    pub lines: Vec<OrderLine>,
    pub total_quantity: u32,
    pub total_cost: f64,
}

/// Ordered units of one size within one gender.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeShare {
    pub quantity: u32,
    pub percentage: f64,
}

impl PurchaseOrder {
    /// Breaks a gender's ordered units down by size.
    pub fn size_mix(&self, gender: Gender) -> BTreeMap<Size, SizeShare> {
        let mut quantities: BTreeMap<Size, u32> = BTreeMap::new();
        for line in self.lines.iter().filter(|l| l.gender == gender) {
            *quantities.entry(line.size).or_insert(0) += line.quantity;
        }

        let total: u32 = quantities.values().sum();
        quantities
            .into_iter()
            .map(|(size, quantity)| {
                let percentage = if total > 0 {
                    quantity as f64 / total as f64 * 100.0
                } else {
                    0.0
                };
                (size, SizeShare { quantity, percentage })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_parses_case_insensitively() {
        assert_eq!("FALL".parse::<Season>().unwrap(), Season::Fall);
        assert!("monsoon".parse::<Season>().is_err());
    }

    #[test]
    fn size_mix_sums_per_gender() {
        let line = |gender, size, quantity| OrderLine {
            name: String::new(),
            category: Category::Tops,
            gender,
            size,
            quantity,
            unit_cost: 10.0,
            line_cost: 10.0 * quantity as f64,
        };
        let order = PurchaseOrder {
            order_id: "PO-2025-Fall-1".to_string(),
            manufacturer_id: 1,
            manufacturer: "UrbanThreads".to_string(),
            season: Season::Fall,
            year: 2025,
            lines: vec![
                line(Gender::Men, Size::L, 30),
                line(Gender::Men, Size::L, 10),
                line(Gender::Men, Size::S, 60),
                line(Gender::Women, Size::S, 500),
            ],
            total_quantity: 600,
            total_cost: 6000.0,
        };

        let mix = order.size_mix(Gender::Men);
        assert_eq!(mix[&Size::L].quantity, 40);
        assert!((mix[&Size::L].percentage - 40.0).abs() < 1e-9);
        assert!((mix[&Size::S].percentage - 60.0).abs() < 1e-9);
        assert!(order.size_mix(Gender::Unisex).is_empty());
    }
}
