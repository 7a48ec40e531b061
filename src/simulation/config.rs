// src/simulation/config.rs

use crate::error::{EngineError, Result};
use crate::model::catalog::Gender;
use std::ops::Range;

/// Cumulative routing weights for the sale selection pools.
///
/// Order matters: biased-gender large sizes, biased-gender small sizes,
/// then the two other genders in catalog order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalesMix {
    pub large: f64,
    pub small: f64,
    pub primary_other: f64,
    pub secondary_other: f64,
}

impl SalesMix {
    pub fn weights(&self) -> [f64; 4] {
        [
            self.large,
            self.small,
            self.primary_other,
            self.secondary_other,
        ]
    }

    /// Upper bound of each pool's slice of `[0, 1)`.
    pub fn thresholds(&self) -> [f64; 4] {
        let mut acc = 0.0;
        self.weights().map(|w| {
            acc += w;
            acc
        })
    }
}

impl Default for SalesMix {
    fn default() -> Self {
        Self {
            large: 0.15,
            small: 0.35,
            primary_other: 0.30,
            secondary_other: 0.20,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub first_historical_year: i32,
    pub last_historical_year: i32,
    pub current_year: i32,

    // Stocking
    pub lots_per_manufacturer: Range<u32>,
    pub default_quantity: Range<u32>,
    pub elevated_quantity: Range<u32>,
    pub depressed_quantity: Range<u32>,
    pub price_floor: f64,
    pub price_markup: Range<u32>, // whole dollars added to the floor

    // Selling
    pub transactions_per_year: u32,
    pub max_units_per_sale: u32,
    pub biased_gender: Gender,
    pub sales_mix: SalesMix,

    // Year end
    pub return_threshold: u32,

    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            first_historical_year: 2022,
            last_historical_year: 2024,
            current_year: 2025,
            lots_per_manufacturer: 10..25,
            default_quantity: 20..50,
            elevated_quantity: 50..100,
            depressed_quantity: 5..20,
            price_floor: 19.99,
            price_markup: 0..80,
            transactions_per_year: 1000,
            max_units_per_sale: 3,
            biased_gender: Gender::Men,
            sales_mix: SalesMix::default(),
            return_threshold: 5,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn historical_years(&self) -> std::ops::RangeInclusive<i32> {
        self.first_historical_year..=self.last_historical_year
    }

    pub fn validate(&self) -> Result<()> {
        let ranges = [
            ("lots_per_manufacturer", &self.lots_per_manufacturer),
            ("default_quantity", &self.default_quantity),
            ("elevated_quantity", &self.elevated_quantity),
            ("depressed_quantity", &self.depressed_quantity),
            ("price_markup", &self.price_markup),
        ];
        for (name, range) in ranges {
            if range.is_empty() {
                return Err(EngineError::InvalidConfig(format!(
                    "{} range {}..{} is empty",
                    name, range.start, range.end
                )));
            }
        }

        if self.first_historical_year > self.last_historical_year {
            return Err(EngineError::InvalidConfig(format!(
                "historical years {}..={} are inverted",
                self.first_historical_year, self.last_historical_year
            )));
        }
        if self.current_year <= self.last_historical_year {
            return Err(EngineError::InvalidConfig(format!(
                "current year {} must follow the historical range",
                self.current_year
            )));
        }
        if self.max_units_per_sale == 0 {
            return Err(EngineError::InvalidConfig(
                "max_units_per_sale must be at least 1".to_string(),
            ));
        }

        let weights = self.sales_mix.weights();
        if weights.iter().any(|w| *w < 0.0) {
            return Err(EngineError::InvalidConfig(
                "sales mix weights must be non-negative".to_string(),
            ));
        }
        let total: f64 = weights.iter().sum();
        if (total - 1.0).abs() > 1e-9 {
            return Err(EngineError::InvalidConfig(format!(
                "sales mix weights sum to {}, expected 1",
                total
            )));
        }
        Ok(())
    }
}
