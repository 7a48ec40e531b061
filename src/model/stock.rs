// src/model/stock.rs

use crate::model::catalog::{Category, Color, Gender, Size};
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;

/// Identity of a manufactured lot: `{year}-{manufacturer}-{sequence}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductId {
    pub year: i32,
    pub manufacturer_id: u32,
    pub sequence: u32,
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.year, self.manufacturer_id, self.sequence)
    }
}

// Written as its display string so CSV rows stay flat.
impl Serialize for ProductId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A manufactured batch before it fans out into sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct Lot {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    pub gender: Gender,
    pub color: Color,
    pub created: NaiveDate,
}

impl Lot {
    pub fn year(&self) -> i32 {
        self.id.year
    }

    pub fn manufacturer_id(&self) -> u32 {
        self.id.manufacturer_id
    }
}

/// One size of one lot on the shelf.
///
/// `current_quantity` only moves down: sales decrement it and a year-end
/// return zeroes it. It can never exceed `initial_quantity`.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryItem {
    pub lot: Lot,
    pub size: Size,
    pub unit_price: f64,
    initial_quantity: u32,
    current_quantity: u32,
}

impl InventoryItem {
    pub fn new(lot: Lot, size: Size, quantity: u32, unit_price: f64) -> Self {
        Self {
            lot,
            size,
            unit_price,
            initial_quantity: quantity,
            current_quantity: quantity,
        }
    }

    pub fn initial_quantity(&self) -> u32 {
        self.initial_quantity
    }

    pub fn current_quantity(&self) -> u32 {
        self.current_quantity
    }

    pub fn in_stock(&self) -> bool {
        self.current_quantity > 0
    }

    pub fn gender(&self) -> Gender {
        self.lot.gender
    }

    /// Takes up to `requested` units off the shelf.
    ///
    /// Returns the quantity actually sold (capped at what is left).
    pub fn sell(&mut self, requested: u32) -> u32 {
        let sold = requested.min(self.current_quantity);
        self.current_quantity -= sold;
        sold
    }

    /// Sends the whole residual back to the manufacturer.
    ///
    /// Returns the quantity removed.
    pub fn return_all(&mut self) -> u32 {
        let residual = self.current_quantity;
        self.current_quantity = 0;
        residual
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleRecord {
    pub product_id: ProductId,
    pub size: Size,
    pub quantity: u32,
    pub total_price: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnRecord {
    pub year: i32,
    pub product_id: ProductId,
    pub size: Size,
    pub manufacturer_id: u32,
    pub quantity: u32,
    pub return_value: f64,
    pub date: NaiveDate,
}
