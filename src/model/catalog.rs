// src/model/catalog.rs

use crate::error::{EngineError, Result};
use serde::Serialize;
use std::fmt;

// =========================================================================
// Genders
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Gender {
    Men,
    Women,
    Unisex,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Men, Gender::Women, Gender::Unisex];

    /// The two remaining genders, in catalog order.
    pub fn others(self) -> [Gender; 2] {
        match self {
            Gender::Men => [Gender::Women, Gender::Unisex],
            Gender::Women => [Gender::Men, Gender::Unisex],
            Gender::Unisex => [Gender::Men, Gender::Women],
        }
    }

    /// Possessive form used in report text ("Men's", "Women's").
    pub fn possessive(self) -> &'static str {
        match self {
            Gender::Men => "Men's",
            Gender::Women => "Women's",
            Gender::Unisex => "Unisex",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// =========================================================================
// Sizes
// =========================================================================

/// Every size the store carries. Letter sizes are shared by tops and
/// outerwear, waist sizes belong to bottoms, numeric sizes to dresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Size {
    #[serde(rename = "XS")]
    Xs,
    S,
    M,
    L,
    #[serde(rename = "XL")]
    Xl,
    #[serde(rename = "XXL")]
    Xxl,
    #[serde(rename = "28")]
    Waist28,
    #[serde(rename = "30")]
    Waist30,
    #[serde(rename = "32")]
    Waist32,
    #[serde(rename = "34")]
    Waist34,
    #[serde(rename = "36")]
    Waist36,
    #[serde(rename = "38")]
    Waist38,
    #[serde(rename = "40")]
    Waist40,
    #[serde(rename = "42")]
    Waist42,
    #[serde(rename = "0")]
    Dress0,
    #[serde(rename = "2")]
    Dress2,
    #[serde(rename = "4")]
    Dress4,
    #[serde(rename = "6")]
    Dress6,
    #[serde(rename = "8")]
    Dress8,
    #[serde(rename = "10")]
    Dress10,
    #[serde(rename = "12")]
    Dress12,
    #[serde(rename = "14")]
    Dress14,
    #[serde(rename = "16")]
    Dress16,
    #[serde(rename = "One Size")]
    OneSize,
}

/// Coarse small/large split of the sizes. Not every size has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SizeClass {
    Small,
    Large,
}

/// Three-way grouping used when checking genders other than the biased one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SizeBand {
    Small,
    Medium,
    Large,
}

impl Size {
    pub fn label(self) -> &'static str {
        match self {
            Size::Xs => "XS",
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::Xl => "XL",
            Size::Xxl => "XXL",
            Size::Waist28 => "28",
            Size::Waist30 => "30",
            Size::Waist32 => "32",
            Size::Waist34 => "34",
            Size::Waist36 => "36",
            Size::Waist38 => "38",
            Size::Waist40 => "40",
            Size::Waist42 => "42",
            Size::Dress0 => "0",
            Size::Dress2 => "2",
            Size::Dress4 => "4",
            Size::Dress6 => "6",
            Size::Dress8 => "8",
            Size::Dress10 => "10",
            Size::Dress12 => "12",
            Size::Dress14 => "14",
            Size::Dress16 => "16",
            Size::OneSize => "One Size",
        }
    }

    /// Sizes the generator skews for the biased gender: S/M/30/32 are
    /// stocked heavily, L/XL/36/38 lightly.
    pub fn stocking_class(self) -> Option<SizeClass> {
        match self {
            Size::S | Size::M | Size::Waist30 | Size::Waist32 => Some(SizeClass::Small),
            Size::L | Size::Xl | Size::Waist36 | Size::Waist38 => Some(SizeClass::Large),
            _ => None,
        }
    }

    /// Wider split used by the sale selection pools.
    pub fn broad_class(self) -> Option<SizeClass> {
        match self {
            Size::Xs
            | Size::S
            | Size::M
            | Size::Waist28
            | Size::Waist30
            | Size::Waist32
            | Size::Waist34 => Some(SizeClass::Small),
            Size::L
            | Size::Xl
            | Size::Xxl
            | Size::Waist36
            | Size::Waist38
            | Size::Waist40
            | Size::Waist42 => Some(SizeClass::Large),
            _ => None,
        }
    }

    /// Sizes counted in the biased gender's small-vs-large share.
    /// Small is the heavily stocked core, large is the whole upper range.
    pub fn skew_class(self) -> Option<SizeClass> {
        match self {
            Size::S | Size::M | Size::Waist30 | Size::Waist32 => Some(SizeClass::Small),
            other => match other.broad_class() {
                Some(SizeClass::Large) => Some(SizeClass::Large),
                _ => None,
            },
        }
    }

    pub fn band(self) -> Option<SizeBand> {
        match self {
            Size::Dress0 | Size::Dress2 | Size::Dress4 | Size::Xs | Size::S => {
                Some(SizeBand::Small)
            }
            Size::Dress6 | Size::Dress8 | Size::Dress10 | Size::M => Some(SizeBand::Medium),
            Size::Dress12 | Size::Dress14 | Size::Dress16 | Size::L | Size::Xl | Size::Xxl => {
                Some(SizeBand::Large)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =========================================================================
// Categories and colors
// =========================================================================

const LETTER_SIZES: [Size; 6] = [Size::Xs, Size::S, Size::M, Size::L, Size::Xl, Size::Xxl];
const WAIST_SIZES: [Size; 8] = [
    Size::Waist28,
    Size::Waist30,
    Size::Waist32,
    Size::Waist34,
    Size::Waist36,
    Size::Waist38,
    Size::Waist40,
    Size::Waist42,
];
const DRESS_SIZES: [Size; 9] = [
    Size::Dress0,
    Size::Dress2,
    Size::Dress4,
    Size::Dress6,
    Size::Dress8,
    Size::Dress10,
    Size::Dress12,
    Size::Dress14,
    Size::Dress16,
];
const ONE_SIZE: [Size; 1] = [Size::OneSize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    Tops,
    Bottoms,
    Outerwear,
    Dresses,
    Accessories,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Tops,
        Category::Bottoms,
        Category::Outerwear,
        Category::Dresses,
        Category::Accessories,
    ];

    /// Valid sizes for the category, smallest first.
    pub fn sizes(self) -> &'static [Size] {
        match self {
            Category::Tops | Category::Outerwear => &LETTER_SIZES,
            Category::Bottoms => &WAIST_SIZES,
            Category::Dresses => &DRESS_SIZES,
            Category::Accessories => &ONE_SIZE,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Color {
    Black,
    White,
    Navy,
    Gray,
    Beige,
    Red,
    Green,
    Blue,
    Purple,
    Pink,
}

impl Color {
    pub const ALL: [Color; 10] = [
        Color::Black,
        Color::White,
        Color::Navy,
        Color::Gray,
        Color::Beige,
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Purple,
        Color::Pink,
    ];
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// =========================================================================
// Manufacturers
// =========================================================================

/// The four suppliers the store buys from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Brand {
    UrbanThreads,
    ElegantEssentials,
    ActivePeak,
    SeasonalStyles,
}

impl Brand {
    /// Fraction of unit price refunded on a year-end return.
    pub fn refund_rate(self) -> f64 {
        match self {
            Brand::UrbanThreads => 0.7,
            Brand::ElegantEssentials => 0.6,
            Brand::ActivePeak => 0.5,
            Brand::SeasonalStyles => 0.4,
        }
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Specialty {
    Streetwear,
    Formal,
    Athletic,
    Seasonal,
}

impl Specialty {
    pub fn description(self) -> &'static str {
        match self {
            Specialty::Streetwear => "Streetwear and casual apparel",
            Specialty::Formal => "Business and formal wear",
            Specialty::Athletic => "Athletic and performance wear",
            Specialty::Seasonal => "Seasonal and trend-focused items",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Manufacturer {
    pub id: u32,
    pub brand: Brand,
    pub specialty: Specialty,
    pub lead_time_days: u32,
    pub min_order_quantity: u32,
    pub return_policy: &'static str,
}

impl Manufacturer {
    pub fn name(&self) -> String {
        self.brand.to_string()
    }

    pub fn refund_rate(&self) -> f64 {
        self.brand.refund_rate()
    }
}

// =========================================================================
// Catalog
// =========================================================================

/// Static reference data every stage reads from.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub manufacturers: Vec<Manufacturer>,
    pub categories: Vec<Category>,
    pub genders: Vec<Gender>,
    pub colors: Vec<Color>,
}

impl Catalog {
    /// The store's standard supplier list and assortment.
    pub fn standard() -> Self {
        Self {
            manufacturers: vec![
                Manufacturer {
                    id: 1,
                    brand: Brand::UrbanThreads,
                    specialty: Specialty::Streetwear,
                    lead_time_days: 45,
                    min_order_quantity: 100,
                    return_policy:
                        "Accepts returns of unsold inventory at 70% of original cost, once per year",
                },
                Manufacturer {
                    id: 2,
                    brand: Brand::ElegantEssentials,
                    specialty: Specialty::Formal,
                    lead_time_days: 60,
                    min_order_quantity: 50,
                    return_policy:
                        "Accepts returns of unsold inventory at 60% of original cost, twice per year",
                },
                Manufacturer {
                    id: 3,
                    brand: Brand::ActivePeak,
                    specialty: Specialty::Athletic,
                    lead_time_days: 30,
                    min_order_quantity: 75,
                    return_policy:
                        "Accepts returns of unsold inventory at 50% of original cost, quarterly",
                },
                Manufacturer {
                    id: 4,
                    brand: Brand::SeasonalStyles,
                    specialty: Specialty::Seasonal,
                    lead_time_days: 90,
                    min_order_quantity: 150,
                    return_policy:
                        "Accepts returns of unsold inventory at 40% of original cost, end of each season",
                },
            ],
            categories: Category::ALL.to_vec(),
            genders: Gender::ALL.to_vec(),
            colors: Color::ALL.to_vec(),
        }
    }

    pub fn manufacturer(&self, id: u32) -> Result<&Manufacturer> {
        self.manufacturers
            .iter()
            .find(|m| m.id == id)
            .ok_or(EngineError::UnknownManufacturer(id))
    }

    pub fn refund_rate(&self, manufacturer_id: u32) -> Result<f64> {
        Ok(self.manufacturer(manufacturer_id)?.refund_rate())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
