//! Closed vocabularies for ingredient categories and units.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Shelf category an ingredient is stocked under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Fresh,
    Chilled,
    Frozen,
    Dry,
    Bakery,
    Beverages,
    Condiments,
    Household,
    Other,
}

impl Category {
    /// Every accepted category, in display order.
    pub const ALL: [Self; 9] = [
        Self::Fresh,
        Self::Chilled,
        Self::Frozen,
        Self::Dry,
        Self::Bakery,
        Self::Beverages,
        Self::Condiments,
        Self::Household,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::Chilled => "chilled",
            Self::Frozen => "frozen",
            Self::Dry => "dry",
            Self::Bakery => "bakery",
            Self::Beverages => "beverages",
            Self::Condiments => "condiments",
            Self::Household => "household",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse error for [`Category`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError {
    pub input: String,
}

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid ingredient category: {}", self.input)
    }
}

impl std::error::Error for ParseCategoryError {}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| ParseCategoryError {
                input: value.to_owned(),
            })
    }
}

/// Unit an ingredient is priced and measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "ml")]
    Millilitre,
    #[serde(rename = "l")]
    Litre,
    #[serde(rename = "unit")]
    Unit,
    #[serde(rename = "pack")]
    Pack,
}

impl Unit {
    /// Every accepted unit, in display order.
    pub const ALL: [Self; 6] = [
        Self::Gram,
        Self::Kilogram,
        Self::Millilitre,
        Self::Litre,
        Self::Unit,
        Self::Pack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gram => "g",
            Self::Kilogram => "kg",
            Self::Millilitre => "ml",
            Self::Litre => "l",
            Self::Unit => "unit",
            Self::Pack => "pack",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse error for [`Unit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseUnitError {
    pub input: String,
}

impl fmt::Display for ParseUnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid ingredient unit: {}", self.input)
    }
}

impl std::error::Error for ParseUnitError {}

impl FromStr for Unit {
    type Err = ParseUnitError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.as_str() == value)
            .ok_or_else(|| ParseUnitError {
                input: value.to_owned(),
            })
    }
}
