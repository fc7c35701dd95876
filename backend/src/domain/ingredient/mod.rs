//! Ingredient inventory records.
//!
//! An ingredient is identified by its unique name and carries a category, a
//! unit, an optional unit price, and an availability flag. Availability only
//! ever moves from available to unavailable.

mod enums;

use std::fmt;

pub use enums::{Category, ParseCategoryError, ParseUnitError, Unit};

/// Validation errors raised by ingredient constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngredientValidationError {
    EmptyName,
    NonFiniteCost,
}

impl fmt::Display for IngredientValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "ingredient name must not be empty"),
            Self::NonFiniteCost => write!(f, "cost per unit must be a finite number"),
        }
    }
}

impl std::error::Error for IngredientValidationError {}

/// Unique ingredient name.
///
/// ## Invariants
/// - Surrounding whitespace is trimmed; the remainder must not be empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IngredientName(String);

impl IngredientName {
    /// Validate and construct an [`IngredientName`].
    ///
    /// # Examples
    /// ```
    /// use pantry::domain::IngredientName;
    ///
    /// let name = IngredientName::new("  Basil ").unwrap();
    /// assert_eq!(name.as_ref(), "Basil");
    /// assert!(IngredientName::new("   ").is_err());
    /// ```
    pub fn new(name: impl Into<String>) -> Result<Self, IngredientValidationError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(IngredientValidationError::EmptyName);
        }
        if trimmed.len() == name.len() {
            return Ok(Self(name));
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for IngredientName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for IngredientName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<IngredientName> for String {
    fn from(value: IngredientName) -> Self {
        value.0
    }
}

/// Price of a single unit of an ingredient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostPerUnit(f64);

impl CostPerUnit {
    /// Accept any finite price.
    pub fn new(value: f64) -> Result<Self, IngredientValidationError> {
        if !value.is_finite() {
            return Err(IngredientValidationError::NonFiniteCost);
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Inventory record for a purchasable ingredient.
///
/// # Examples
/// ```
/// use pantry::domain::{Category, CostPerUnit, Ingredient, IngredientName, Unit};
///
/// let basil = Ingredient::new(
///     IngredientName::new("Basil").unwrap(),
///     Category::Fresh,
///     Unit::Gram,
///     Some(CostPerUnit::new(0.25).unwrap()),
/// );
/// assert!(basil.is_available());
/// assert!(!basil.mark_unavailable().is_available());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    name: IngredientName,
    category: Category,
    unit: Unit,
    cost_per_unit: Option<CostPerUnit>,
    available: bool,
}

impl Ingredient {
    /// Build an available ingredient.
    pub fn new(
        name: IngredientName,
        category: Category,
        unit: Unit,
        cost_per_unit: Option<CostPerUnit>,
    ) -> Self {
        Self {
            name,
            category,
            unit,
            cost_per_unit,
            available: true,
        }
    }

    /// Override the availability flag, used when creating or rehydrating.
    pub fn with_availability(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Replace the unit price, leaving every other field untouched.
    pub fn with_cost_per_unit(mut self, cost_per_unit: CostPerUnit) -> Self {
        self.cost_per_unit = Some(cost_per_unit);
        self
    }

    /// Flag the ingredient as unavailable. Idempotent.
    pub fn mark_unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub fn name(&self) -> &IngredientName {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Unit price, absent for records imported without a usable price.
    pub fn cost_per_unit(&self) -> Option<f64> {
        self.cost_per_unit.map(CostPerUnit::value)
    }

    pub fn is_available(&self) -> bool {
        self.available
    }
}
