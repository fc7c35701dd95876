//! Shopping lists and the items attached to them.
//!
//! A list is owned by the user who created it and is only readable by that
//! user. Items reference ingredients by name and may only be attached while
//! the ingredient is available; later availability changes leave existing
//! items in place.

use std::fmt;

use uuid::Uuid;

use crate::domain::UserId;
use crate::domain::cost::total_cost;
use crate::domain::ingredient::{Ingredient, IngredientName};

/// Maximum number of characters accepted for a shopping list title.
pub const TITLE_MAX_CHARS: usize = 250;

/// Validation errors raised by shopping list constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShoppingValidationError {
    EmptyTitle,
    TitleTooLong { max: usize },
    InvalidQuantity,
}

impl fmt::Display for ShoppingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => {
                write!(f, "title must be at most {max} characters")
            }
            Self::InvalidQuantity => {
                write!(f, "quantity must be a finite number greater than zero")
            }
        }
    }
}

impl std::error::Error for ShoppingValidationError {}

/// Raised when an item would reference an ingredient that cannot be bought.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientUnavailable {
    pub ingredient: IngredientName,
}

impl fmt::Display for IngredientUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Ingredient is unavailable")
    }
}

impl std::error::Error for IngredientUnavailable {}

/// Unique shopping list title.
///
/// ## Invariants
/// - Trimmed, non-empty, and at most [`TITLE_MAX_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShoppingListTitle(String);

impl ShoppingListTitle {
    /// Validate and construct a [`ShoppingListTitle`].
    ///
    /// # Examples
    /// ```
    /// use pantry::domain::ShoppingListTitle;
    ///
    /// assert!(ShoppingListTitle::new("Weekly shop").is_ok());
    /// assert!(ShoppingListTitle::new("").is_err());
    /// assert!(ShoppingListTitle::new("x".repeat(251)).is_err());
    /// ```
    pub fn new(title: impl Into<String>) -> Result<Self, ShoppingValidationError> {
        let title = title.into();
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(ShoppingValidationError::EmptyTitle);
        }
        if trimmed.chars().count() > TITLE_MAX_CHARS {
            return Err(ShoppingValidationError::TitleTooLong {
                max: TITLE_MAX_CHARS,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ShoppingListTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ShoppingListTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Amount of an ingredient placed on a list, measured in the ingredient's
/// unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity(f64);

impl Quantity {
    pub fn new(value: f64) -> Result<Self, ShoppingValidationError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ShoppingValidationError::InvalidQuantity);
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// A titled list owned by a single user.
#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingList {
    id: Uuid,
    owner: UserId,
    title: ShoppingListTitle,
}

impl ShoppingList {
    pub fn new(id: Uuid, owner: UserId, title: ShoppingListTitle) -> Self {
        Self { id, owner, title }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn title(&self) -> &ShoppingListTitle {
        &self.title
    }

    /// Whether `requester` is the user the list was created for.
    pub fn is_owned_by(&self, requester: &UserId) -> bool {
        &self.owner == requester
    }
}

/// Association between a list and an ingredient, carrying the quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingListItem {
    id: Uuid,
    shopping_list_id: Uuid,
    ingredient: Option<IngredientName>,
    quantity: Quantity,
}

impl ShoppingListItem {
    /// Attach `ingredient` to `list`, refusing unavailable ingredients.
    ///
    /// # Examples
    /// ```
    /// use pantry::domain::{
    ///     Category, Ingredient, IngredientName, Quantity, ShoppingList, ShoppingListItem,
    ///     ShoppingListTitle, Unit, UserId,
    /// };
    /// use uuid::Uuid;
    ///
    /// let list = ShoppingList::new(
    ///     Uuid::new_v4(),
    ///     UserId::random(),
    ///     ShoppingListTitle::new("Weekly shop").unwrap(),
    /// );
    /// let salt = Ingredient::new(IngredientName::new("Salt").unwrap(), Category::Dry, Unit::Gram, None);
    /// let quantity = Quantity::new(1.0).unwrap();
    ///
    /// assert!(ShoppingListItem::attach(Uuid::new_v4(), &list, &salt, quantity).is_ok());
    /// let err = ShoppingListItem::attach(Uuid::new_v4(), &list, &salt.mark_unavailable(), quantity)
    ///     .unwrap_err();
    /// assert_eq!(err.to_string(), "Ingredient is unavailable");
    /// ```
    pub fn attach(
        id: Uuid,
        list: &ShoppingList,
        ingredient: &Ingredient,
        quantity: Quantity,
    ) -> Result<Self, IngredientUnavailable> {
        if !ingredient.is_available() {
            return Err(IngredientUnavailable {
                ingredient: ingredient.name().clone(),
            });
        }
        Ok(Self {
            id,
            shopping_list_id: list.id(),
            ingredient: Some(ingredient.name().clone()),
            quantity,
        })
    }

    /// Rebuild an item read back from storage without re-running the guard.
    pub fn from_parts(
        id: Uuid,
        shopping_list_id: Uuid,
        ingredient: Option<IngredientName>,
        quantity: Quantity,
    ) -> Self {
        Self {
            id,
            shopping_list_id,
            ingredient,
            quantity,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn shopping_list_id(&self) -> Uuid {
        self.shopping_list_id
    }

    /// Referenced ingredient, cleared when the ingredient row was removed.
    pub fn ingredient(&self) -> Option<&IngredientName> {
        self.ingredient.as_ref()
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }
}

/// Snapshot of an item joined with the current state of its ingredient.
#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingListLine {
    pub item: ShoppingListItem,
    pub ingredient: Option<Ingredient>,
}

/// Read model returned to the owner of a list.
#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingListSummary {
    pub owner: UserId,
    pub title: ShoppingListTitle,
    pub total_cost: f64,
}

impl ShoppingListSummary {
    /// Summarise `list`, pricing `lines` against current ingredient state.
    pub fn from_lines(list: &ShoppingList, lines: &[ShoppingListLine]) -> Self {
        Self {
            owner: list.owner().clone(),
            title: list.title().clone(),
            total_cost: total_cost(lines),
        }
    }
}

#[cfg(test)]
mod tests;
