//! Driving port for shopping list mutations.

use async_trait::async_trait;

use crate::domain::{
    Error, IngredientName, Quantity, ShoppingListItem, ShoppingListSummary, ShoppingListTitle,
    UserId,
};

/// Request to attach an ingredient to an existing list.
#[derive(Debug, Clone, PartialEq)]
pub struct AddItemRequest {
    /// User performing the change; must own the list.
    pub requester: UserId,
    pub title: ShoppingListTitle,
    pub ingredient: IngredientName,
    pub quantity: Quantity,
}

/// Driving port for shopping list write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShoppingListCommand: Send + Sync {
    /// Create an empty list owned by `owner`.
    ///
    /// Fails with `conflict` when the title is already taken. The returned
    /// summary always totals `0.0`.
    async fn create_shopping_list(
        &self,
        owner: &UserId,
        title: ShoppingListTitle,
    ) -> Result<ShoppingListSummary, Error>;

    /// Attach an available ingredient to a list owned by the requester.
    ///
    /// Errors:
    /// - `not_found` when the list or the ingredient does not exist;
    /// - `forbidden` when the requester does not own the list;
    /// - `invalid_request` with message `Ingredient is unavailable` when the
    ///   ingredient has been flagged unavailable. Nothing is stored.
    async fn add_item(&self, request: AddItemRequest) -> Result<ShoppingListItem, Error>;
}
