//! Port for shopping list and item persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{ShoppingList, ShoppingListItem, ShoppingListLine, ShoppingListTitle};

use super::define_port_error;

define_port_error! {
    /// Errors raised by shopping list repository adapters.
    pub enum ShoppingListRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "shopping list repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "shopping list repository query failed: {message}",
        /// A list with the same title already exists.
        Duplicate { title: String } =>
            "shopping list {title} already exists",
    }
}

/// Port for writing lists and items and reading priced line snapshots.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShoppingListRepository: Send + Sync {
    /// Persist a new list, failing with `Duplicate` on a title clash.
    async fn insert_list(&self, list: &ShoppingList) -> Result<(), ShoppingListRepositoryError>;

    async fn find_by_title(
        &self,
        title: &ShoppingListTitle,
    ) -> Result<Option<ShoppingList>, ShoppingListRepositoryError>;

    /// Persist an item that has already passed the availability guard.
    async fn insert_item(&self, item: &ShoppingListItem)
    -> Result<(), ShoppingListRepositoryError>;

    /// Every item of a list joined with the current state of its ingredient.
    async fn list_lines(
        &self,
        shopping_list_id: &Uuid,
    ) -> Result<Vec<ShoppingListLine>, ShoppingListRepositoryError>;
}
