//! Driving port for shopping list reads.
//!
//! The requester is passed explicitly so the access check does not depend on
//! any request-scoped state.

use async_trait::async_trait;

use crate::domain::{Error, ShoppingListSummary, ShoppingListTitle, UserId};

/// Driving port for reading priced shopping list summaries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShoppingListQuery: Send + Sync {
    /// Return the owner, title, and current total cost of a list.
    ///
    /// Fails with `not_found` for an unknown title and with `forbidden` when
    /// the list exists but `requester` is not its owner.
    async fn get_shopping_list(
        &self,
        title: &ShoppingListTitle,
        requester: &UserId,
    ) -> Result<ShoppingListSummary, Error>;
}
