//! Shopping list domain service.
//!
//! Implements list creation, the item write guard, and priced owner-only
//! reads over the shopping list and ingredient repositories.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::ingredient_service::map_ingredient_repository_error;
use crate::domain::ports::{
    AddItemRequest, IngredientRepository, ShoppingListCommand, ShoppingListQuery,
    ShoppingListRepository, ShoppingListRepositoryError,
};
use crate::domain::{
    Error, ShoppingList, ShoppingListItem, ShoppingListSummary, ShoppingListTitle, UserId,
};

fn map_repository_error(error: ShoppingListRepositoryError) -> Error {
    match error {
        ShoppingListRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("shopping list repository unavailable: {message}"))
        }
        ShoppingListRepositoryError::Query { message } => {
            Error::internal(format!("shopping list repository error: {message}"))
        }
        ShoppingListRepositoryError::Duplicate { title } => {
            Error::conflict(format!("shopping list {title} already exists"))
        }
    }
}

/// Service implementing [`ShoppingListCommand`] and [`ShoppingListQuery`].
#[derive(Clone)]
pub struct ShoppingListService<S, I> {
    shopping_list_repo: Arc<S>,
    ingredient_repo: Arc<I>,
}

impl<S, I> ShoppingListService<S, I> {
    /// Create a new service over the list and ingredient repositories.
    pub fn new(shopping_list_repo: Arc<S>, ingredient_repo: Arc<I>) -> Self {
        Self {
            shopping_list_repo,
            ingredient_repo,
        }
    }
}

impl<S, I> ShoppingListService<S, I>
where
    S: ShoppingListRepository,
{
    async fn load_list(&self, title: &ShoppingListTitle) -> Result<ShoppingList, Error> {
        self.shopping_list_repo
            .find_by_title(title)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("shopping list {title} not found")))
    }
}

fn ensure_owner(list: &ShoppingList, requester: &UserId) -> Result<(), Error> {
    if list.is_owned_by(requester) {
        return Ok(());
    }
    debug!(list = %list.title(), requester = %requester, "shopping list access denied");
    Err(Error::forbidden(
        "you do not have permission to access this shopping list",
    ))
}

#[async_trait]
impl<S, I> ShoppingListCommand for ShoppingListService<S, I>
where
    S: ShoppingListRepository,
    I: IngredientRepository,
{
    async fn create_shopping_list(
        &self,
        owner: &UserId,
        title: ShoppingListTitle,
    ) -> Result<ShoppingListSummary, Error> {
        let list = ShoppingList::new(Uuid::new_v4(), owner.clone(), title);
        self.shopping_list_repo
            .insert_list(&list)
            .await
            .map_err(map_repository_error)?;
        info!(list = %list.title(), owner = %owner, "shopping list created");
        Ok(ShoppingListSummary::from_lines(&list, &[]))
    }

    async fn add_item(&self, request: AddItemRequest) -> Result<ShoppingListItem, Error> {
        let list = self.load_list(&request.title).await?;
        ensure_owner(&list, &request.requester)?;

        let ingredient = self
            .ingredient_repo
            .find_by_name(&request.ingredient)
            .await
            .map_err(map_ingredient_repository_error)?
            .ok_or_else(|| {
                Error::not_found(format!("ingredient {} not found", request.ingredient))
            })?;

        let item = ShoppingListItem::attach(Uuid::new_v4(), &list, &ingredient, request.quantity)
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        self.shopping_list_repo
            .insert_item(&item)
            .await
            .map_err(map_repository_error)?;
        info!(list = %list.title(), ingredient = %ingredient.name(), "shopping list item added");
        Ok(item)
    }
}

#[async_trait]
impl<S, I> ShoppingListQuery for ShoppingListService<S, I>
where
    S: ShoppingListRepository,
    I: IngredientRepository,
{
    async fn get_shopping_list(
        &self,
        title: &ShoppingListTitle,
        requester: &UserId,
    ) -> Result<ShoppingListSummary, Error> {
        let list = self.load_list(title).await?;
        ensure_owner(&list, requester)?;

        let lines = self
            .shopping_list_repo
            .list_lines(&list.id())
            .await
            .map_err(map_repository_error)?;
        Ok(ShoppingListSummary::from_lines(&list, &lines))
    }
}

#[cfg(test)]
#[path = "shopping_list_service_tests.rs"]
mod tests;
