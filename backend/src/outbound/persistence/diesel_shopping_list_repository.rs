//! PostgreSQL-backed `ShoppingListRepository` implementation using Diesel ORM.
//!
//! Item lines are read with a left join so that items whose ingredient was
//! deleted still appear, with no ingredient attached.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{
    IngredientRepositoryError, ShoppingListRepository, ShoppingListRepositoryError,
};
use crate::domain::{
    IngredientName, Quantity, ShoppingList, ShoppingListItem, ShoppingListLine, ShoppingListTitle,
    UserId,
};

use super::diesel_ingredient_repository::row_to_ingredient;
use super::error_mapping::{StoreFailure, map_diesel_error, map_pool_error};
use super::models::{IngredientRow, NewShoppingListRow, ShoppingListItemRow, ShoppingListRow};
use super::pool::DbPool;
use super::schema::{ingredients, shopping_list_items, shopping_lists};

/// Diesel-backed implementation of the `ShoppingListRepository` port.
#[derive(Clone)]
pub struct DieselShoppingListRepository {
    pool: DbPool,
}

impl DieselShoppingListRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_port_error(failure: StoreFailure, title: &str) -> ShoppingListRepositoryError {
    match failure {
        StoreFailure::Connection(message) => ShoppingListRepositoryError::connection(message),
        StoreFailure::Query(message) => ShoppingListRepositoryError::query(message),
        StoreFailure::UniqueViolation => ShoppingListRepositoryError::duplicate(title),
    }
}

/// Item rows have no natural key; a unique violation there is a query error.
fn item_error(failure: StoreFailure) -> ShoppingListRepositoryError {
    match failure {
        StoreFailure::UniqueViolation => ShoppingListRepositoryError::query("duplicate item id"),
        other => into_port_error(other, ""),
    }
}

fn row_to_list(row: ShoppingListRow) -> Result<ShoppingList, ShoppingListRepositoryError> {
    let title = ShoppingListTitle::new(row.title)
        .map_err(|err| ShoppingListRepositoryError::query(format!("stored title: {err}")))?;
    Ok(ShoppingList::new(row.id, UserId::from_uuid(row.owner_id), title))
}

fn row_to_item(row: ShoppingListItemRow) -> Result<ShoppingListItem, ShoppingListRepositoryError> {
    let quantity = Quantity::new(row.quantity)
        .map_err(|err| ShoppingListRepositoryError::query(format!("stored quantity: {err}")))?;
    let ingredient = row
        .ingredient_name
        .map(IngredientName::new)
        .transpose()
        .map_err(|err| ShoppingListRepositoryError::query(format!("stored ingredient: {err}")))?;
    Ok(ShoppingListItem::from_parts(
        row.id,
        row.shopping_list_id,
        ingredient,
        quantity,
    ))
}

fn ingredient_error(error: IngredientRepositoryError) -> ShoppingListRepositoryError {
    ShoppingListRepositoryError::query(error.to_string())
}

#[async_trait]
impl ShoppingListRepository for DieselShoppingListRepository {
    async fn insert_list(&self, list: &ShoppingList) -> Result<(), ShoppingListRepositoryError> {
        let title = list.title().as_ref();
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| into_port_error(map_pool_error(err), title))?;

        let row = NewShoppingListRow {
            id: list.id(),
            owner_id: *list.owner().as_uuid(),
            title,
        };
        diesel::insert_into(shopping_lists::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| into_port_error(map_diesel_error(err), title))
    }

    async fn find_by_title(
        &self,
        title: &ShoppingListTitle,
    ) -> Result<Option<ShoppingList>, ShoppingListRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| into_port_error(map_pool_error(err), title.as_ref()))?;

        let row: Option<ShoppingListRow> = shopping_lists::table
            .filter(shopping_lists::title.eq(title.as_ref()))
            .select(ShoppingListRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| into_port_error(map_diesel_error(err), title.as_ref()))?;

        row.map(row_to_list).transpose()
    }

    async fn insert_item(
        &self,
        item: &ShoppingListItem,
    ) -> Result<(), ShoppingListRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| item_error(map_pool_error(err)))?;

        let row = ShoppingListItemRow {
            id: item.id(),
            shopping_list_id: item.shopping_list_id(),
            ingredient_name: item.ingredient().map(ToString::to_string),
            quantity: item.quantity().value(),
        };
        diesel::insert_into(shopping_list_items::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| item_error(map_diesel_error(err)))
    }

    async fn list_lines(
        &self,
        shopping_list_id: &Uuid,
    ) -> Result<Vec<ShoppingListLine>, ShoppingListRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| item_error(map_pool_error(err)))?;

        let rows: Vec<(ShoppingListItemRow, Option<IngredientRow>)> = shopping_list_items::table
            .left_join(ingredients::table)
            .filter(shopping_list_items::shopping_list_id.eq(shopping_list_id))
            .order(shopping_list_items::id.asc())
            .select((
                shopping_list_items::all_columns,
                ingredients::all_columns.nullable(),
            ))
            .load(&mut conn)
            .await
            .map_err(|err| item_error(map_diesel_error(err)))?;

        rows.into_iter()
            .map(|(item, ingredient)| {
                Ok(ShoppingListLine {
                    item: row_to_item(item)?,
                    ingredient: ingredient
                        .map(row_to_ingredient)
                        .transpose()
                        .map_err(ingredient_error)?,
                })
            })
            .collect()
    }
}
