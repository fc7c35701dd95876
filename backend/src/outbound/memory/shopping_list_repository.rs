//! Mutex-backed `ShoppingListRepository`.
//!
//! Items hold ingredient names; lines are joined against the shared
//! ingredient store at read time so totals always reflect current prices and
//! availability.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{ShoppingListRepository, ShoppingListRepositoryError};
use crate::domain::{ShoppingList, ShoppingListItem, ShoppingListLine, ShoppingListTitle};

use super::InMemoryIngredientRepository;
use super::lock;

#[derive(Debug, Default)]
struct Store {
    lists: HashMap<ShoppingListTitle, ShoppingList>,
    items: Vec<ShoppingListItem>,
}

/// Shopping list store sharing the ingredient store for line joins.
#[derive(Debug)]
pub struct InMemoryShoppingListRepository {
    store: Mutex<Store>,
    ingredients: Arc<InMemoryIngredientRepository>,
}

impl InMemoryShoppingListRepository {
    pub fn new(ingredients: Arc<InMemoryIngredientRepository>) -> Self {
        Self {
            store: Mutex::new(Store::default()),
            ingredients,
        }
    }
}

#[async_trait]
impl ShoppingListRepository for InMemoryShoppingListRepository {
    async fn insert_list(&self, list: &ShoppingList) -> Result<(), ShoppingListRepositoryError> {
        let mut store = lock(&self.store, ShoppingListRepositoryError::connection)?;
        if store.lists.contains_key(list.title()) {
            return Err(ShoppingListRepositoryError::duplicate(list.title().as_ref()));
        }
        store.lists.insert(list.title().clone(), list.clone());
        Ok(())
    }

    async fn find_by_title(
        &self,
        title: &ShoppingListTitle,
    ) -> Result<Option<ShoppingList>, ShoppingListRepositoryError> {
        let store = lock(&self.store, ShoppingListRepositoryError::connection)?;
        Ok(store.lists.get(title).cloned())
    }

    async fn insert_item(
        &self,
        item: &ShoppingListItem,
    ) -> Result<(), ShoppingListRepositoryError> {
        let mut store = lock(&self.store, ShoppingListRepositoryError::connection)?;
        let list_exists = store
            .lists
            .values()
            .any(|list| list.id() == item.shopping_list_id());
        if !list_exists {
            return Err(ShoppingListRepositoryError::query(format!(
                "shopping list {} does not exist",
                item.shopping_list_id()
            )));
        }
        store.items.push(item.clone());
        Ok(())
    }

    async fn list_lines(
        &self,
        shopping_list_id: &Uuid,
    ) -> Result<Vec<ShoppingListLine>, ShoppingListRepositoryError> {
        let items: Vec<ShoppingListItem> = {
            let store = lock(&self.store, ShoppingListRepositoryError::connection)?;
            store
                .items
                .iter()
                .filter(|item| item.shopping_list_id() == *shopping_list_id)
                .cloned()
                .collect()
        };

        items
            .into_iter()
            .map(|item| {
                let ingredient = match item.ingredient() {
                    Some(name) => self
                        .ingredients
                        .snapshot(name)
                        .map_err(|err| ShoppingListRepositoryError::query(err.to_string()))?,
                    None => None,
                };
                Ok(ShoppingListLine { item, ingredient })
            })
            .collect()
    }
}
