//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and only see driving ports, so they
//! can be exercised against test doubles without any I/O.

use std::sync::Arc;

use crate::domain::ports::{
    IngredientCommand, IngredientQuery, LoginService, ShoppingListCommand, ShoppingListQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub ingredients: Arc<dyn IngredientCommand>,
    pub ingredients_query: Arc<dyn IngredientQuery>,
    pub shopping_lists: Arc<dyn ShoppingListCommand>,
    pub shopping_lists_query: Arc<dyn ShoppingListQuery>,
}

impl HttpState {
    /// Bundle port implementations for handlers.
    ///
    /// Services implementing both halves of a command/query pair are passed
    /// twice, once per trait object.
    pub fn new(
        login: Arc<dyn LoginService>,
        ingredients: Arc<dyn IngredientCommand>,
        ingredients_query: Arc<dyn IngredientQuery>,
        shopping_lists: Arc<dyn ShoppingListCommand>,
        shopping_lists_query: Arc<dyn ShoppingListQuery>,
    ) -> Self {
        Self {
            login,
            ingredients,
            ingredients_query,
            shopping_lists,
            shopping_lists_query,
        }
    }
}
