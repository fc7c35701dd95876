//! Driving port for ingredient reads.

use async_trait::async_trait;

use crate::domain::{Error, Ingredient, IngredientName};

/// Driving port for looking up ingredient records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngredientQuery: Send + Sync {
    /// Fetch one ingredient by name, failing with `not_found` when absent.
    async fn get_ingredient(&self, name: &IngredientName) -> Result<Ingredient, Error>;
}
