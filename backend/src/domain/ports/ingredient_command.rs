//! Driving port for ingredient mutations.
//!
//! Each mutable field has its own operation so that its input contract can be
//! validated in isolation. Inputs arrive already validated as domain types;
//! implementations only report lookup, conflict, and persistence failures.

use async_trait::async_trait;

use crate::domain::{CostPerUnit, Error, Ingredient, IngredientName};

/// Driving port for ingredient write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngredientCommand: Send + Sync {
    /// Store a new ingredient and return it.
    ///
    /// Fails with `conflict` when the name is already taken.
    async fn create_ingredient(&self, ingredient: Ingredient) -> Result<Ingredient, Error>;

    /// Set the unit price of an existing ingredient and return the full
    /// record. No other field changes.
    async fn update_cost_per_unit(
        &self,
        name: &IngredientName,
        cost_per_unit: CostPerUnit,
    ) -> Result<Ingredient, Error>;

    /// Mark an existing ingredient unavailable and return the full record.
    /// Flagging an already unavailable ingredient succeeds unchanged.
    async fn flag_unavailable(&self, name: &IngredientName) -> Result<Ingredient, Error>;
}
