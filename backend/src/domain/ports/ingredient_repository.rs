//! Port for ingredient persistence.

use async_trait::async_trait;

use crate::domain::{CostPerUnit, Ingredient, IngredientName};

use super::define_port_error;

define_port_error! {
    /// Errors raised by ingredient repository adapters.
    pub enum IngredientRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "ingredient repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "ingredient repository query failed: {message}",
        /// An ingredient with the same name already exists.
        Duplicate { name: String } =>
            "ingredient {name} already exists",
    }
}

/// Port for reading and mutating ingredient records.
///
/// Mutations return the stored record after the change, or `None` when no
/// ingredient with that name exists.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// Persist a new ingredient, failing with `Duplicate` on a name clash.
    async fn insert(&self, ingredient: &Ingredient) -> Result<(), IngredientRepositoryError>;

    async fn find_by_name(
        &self,
        name: &IngredientName,
    ) -> Result<Option<Ingredient>, IngredientRepositoryError>;

    /// Overwrite the unit price of an existing ingredient.
    async fn update_cost_per_unit(
        &self,
        name: &IngredientName,
        cost_per_unit: CostPerUnit,
    ) -> Result<Option<Ingredient>, IngredientRepositoryError>;

    /// Clear the availability flag of an existing ingredient.
    async fn mark_unavailable(
        &self,
        name: &IngredientName,
    ) -> Result<Option<Ingredient>, IngredientRepositoryError>;
}
