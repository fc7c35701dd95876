//! Ingredient domain service.
//!
//! Implements the ingredient driving ports on top of an
//! [`IngredientRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    IngredientCommand, IngredientQuery, IngredientRepository, IngredientRepositoryError,
};
use crate::domain::{CostPerUnit, Error, Ingredient, IngredientName};

pub(crate) fn map_ingredient_repository_error(error: IngredientRepositoryError) -> Error {
    match error {
        IngredientRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("ingredient repository unavailable: {message}"))
        }
        IngredientRepositoryError::Query { message } => {
            Error::internal(format!("ingredient repository error: {message}"))
        }
        IngredientRepositoryError::Duplicate { name } => {
            Error::conflict(format!("ingredient {name} already exists"))
        }
    }
}

fn ingredient_not_found(name: &IngredientName) -> Error {
    Error::not_found(format!("ingredient {name} not found"))
}

/// Service implementing [`IngredientCommand`] and [`IngredientQuery`].
#[derive(Clone)]
pub struct IngredientService<R> {
    ingredient_repo: Arc<R>,
}

impl<R> IngredientService<R> {
    /// Create a new service over the ingredient repository.
    pub fn new(ingredient_repo: Arc<R>) -> Self {
        Self { ingredient_repo }
    }
}

#[async_trait]
impl<R> IngredientCommand for IngredientService<R>
where
    R: IngredientRepository,
{
    async fn create_ingredient(&self, ingredient: Ingredient) -> Result<Ingredient, Error> {
        self.ingredient_repo
            .insert(&ingredient)
            .await
            .map_err(map_ingredient_repository_error)?;
        info!(ingredient = %ingredient.name(), "ingredient created");
        Ok(ingredient)
    }

    async fn update_cost_per_unit(
        &self,
        name: &IngredientName,
        cost_per_unit: CostPerUnit,
    ) -> Result<Ingredient, Error> {
        self.ingredient_repo
            .update_cost_per_unit(name, cost_per_unit)
            .await
            .map_err(map_ingredient_repository_error)?
            .ok_or_else(|| ingredient_not_found(name))
    }

    async fn flag_unavailable(&self, name: &IngredientName) -> Result<Ingredient, Error> {
        let ingredient = self
            .ingredient_repo
            .mark_unavailable(name)
            .await
            .map_err(map_ingredient_repository_error)?
            .ok_or_else(|| ingredient_not_found(name))?;
        info!(ingredient = %name, "ingredient flagged unavailable");
        Ok(ingredient)
    }
}

#[async_trait]
impl<R> IngredientQuery for IngredientService<R>
where
    R: IngredientRepository,
{
    async fn get_ingredient(&self, name: &IngredientName) -> Result<Ingredient, Error> {
        self.ingredient_repo
            .find_by_name(name)
            .await
            .map_err(map_ingredient_repository_error)?
            .ok_or_else(|| ingredient_not_found(name))
    }
}

#[cfg(test)]
#[path = "ingredient_service_tests.rs"]
mod tests;
