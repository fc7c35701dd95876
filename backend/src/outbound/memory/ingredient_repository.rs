//! Mutex-backed `IngredientRepository`.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{IngredientRepository, IngredientRepositoryError};
use crate::domain::{CostPerUnit, Ingredient, IngredientName};

use super::lock;

/// Ingredient store keyed by name.
#[derive(Debug, Default)]
pub struct InMemoryIngredientRepository {
    ingredients: Mutex<BTreeMap<IngredientName, Ingredient>>,
}

impl InMemoryIngredientRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a stored ingredient, used when joining list lines.
    pub(crate) fn snapshot(
        &self,
        name: &IngredientName,
    ) -> Result<Option<Ingredient>, IngredientRepositoryError> {
        let ingredients = lock(&self.ingredients, IngredientRepositoryError::connection)?;
        Ok(ingredients.get(name).cloned())
    }

    fn modify(
        &self,
        name: &IngredientName,
        change: impl FnOnce(Ingredient) -> Ingredient,
    ) -> Result<Option<Ingredient>, IngredientRepositoryError> {
        let mut ingredients = lock(&self.ingredients, IngredientRepositoryError::connection)?;
        let Some(current) = ingredients.remove(name) else {
            return Ok(None);
        };
        let updated = change(current);
        ingredients.insert(name.clone(), updated.clone());
        Ok(Some(updated))
    }
}

#[async_trait]
impl IngredientRepository for InMemoryIngredientRepository {
    async fn insert(&self, ingredient: &Ingredient) -> Result<(), IngredientRepositoryError> {
        let mut ingredients = lock(&self.ingredients, IngredientRepositoryError::connection)?;
        if ingredients.contains_key(ingredient.name()) {
            return Err(IngredientRepositoryError::duplicate(
                ingredient.name().as_ref(),
            ));
        }
        ingredients.insert(ingredient.name().clone(), ingredient.clone());
        Ok(())
    }

    async fn find_by_name(
        &self,
        name: &IngredientName,
    ) -> Result<Option<Ingredient>, IngredientRepositoryError> {
        self.snapshot(name)
    }

    async fn update_cost_per_unit(
        &self,
        name: &IngredientName,
        cost_per_unit: CostPerUnit,
    ) -> Result<Option<Ingredient>, IngredientRepositoryError> {
        self.modify(name, |ingredient| ingredient.with_cost_per_unit(cost_per_unit))
    }

    async fn mark_unavailable(
        &self,
        name: &IngredientName,
    ) -> Result<Option<Ingredient>, IngredientRepositoryError> {
        self.modify(name, Ingredient::mark_unavailable)
    }
}
