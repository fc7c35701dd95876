//! One-time bulk import of ingredient and shopping list fixtures.
//!
//! The fixture files use spreadsheet-style column names. Rows that cannot be
//! mapped onto the domain are skipped, counted, and logged; repository
//! failures abort the import. Re-running an import reuses existing
//! ingredients and lists and does not duplicate items.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::ingredient_service::map_ingredient_repository_error;
use crate::domain::ports::{
    IngredientRepository, IngredientRepositoryError, ShoppingListRepository,
    ShoppingListRepositoryError,
};
use crate::domain::{
    Category, CostPerUnit, Error, Ingredient, IngredientName, Quantity, ShoppingList,
    ShoppingListItem, ShoppingListTitle, Unit, UserId,
};

/// Row of `ingredients.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IngredientRecord {
    #[serde(rename = "Ingredient")]
    pub name: String,
    #[serde(rename = "Excel Category")]
    pub category: String,
    #[serde(rename = "Unit")]
    pub unit: String,
    /// Usually a number, occasionally free text such as `"n/a"`.
    #[serde(rename = "Cost Per Unit", default)]
    pub cost_per_unit: Value,
}

/// Row of `shopping_lists.json`; one row per list item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShoppingListRecord {
    #[serde(rename = "Shopping List")]
    pub title: String,
    #[serde(rename = "Ingredient")]
    pub ingredient: String,
    #[serde(rename = "Amount")]
    pub amount: Value,
}

/// Counters reported once an import finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub ingredients_created: usize,
    pub ingredients_existing: usize,
    pub ingredients_skipped: usize,
    pub lists_created: usize,
    pub items_created: usize,
    pub items_existing: usize,
    pub items_skipped: usize,
}

fn parse_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn parse_ingredient(record: &IngredientRecord) -> Result<Ingredient, String> {
    let name = IngredientName::new(record.name.as_str()).map_err(|err| err.to_string())?;
    let category = record
        .category
        .trim()
        .to_ascii_lowercase()
        .parse::<Category>()
        .map_err(|err| err.to_string())?;
    let unit = record
        .unit
        .trim()
        .to_ascii_lowercase()
        .parse::<Unit>()
        .map_err(|err| err.to_string())?;
    let cost_per_unit = parse_number(&record.cost_per_unit).and_then(|v| CostPerUnit::new(v).ok());
    Ok(Ingredient::new(name, category, unit, cost_per_unit))
}

fn map_list_repository_error(error: ShoppingListRepositoryError) -> Error {
    match error {
        ShoppingListRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("shopping list repository unavailable: {message}"))
        }
        other => Error::internal(format!("shopping list import failed: {other}")),
    }
}

/// Imports fixture rows through the repository ports.
pub struct FixtureImporter<S, I> {
    shopping_list_repo: Arc<S>,
    ingredient_repo: Arc<I>,
    owner: UserId,
}

impl<S, I> FixtureImporter<S, I>
where
    S: ShoppingListRepository,
    I: IngredientRepository,
{
    /// Create an importer assigning every imported list to `owner`.
    pub fn new(shopping_list_repo: Arc<S>, ingredient_repo: Arc<I>, owner: UserId) -> Self {
        Self {
            shopping_list_repo,
            ingredient_repo,
            owner,
        }
    }

    /// Import ingredients first, then the list rows that reference them.
    pub async fn import(
        &self,
        ingredients: &[IngredientRecord],
        lists: &[ShoppingListRecord],
    ) -> Result<ImportSummary, Error> {
        let mut summary = ImportSummary::default();
        self.import_ingredients(ingredients, &mut summary).await?;
        self.import_shopping_lists(lists, &mut summary).await?;
        info!(
            ingredients_created = summary.ingredients_created,
            ingredients_skipped = summary.ingredients_skipped,
            lists_created = summary.lists_created,
            items_created = summary.items_created,
            items_skipped = summary.items_skipped,
            "fixture import finished"
        );
        Ok(summary)
    }

    async fn import_ingredients(
        &self,
        records: &[IngredientRecord],
        summary: &mut ImportSummary,
    ) -> Result<(), Error> {
        for (row, record) in records.iter().enumerate() {
            let ingredient = match parse_ingredient(record) {
                Ok(ingredient) => ingredient,
                Err(reason) => {
                    warn!(row, name = %record.name, %reason, "skipping ingredient fixture row");
                    summary.ingredients_skipped += 1;
                    continue;
                }
            };
            match self.ingredient_repo.insert(&ingredient).await {
                Ok(()) => summary.ingredients_created += 1,
                Err(IngredientRepositoryError::Duplicate { .. }) => {
                    summary.ingredients_existing += 1;
                }
                Err(err) => return Err(map_ingredient_repository_error(err)),
            }
        }
        Ok(())
    }

    async fn import_shopping_lists(
        &self,
        records: &[ShoppingListRecord],
        summary: &mut ImportSummary,
    ) -> Result<(), Error> {
        let mut created_this_run: HashSet<Uuid> = HashSet::new();

        for (row, record) in records.iter().enumerate() {
            let Some((title, ingredient_name, quantity)) = parse_item_row(row, record) else {
                summary.items_skipped += 1;
                continue;
            };

            let list = match self
                .shopping_list_repo
                .find_by_title(&title)
                .await
                .map_err(map_list_repository_error)?
            {
                Some(list) => list,
                None => {
                    let list = ShoppingList::new(Uuid::new_v4(), self.owner.clone(), title);
                    self.shopping_list_repo
                        .insert_list(&list)
                        .await
                        .map_err(map_list_repository_error)?;
                    created_this_run.insert(list.id());
                    summary.lists_created += 1;
                    list
                }
            };
            if !created_this_run.contains(&list.id()) {
                summary.items_existing += 1;
                continue;
            }

            let Some(ingredient) = self
                .ingredient_repo
                .find_by_name(&ingredient_name)
                .await
                .map_err(map_ingredient_repository_error)?
            else {
                warn!(row, ingredient = %ingredient_name, "skipping item for unknown ingredient");
                summary.items_skipped += 1;
                continue;
            };

            let item = match ShoppingListItem::attach(Uuid::new_v4(), &list, &ingredient, quantity)
            {
                Ok(item) => item,
                Err(err) => {
                    warn!(row, ingredient = %ingredient_name, reason = %err, "skipping item");
                    summary.items_skipped += 1;
                    continue;
                }
            };
            self.shopping_list_repo
                .insert_item(&item)
                .await
                .map_err(map_list_repository_error)?;
            summary.items_created += 1;
        }
        Ok(())
    }
}

fn parse_item_row(
    row: usize,
    record: &ShoppingListRecord,
) -> Option<(ShoppingListTitle, IngredientName, Quantity)> {
    let parsed = ShoppingListTitle::new(record.title.as_str())
        .map_err(|err| err.to_string())
        .and_then(|title| {
            let name =
                IngredientName::new(record.ingredient.as_str()).map_err(|err| err.to_string())?;
            let quantity = parse_number(&record.amount)
                .ok_or_else(|| "amount is not a number".to_owned())
                .and_then(|amount| Quantity::new(amount).map_err(|err| err.to_string()))?;
            Ok((title, name, quantity))
        });
    match parsed {
        Ok(values) => Some(values),
        Err(reason) => {
            warn!(row, title = %record.title, %reason, "skipping shopping list fixture row");
            None
        }
    }
}

#[cfg(test)]
#[path = "fixture_import_tests.rs"]
mod tests;
