//! PostgreSQL-backed `IngredientRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{IngredientRepository, IngredientRepositoryError};
use crate::domain::{Category, CostPerUnit, Ingredient, IngredientName, Unit};

use super::error_mapping::{StoreFailure, map_diesel_error, map_pool_error};
use super::models::IngredientRow;
use super::pool::DbPool;
use super::schema::ingredients;

/// Diesel-backed implementation of the `IngredientRepository` port.
#[derive(Clone)]
pub struct DieselIngredientRepository {
    pool: DbPool,
}

impl DieselIngredientRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_port_error(failure: StoreFailure, name: &str) -> IngredientRepositoryError {
    match failure {
        StoreFailure::Connection(message) => IngredientRepositoryError::connection(message),
        StoreFailure::Query(message) => IngredientRepositoryError::query(message),
        StoreFailure::UniqueViolation => IngredientRepositoryError::duplicate(name),
    }
}

fn to_row(ingredient: &Ingredient) -> IngredientRow {
    IngredientRow {
        name: ingredient.name().to_string(),
        category: ingredient.category().as_str().to_owned(),
        unit: ingredient.unit().as_str().to_owned(),
        cost_per_unit: ingredient.cost_per_unit(),
        available: ingredient.is_available(),
    }
}

/// Rebuild a domain ingredient, rejecting rows that no longer validate.
pub(crate) fn row_to_ingredient(row: IngredientRow) -> Result<Ingredient, IngredientRepositoryError> {
    let invalid = |what: String| IngredientRepositoryError::query(format!("stored {what}"));
    let category = row
        .category
        .parse::<Category>()
        .map_err(|err| invalid(format!("category: {err}")))?;
    let unit = row
        .unit
        .parse::<Unit>()
        .map_err(|err| invalid(format!("unit: {err}")))?;
    let cost = row
        .cost_per_unit
        .map(CostPerUnit::new)
        .transpose()
        .map_err(|err| invalid(format!("cost: {err}")))?;
    let name = IngredientName::new(row.name).map_err(|err| invalid(format!("name: {err}")))?;
    Ok(Ingredient::new(name, category, unit, cost).with_availability(row.available))
}

#[async_trait]
impl IngredientRepository for DieselIngredientRepository {
    async fn insert(&self, ingredient: &Ingredient) -> Result<(), IngredientRepositoryError> {
        let name = ingredient.name().as_ref();
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| into_port_error(map_pool_error(err), name))?;

        diesel::insert_into(ingredients::table)
            .values(&to_row(ingredient))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| into_port_error(map_diesel_error(err), name))
    }

    async fn find_by_name(
        &self,
        name: &IngredientName,
    ) -> Result<Option<Ingredient>, IngredientRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| into_port_error(map_pool_error(err), name.as_ref()))?;

        let row: Option<IngredientRow> = ingredients::table
            .find(name.as_ref())
            .select(IngredientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| into_port_error(map_diesel_error(err), name.as_ref()))?;

        row.map(row_to_ingredient).transpose()
    }

    async fn update_cost_per_unit(
        &self,
        name: &IngredientName,
        cost_per_unit: CostPerUnit,
    ) -> Result<Option<Ingredient>, IngredientRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| into_port_error(map_pool_error(err), name.as_ref()))?;

        let row: Option<IngredientRow> = diesel::update(ingredients::table.find(name.as_ref()))
            .set(ingredients::cost_per_unit.eq(Some(cost_per_unit.value())))
            .returning(IngredientRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| into_port_error(map_diesel_error(err), name.as_ref()))?;

        row.map(row_to_ingredient).transpose()
    }

    async fn mark_unavailable(
        &self,
        name: &IngredientName,
    ) -> Result<Option<Ingredient>, IngredientRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| into_port_error(map_pool_error(err), name.as_ref()))?;

        let row: Option<IngredientRow> = diesel::update(ingredients::table.find(name.as_ref()))
            .set(ingredients::available.eq(false))
            .returning(IngredientRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| into_port_error(map_diesel_error(err), name.as_ref()))?;

        row.map(row_to_ingredient).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion coverage; query behaviour is exercised by the
    //! database-backed integration suite.
    use super::*;
    use rstest::rstest;

    fn row(category: &str, unit: &str, cost: Option<f64>) -> IngredientRow {
        IngredientRow {
            name: "Tomato".to_owned(),
            category: category.to_owned(),
            unit: unit.to_owned(),
            cost_per_unit: cost,
            available: false,
        }
    }

    #[rstest]
    fn rows_round_trip_through_the_domain() {
        let ingredient = row_to_ingredient(row("fresh", "kg", Some(59.99))).expect("valid row");

        assert_eq!(ingredient.category(), Category::Fresh);
        assert_eq!(ingredient.unit(), Unit::Kilogram);
        assert_eq!(ingredient.cost_per_unit(), Some(59.99));
        assert!(!ingredient.is_available());

        let stored = to_row(&ingredient);
        assert_eq!(stored.category, "fresh");
        assert_eq!(stored.unit, "kg");
    }

    #[rstest]
    #[case(row("spices", "kg", None))]
    #[case(row("fresh", "tonne", None))]
    #[case(row("fresh", "kg", Some(f64::NAN)))]
    fn corrupt_rows_are_query_errors(#[case] stored: IngredientRow) {
        let err = row_to_ingredient(stored).expect_err("invalid row");
        assert!(matches!(err, IngredientRepositoryError::Query { .. }));
    }

    #[rstest]
    fn unique_violation_names_the_ingredient() {
        let err = into_port_error(StoreFailure::UniqueViolation, "Tomato");
        assert_eq!(err, IngredientRepositoryError::duplicate("Tomato"));
    }
}
