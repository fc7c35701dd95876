//! Tests for the ingredient service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockIngredientRepository;
use crate::domain::{Category, ErrorCode, Unit};

#[fixture]
fn tomato() -> Ingredient {
    Ingredient::new(
        IngredientName::new("Tomato").expect("valid name"),
        Category::Fresh,
        Unit::Kilogram,
        Some(CostPerUnit::new(59.99).expect("finite cost")),
    )
}

#[rstest]
#[tokio::test]
async fn create_returns_the_stored_ingredient(tomato: Ingredient) {
    let mut repo = MockIngredientRepository::new();
    repo.expect_insert()
        .with(eq(tomato.clone()))
        .times(1)
        .return_once(|_| Ok(()));

    let service = IngredientService::new(Arc::new(repo));
    let created = service
        .create_ingredient(tomato.clone())
        .await
        .expect("create succeeds");

    assert_eq!(created, tomato);
}

#[rstest]
#[tokio::test]
async fn create_maps_duplicate_to_conflict(tomato: Ingredient) {
    let mut repo = MockIngredientRepository::new();
    repo.expect_insert()
        .times(1)
        .return_once(|_| Err(IngredientRepositoryError::duplicate("Tomato")));

    let service = IngredientService::new(Arc::new(repo));
    let error = service
        .create_ingredient(tomato)
        .await
        .expect_err("duplicate name");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn update_cost_returns_full_record(tomato: Ingredient) {
    let price = CostPerUnit::new(60.0).expect("finite cost");
    let updated = tomato.clone().with_cost_per_unit(price);
    let mut repo = MockIngredientRepository::new();
    repo.expect_update_cost_per_unit()
        .withf(move |name, cost| name.as_ref() == "Tomato" && *cost == price)
        .times(1)
        .return_once(move |_, _| Ok(Some(updated)));

    let service = IngredientService::new(Arc::new(repo));
    let result = service
        .update_cost_per_unit(tomato.name(), price)
        .await
        .expect("update succeeds");

    assert_eq!(result.cost_per_unit(), Some(60.0));
    assert_eq!(result.category(), tomato.category());
    assert!(result.is_available());
}

#[rstest]
#[tokio::test]
async fn update_cost_for_unknown_name_is_not_found() {
    let mut repo = MockIngredientRepository::new();
    repo.expect_update_cost_per_unit()
        .times(1)
        .return_once(|_, _| Ok(None));

    let service = IngredientService::new(Arc::new(repo));
    let error = service
        .update_cost_per_unit(
            &IngredientName::new("Nope").expect("valid name"),
            CostPerUnit::new(1.0).expect("finite cost"),
        )
        .await
        .expect_err("unknown ingredient");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn flag_unavailable_returns_full_record(tomato: Ingredient) {
    let flagged = tomato.clone().mark_unavailable();
    let mut repo = MockIngredientRepository::new();
    repo.expect_mark_unavailable()
        .times(1)
        .return_once(move |_| Ok(Some(flagged)));

    let service = IngredientService::new(Arc::new(repo));
    let result = service
        .flag_unavailable(tomato.name())
        .await
        .expect("flag succeeds");

    assert!(!result.is_available());
    assert_eq!(result.cost_per_unit(), tomato.cost_per_unit());
}

#[rstest]
#[case(IngredientRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(IngredientRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn get_maps_repository_failures(
    #[case] failure: IngredientRepositoryError,
    #[case] expected: ErrorCode,
    tomato: Ingredient,
) {
    let mut repo = MockIngredientRepository::new();
    repo.expect_find_by_name()
        .times(1)
        .return_once(move |_| Err(failure));

    let service = IngredientService::new(Arc::new(repo));
    let error = service
        .get_ingredient(tomato.name())
        .await
        .expect_err("repository failure");

    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn get_for_unknown_name_is_not_found() {
    let mut repo = MockIngredientRepository::new();
    repo.expect_find_by_name().times(1).return_once(|_| Ok(None));

    let service = IngredientService::new(Arc::new(repo));
    let error = service
        .get_ingredient(&IngredientName::new("Nope").expect("valid name"))
        .await
        .expect_err("unknown ingredient");

    assert_eq!(error.code(), ErrorCode::NotFound);
}
