//! Regression coverage for shopping list primitives.

use rstest::{fixture, rstest};
use uuid::Uuid;

use super::*;
use crate::domain::{Category, CostPerUnit, Unit};

#[fixture]
fn owner() -> UserId {
    UserId::random()
}

#[fixture]
fn list(owner: UserId) -> ShoppingList {
    ShoppingList::new(
        Uuid::new_v4(),
        owner,
        ShoppingListTitle::new("Party").expect("valid title"),
    )
}

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
#[case("", ShoppingValidationError::EmptyTitle)]
#[case("   ", ShoppingValidationError::EmptyTitle)]
fn blank_titles_are_rejected(#[case] raw: &str, #[case] expected: ShoppingValidationError) {
    assert_eq!(ShoppingListTitle::new(raw), Err(expected));
}

#[rstest]
fn title_length_is_bounded_in_characters() {
    let at_limit = "é".repeat(TITLE_MAX_CHARS);
    assert!(ShoppingListTitle::new(at_limit).is_ok());

    let over = "a".repeat(TITLE_MAX_CHARS + 1);
    assert_eq!(
        ShoppingListTitle::new(over),
        Err(ShoppingValidationError::TitleTooLong {
            max: TITLE_MAX_CHARS
        })
    );
}

#[rstest]
#[case(0.0)]
#[case(-1.0)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn quantity_must_be_positive_and_finite(#[case] raw: f64) {
    assert_eq!(
        Quantity::new(raw),
        Err(ShoppingValidationError::InvalidQuantity)
    );
}

#[rstest]
fn ownership_is_checked_by_identity(list: ShoppingList) {
    let owner = list.owner().clone();
    assert!(list.is_owned_by(&owner));
    assert!(!list.is_owned_by(&UserId::random()));
}

#[rstest]
fn attach_links_item_to_list_and_ingredient(list: ShoppingList, tomato: Ingredient) {
    let quantity = Quantity::new(2.0).expect("valid quantity");
    let item = ShoppingListItem::attach(Uuid::new_v4(), &list, &tomato, quantity)
        .expect("available ingredient");

    assert_eq!(item.shopping_list_id(), list.id());
    assert_eq!(item.ingredient(), Some(tomato.name()));
    assert_eq!(item.quantity(), quantity);
}

#[rstest]
fn attach_refuses_unavailable_ingredient(list: ShoppingList, tomato: Ingredient) {
    let quantity = Quantity::new(1.0).expect("valid quantity");
    let error = ShoppingListItem::attach(Uuid::new_v4(), &list, &tomato.mark_unavailable(), quantity)
        .expect_err("unavailable ingredient");

    assert_eq!(error.to_string(), "Ingredient is unavailable");
    assert_eq!(error.ingredient.as_ref(), "Tomato");
}

#[rstest]
fn summary_reports_owner_title_and_total(list: ShoppingList, tomato: Ingredient) {
    let item = ShoppingListItem::attach(
        Uuid::new_v4(),
        &list,
        &tomato,
        Quantity::new(1.0).expect("valid quantity"),
    )
    .expect("available ingredient");
    let lines = vec![ShoppingListLine {
        item,
        ingredient: Some(tomato),
    }];

    let summary = ShoppingListSummary::from_lines(&list, &lines);

    assert_eq!(&summary.owner, list.owner());
    assert_eq!(&summary.title, list.title());
    assert_eq!(summary.total_cost, 59.99);
}
