//! Fixture import against the in-memory stores.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use pantry::domain::ports::{FIXTURE_USER_ID, IngredientRepository, ShoppingListQuery};
use pantry::domain::{IngredientName, ShoppingListService, ShoppingListTitle, UserId};
use pantry::fixtures::{FixtureImportSettings, import_fixtures, import_fixtures_on_startup};
use pantry::outbound::memory::{InMemoryIngredientRepository, InMemoryShoppingListRepository};
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

struct Stores {
    ingredients: Arc<InMemoryIngredientRepository>,
    lists: Arc<InMemoryShoppingListRepository>,
}

#[fixture]
fn stores() -> Stores {
    let ingredients = Arc::new(InMemoryIngredientRepository::new());
    let lists = Arc::new(InMemoryShoppingListRepository::new(ingredients.clone()));
    Stores { ingredients, lists }
}

fn bundled() -> FixtureImportSettings {
    FixtureImportSettings {
        enabled: true,
        ingredients_path: None,
        shopping_lists_path: None,
        owner_id: None,
    }
}

fn write_fixture(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write fixture");
    file
}

async fn total(stores: &Stores, title: &str) -> f64 {
    let service = ShoppingListService::new(stores.lists.clone(), stores.ingredients.clone());
    let owner = UserId::new(FIXTURE_USER_ID).expect("fixture id");
    service
        .get_shopping_list(&ShoppingListTitle::new(title).expect("title"), &owner)
        .await
        .expect("list summary")
        .total_cost
}

#[rstest]
#[tokio::test]
async fn bundled_fixtures_import_once(stores: Stores) {
    let first = import_fixtures(&bundled(), stores.lists.clone(), stores.ingredients.clone())
        .await
        .expect("first import");
    assert_eq!(first.ingredients_created, 9);
    assert_eq!(first.lists_created, 2);
    assert_eq!(first.items_created, 8);
    assert_eq!(first.items_skipped, 0);

    let second = import_fixtures(&bundled(), stores.lists.clone(), stores.ingredients.clone())
        .await
        .expect("second import");
    assert_eq!(second.ingredients_created, 0);
    assert_eq!(second.ingredients_existing, 9);
    assert_eq!(second.lists_created, 0);
    assert_eq!(second.items_created, 0);
    assert_eq!(second.items_existing, 8);

    assert_eq!(total(&stores, "Weekly shop").await, 16.25);
    assert_eq!(total(&stores, "Dinner party").await, 27.9);
}

#[rstest]
#[tokio::test]
async fn unpriced_ingredients_import_without_cost(stores: Stores) {
    import_fixtures(&bundled(), stores.lists.clone(), stores.ingredients.clone())
        .await
        .expect("import");

    let salt = stores
        .ingredients
        .find_by_name(&IngredientName::new("Sea Salt").expect("name"))
        .await
        .expect("lookup")
        .expect("imported");
    assert_eq!(salt.cost_per_unit(), None);
    assert!(salt.is_available());
}

#[rstest]
#[tokio::test]
async fn invalid_rows_are_skipped_and_counted(stores: Stores) {
    let ingredients = write_fixture(
        r#"[
            {"Ingredient": "Tomato", "Excel Category": "Fresh", "Unit": "kg", "Cost Per Unit": 2},
            {"Ingredient": "Kale", "Excel Category": "Produce", "Unit": "kg", "Cost Per Unit": 3},
            {"Ingredient": "  ", "Excel Category": "Fresh", "Unit": "kg", "Cost Per Unit": 1}
        ]"#,
    );
    let lists = write_fixture(
        r#"[
            {"Shopping List": "Soup", "Ingredient": "Tomato", "Amount": 2},
            {"Shopping List": "Soup", "Ingredient": "Kale", "Amount": 1},
            {"Shopping List": "Soup", "Ingredient": "Tomato", "Amount": "none"}
        ]"#,
    );
    let settings = FixtureImportSettings {
        enabled: true,
        ingredients_path: Some(ingredients.path().to_path_buf()),
        shopping_lists_path: Some(lists.path().to_path_buf()),
        owner_id: None,
    };

    let summary = import_fixtures(&settings, stores.lists.clone(), stores.ingredients.clone())
        .await
        .expect("import");

    assert_eq!(summary.ingredients_created, 1);
    assert_eq!(summary.ingredients_skipped, 2);
    assert_eq!(summary.lists_created, 1);
    assert_eq!(summary.items_created, 1);
    assert_eq!(summary.items_skipped, 2);
    assert_eq!(total(&stores, "Soup").await, 4.0);
}

#[rstest]
#[tokio::test]
async fn disabled_startup_import_leaves_stores_empty(stores: Stores) {
    let settings = FixtureImportSettings {
        enabled: false,
        ..bundled()
    };

    let outcome =
        import_fixtures_on_startup(&settings, stores.lists.clone(), stores.ingredients.clone())
            .await
            .expect("skipped import");

    assert!(outcome.is_none());
    let tomato = IngredientName::new("Tomato").expect("name");
    assert!(
        stores
            .ingredients
            .find_by_name(&tomato)
            .await
            .expect("lookup")
            .is_none()
    );
}

#[rstest]
#[tokio::test]
async fn missing_fixture_files_are_reported(stores: Stores) {
    let settings = FixtureImportSettings {
        ingredients_path: Some(PathBuf::from("/nonexistent/ingredients.json")),
        ..bundled()
    };

    let err = import_fixtures(&settings, stores.lists, stores.ingredients)
        .await
        .expect_err("missing file");
    assert!(err.to_string().contains("/nonexistent/ingredients.json"));
}
