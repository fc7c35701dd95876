//! Shared helpers for integration suites.

#![allow(
    dead_code,
    reason = "each integration crate uses a different subset of helpers"
)]

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use pantry::domain::ports::{IngredientRepository, LoginService, ShoppingListRepository};
use pantry::domain::{IngredientService, ShoppingListService};
use pantry::inbound::http::state::HttpState;

/// Returns true when the `SKIP_TEST_CLUSTER` environment variable is set to a
/// truthy value.
///
/// Truthy values: "1", "true", "yes" (case-insensitive).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Database URL for Diesel suites, or `None` when they should be skipped.
///
/// Suites skip silently without `DATABASE_URL`.
pub fn database_url() -> Option<String> {
    match std::env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => Some(url),
        _ => {
            eprintln!("SKIP-TEST-CLUSTER: DATABASE_URL is not set");
            None
        }
    }
}

/// Handles database setup failures consistently across integration tests.
///
/// When `SKIP_TEST_CLUSTER` is truthy, prints a skip marker and returns `None`.
/// Otherwise, panics with a clear failure message so CI breakage is not masked.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test database setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Session middleware accepting plain HTTP test requests.
pub fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Real domain services over the given repositories.
pub fn http_state<S, I>(
    login: Arc<dyn LoginService>,
    shopping_list_repo: Arc<S>,
    ingredient_repo: Arc<I>,
) -> HttpState
where
    S: ShoppingListRepository + 'static,
    I: IngredientRepository + 'static,
{
    let ingredients = Arc::new(IngredientService::new(ingredient_repo.clone()));
    let shopping_lists = Arc::new(ShoppingListService::new(shopping_list_repo, ingredient_repo));
    HttpState::new(
        login,
        ingredients.clone(),
        ingredients,
        shopping_lists.clone(),
        shopping_lists,
    )
}
