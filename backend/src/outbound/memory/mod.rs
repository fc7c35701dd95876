//! In-memory repositories used when no database is configured and by
//! integration tests.
//!
//! Each store guards its state with a `Mutex`; every port call takes the lock
//! once, so individual operations are atomic.

mod ingredient_repository;
mod shopping_list_repository;

pub use ingredient_repository::InMemoryIngredientRepository;
pub use shopping_list_repository::InMemoryShoppingListRepository;

use std::sync::{Mutex, MutexGuard};

/// Lock a store, reporting poisoning through the caller's error type.
fn lock<'a, T, E>(
    mutex: &'a Mutex<T>,
    poisoned: impl FnOnce(String) -> E,
) -> Result<MutexGuard<'a, T>, E> {
    mutex
        .lock()
        .map_err(|err| poisoned(format!("store lock poisoned: {err}")))
}
