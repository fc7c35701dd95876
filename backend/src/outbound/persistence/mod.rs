//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories are thin translators between Diesel rows (`models.rs`,
//! `schema.rs`, both private) and domain types. Connections come from a
//! `bb8` pool through `diesel-async`; migrations are embedded and applied via
//! [`run_migrations`].
//!
//! # Example
//!
//! ```no_run
//! use pantry::outbound::persistence::{DbPool, DieselIngredientRepository, PoolConfig};
//!
//! # async fn demo() -> Result<(), pantry::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/pantry")).await?;
//! let repo = DieselIngredientRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_ingredient_repository;
mod diesel_login_service;
mod diesel_shopping_list_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_ingredient_repository::DieselIngredientRepository;
pub use diesel_login_service::DieselLoginService;
pub use diesel_shopping_list_repository::DieselShoppingListRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
