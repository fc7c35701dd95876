//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the strongly typed ingredient and shopping list model and
//! the services that implement the driving ports. Nothing in this module
//! depends on HTTP or persistence adapters.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable error identifier.
//! - Ingredient and its value types (IngredientName, Category, Unit,
//!   CostPerUnit).
//! - ShoppingList, ShoppingListItem, ShoppingListSummary and their value
//!   types (ShoppingListTitle, Quantity).
//! - IngredientService, ShoppingListService, FixtureImporter.

pub mod auth;
pub mod cost;
pub mod error;
pub mod fixture_import;
pub mod ingredient;
pub mod ingredient_service;
pub mod ports;
pub mod shopping;
pub mod shopping_list_service;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::fixture_import::{
    FixtureImporter, ImportSummary, IngredientRecord, ShoppingListRecord,
};
pub use self::ingredient::{
    Category, CostPerUnit, Ingredient, IngredientName, IngredientValidationError,
    ParseCategoryError, ParseUnitError, Unit,
};
pub use self::ingredient_service::IngredientService;
pub use self::shopping::{
    IngredientUnavailable, Quantity, ShoppingList, ShoppingListItem, ShoppingListLine,
    ShoppingListSummary, ShoppingListTitle, ShoppingValidationError, TITLE_MAX_CHARS,
};
pub use self::shopping_list_service::ShoppingListService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use pantry::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
