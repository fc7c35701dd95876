//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod ingredient_command;
mod ingredient_query;
mod ingredient_repository;
mod login_service;
mod shopping_list_command;
mod shopping_list_query;
mod shopping_list_repository;

pub use ingredient_command::IngredientCommand;
#[cfg(test)]
pub use ingredient_command::MockIngredientCommand;
pub use ingredient_query::IngredientQuery;
#[cfg(test)]
pub use ingredient_query::MockIngredientQuery;
#[cfg(test)]
pub use ingredient_repository::MockIngredientRepository;
pub use ingredient_repository::{IngredientRepository, IngredientRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FIXTURE_USER_ID, FixtureLoginService, LoginService};
#[cfg(test)]
pub use shopping_list_command::MockShoppingListCommand;
pub use shopping_list_command::{AddItemRequest, ShoppingListCommand};
#[cfg(test)]
pub use shopping_list_query::MockShoppingListQuery;
pub use shopping_list_query::ShoppingListQuery;
#[cfg(test)]
pub use shopping_list_repository::MockShoppingListRepository;
pub use shopping_list_repository::{ShoppingListRepository, ShoppingListRepositoryError};
