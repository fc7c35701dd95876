//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

use crate::domain::ports::{
    FixtureLoginService, IngredientCommand, IngredientQuery, LoginService,
    MockIngredientCommand, MockIngredientQuery, MockShoppingListCommand, MockShoppingListQuery,
    ShoppingListCommand, ShoppingListQuery,
};
use crate::inbound::http::state::HttpState;

pub(crate) const SESSION_COOKIE: &str = "session";

/// Session middleware with a throwaway key and an insecure cookie so plain
/// HTTP test requests carry it.
pub(crate) fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by a response.
pub(crate) fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Port doubles for handler tests.
///
/// Unconfigured mocks panic when called, so each test only sets expectations
/// on the ports its handler is meant to touch.
pub(crate) struct TestPorts {
    pub(crate) login: Arc<dyn LoginService>,
    pub(crate) ingredients: MockIngredientCommand,
    pub(crate) ingredients_query: MockIngredientQuery,
    pub(crate) shopping_lists: MockShoppingListCommand,
    pub(crate) shopping_lists_query: MockShoppingListQuery,
}

impl Default for TestPorts {
    fn default() -> Self {
        Self {
            login: Arc::new(FixtureLoginService),
            ingredients: MockIngredientCommand::new(),
            ingredients_query: MockIngredientQuery::new(),
            shopping_lists: MockShoppingListCommand::new(),
            shopping_lists_query: MockShoppingListQuery::new(),
        }
    }
}

impl TestPorts {
    pub(crate) fn into_state(self) -> HttpState {
        let ingredients: Arc<dyn IngredientCommand> = Arc::new(self.ingredients);
        let ingredients_query: Arc<dyn IngredientQuery> = Arc::new(self.ingredients_query);
        let shopping_lists: Arc<dyn ShoppingListCommand> = Arc::new(self.shopping_lists);
        let shopping_lists_query: Arc<dyn ShoppingListQuery> =
            Arc::new(self.shopping_lists_query);
        HttpState::new(
            self.login,
            ingredients,
            ingredients_query,
            shopping_lists,
            shopping_lists_query,
        )
    }
}
