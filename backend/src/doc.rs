//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (login,
//!   ingredients, shopping lists, health)
//! - **Schemas**: Request/response DTOs plus domain error wrappers that
//!   provide OpenAPI definitions without coupling domain types to utoipa
//! - **Security**: Session cookie authentication scheme
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::ingredients::{CreateIngredientRequest, IngredientResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::shopping::{
    AddItemBody, CreateShoppingListRequest, ShoppingListItemResponse, ShoppingListResponse,
};
use crate::inbound::http::users::LoginRequest;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login/.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Pantry API",
        description = "Ingredient inventory and owner-scoped shopping lists with derived totals.",
        license(name = "MIT", url = "https://opensource.org/license/mit")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::ingredients::create_ingredient,
        crate::inbound::http::ingredients::get_ingredient,
        crate::inbound::http::ingredients::update_cost_per_unit,
        crate::inbound::http::ingredients::flag_unavailable,
        crate::inbound::http::shopping::create_shopping_list,
        crate::inbound::http::shopping::get_shopping_list,
        crate::inbound::http::shopping::add_item,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        CreateIngredientRequest,
        IngredientResponse,
        CreateShoppingListRequest,
        AddItemBody,
        ShoppingListResponse,
        ShoppingListItemResponse
    )),
    tags(
        (name = "users", description = "Session login"),
        (name = "ingredients", description = "Ingredient inventory and pricing"),
        (name = "shopping", description = "Owner-scoped shopping lists"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
