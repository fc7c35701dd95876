//! Shopping list API handlers.
//!
//! ```text
//! POST /shopping/                  {"title":"Weekly shop"}
//! GET  /shopping/{title}/
//! POST /shopping/{title}/items/    {"ingredient":"Tomato","quantity":1}
//! ```
//!
//! Every endpoint requires a session; lists are visible and writable only
//! by their owner.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::AddItemRequest;
use crate::domain::{
    Error, IngredientName, Quantity, ShoppingListItem, ShoppingListSummary, ShoppingListTitle,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldErrorCode, FieldErrors, FieldName, FieldRejection, invalid_value, parse_number,
    parse_string,
};

const TITLE: FieldName = FieldName::new("title");
const INGREDIENT: FieldName = FieldName::new("ingredient");
const QUANTITY: FieldName = FieldName::new("quantity");

/// Request body for `POST /shopping/`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateShoppingListRequest {
    #[schema(value_type = String, example = "Weekly shop")]
    pub title: Option<Value>,
}

/// Request body for `POST /shopping/{title}/items/`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AddItemBody {
    /// Name of an existing, available ingredient.
    #[schema(value_type = String, example = "Tomato")]
    pub ingredient: Option<Value>,
    /// Positive number or numeric string.
    #[schema(value_type = f64, example = 1)]
    pub quantity: Option<Value>,
}

/// Owner, title, and current cost of a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShoppingListResponse {
    /// Owner's user id.
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub user: String,
    #[schema(example = "Weekly shop")]
    pub title: String,
    /// Sum of quantity × unit cost over available, priced ingredients,
    /// rounded to cents.
    #[schema(example = 69.99)]
    pub total_cost: f64,
}

impl From<ShoppingListSummary> for ShoppingListResponse {
    fn from(value: ShoppingListSummary) -> Self {
        Self {
            user: value.owner.to_string(),
            title: value.title.to_string(),
            total_cost: value.total_cost,
        }
    }
}

/// A stored list item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShoppingListItemResponse {
    pub id: Uuid,
    /// Title of the list the item belongs to.
    #[schema(example = "Weekly shop")]
    pub shopping_list: String,
    #[schema(example = "Tomato")]
    pub ingredient: Option<String>,
    #[schema(example = 1)]
    pub quantity: f64,
}

impl ShoppingListItemResponse {
    fn new(item: &ShoppingListItem, title: &ShoppingListTitle) -> Self {
        Self {
            id: item.id(),
            shopping_list: title.to_string(),
            ingredient: item.ingredient().map(ToString::to_string),
            quantity: item.quantity().value(),
        }
    }
}

fn parse_title(value: &Value) -> Result<ShoppingListTitle, FieldRejection> {
    let raw = parse_string(value, TITLE)?;
    ShoppingListTitle::new(raw)
        .map_err(|err| invalid_value(TITLE, FieldErrorCode::InvalidValue, err.to_string(), value))
}

fn parse_ingredient(value: &Value) -> Result<IngredientName, FieldRejection> {
    let raw = parse_string(value, INGREDIENT)?;
    IngredientName::new(raw).map_err(|err| {
        invalid_value(INGREDIENT, FieldErrorCode::InvalidValue, err.to_string(), value)
    })
}

fn parse_quantity(value: &Value) -> Result<Quantity, FieldRejection> {
    let number = parse_number(value, QUANTITY)?;
    Quantity::new(number).map_err(|err| {
        invalid_value(QUANTITY, FieldErrorCode::InvalidNumber, err.to_string(), value)
    })
}

fn check_required<T>(
    errors: &mut FieldErrors,
    field: FieldName,
    value: Option<&Value>,
    parse: fn(&Value) -> Result<T, FieldRejection>,
) -> Option<T> {
    match value {
        Some(value) => errors.check(parse(value)),
        None => {
            errors.missing(field);
            None
        }
    }
}

/// A path title that fails validation cannot name a stored list.
fn path_title(raw: &str) -> Result<ShoppingListTitle, Error> {
    ShoppingListTitle::new(raw)
        .map_err(|_| Error::not_found(format!("shopping list {raw} not found")))
}

/// Create an empty list owned by the signed-in user.
#[utoipa::path(
    post,
    path = "/shopping/",
    request_body = CreateShoppingListRequest,
    responses(
        (status = 201, description = "List created", body = ShoppingListResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Title already taken", body = ErrorSchema)
    ),
    tags = ["shopping"],
    operation_id = "createShoppingList"
)]
#[post("/shopping/")]
pub async fn create_shopping_list(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateShoppingListRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let mut errors = FieldErrors::new();
    let title = check_required(&mut errors, TITLE, payload.title.as_ref(), parse_title);
    errors.finish()?;
    let title = title.ok_or_else(|| Error::internal("validated title was missing"))?;

    let summary = state
        .shopping_lists
        .create_shopping_list(&owner, title)
        .await?;
    Ok(HttpResponse::Created().json(ShoppingListResponse::from(summary)))
}

/// Read a list with its total cost.
///
/// Lists owned by another user answer `403` rather than `404`.
#[utoipa::path(
    get,
    path = "/shopping/{title}/",
    params(("title" = String, Path, description = "List title")),
    responses(
        (status = 200, description = "List summary", body = ShoppingListResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Owned by another user", body = ErrorSchema),
        (status = 404, description = "Unknown list", body = ErrorSchema)
    ),
    tags = ["shopping"],
    operation_id = "getShoppingList"
)]
#[get("/shopping/{title}/")]
pub async fn get_shopping_list(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ShoppingListResponse>> {
    let requester = session.require_user_id()?;
    let title = path_title(&path)?;
    let summary = state
        .shopping_lists_query
        .get_shopping_list(&title, &requester)
        .await?;
    Ok(web::Json(summary.into()))
}

/// Attach an ingredient to a list owned by the signed-in user.
#[utoipa::path(
    post,
    path = "/shopping/{title}/items/",
    params(("title" = String, Path, description = "List title")),
    request_body = AddItemBody,
    responses(
        (status = 201, description = "Item added", body = ShoppingListItemResponse),
        (status = 400, description = "Invalid request or unavailable ingredient", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Owned by another user", body = ErrorSchema),
        (status = 404, description = "Unknown list or ingredient", body = ErrorSchema)
    ),
    tags = ["shopping"],
    operation_id = "addShoppingListItem"
)]
#[post("/shopping/{title}/items/")]
pub async fn add_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<AddItemBody>,
) -> ApiResult<HttpResponse> {
    let requester = session.require_user_id()?;
    let mut errors = FieldErrors::new();
    let ingredient = check_required(
        &mut errors,
        INGREDIENT,
        payload.ingredient.as_ref(),
        parse_ingredient,
    );
    let quantity = check_required(&mut errors, QUANTITY, payload.quantity.as_ref(), parse_quantity);
    errors.finish()?;
    let (Some(ingredient), Some(quantity)) = (ingredient, quantity) else {
        return Err(Error::internal("validated item fields were missing"));
    };

    let title = path_title(&path)?;
    let item = state
        .shopping_lists
        .add_item(AddItemRequest {
            requester,
            title: title.clone(),
            ingredient,
            quantity,
        })
        .await?;
    Ok(HttpResponse::Created().json(ShoppingListItemResponse::new(&item, &title)))
}

#[cfg(test)]
#[path = "shopping_tests.rs"]
mod tests;
