//! Ingredient API handlers.
//!
//! ```text
//! POST  /ingredient/                                {"name":"Tomato","category":"fresh","unit":"kg","cost_per_unit":59.99}
//! GET   /ingredient/{name}/
//! PATCH /ingredient/{name}/new_cost_per_unit/?price=60
//! PATCH /ingredient/{name}/flag_unavailable/
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Category, CostPerUnit, Error, Ingredient, IngredientName, Unit};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldErrorCode, FieldErrors, FieldName, FieldRejection, invalid_value, parse_number,
    parse_strict_bool, parse_string, present,
};

const NAME: FieldName = FieldName::new("name");
const CATEGORY: FieldName = FieldName::new("category");
const UNIT: FieldName = FieldName::new("unit");
const COST_PER_UNIT: FieldName = FieldName::new("cost_per_unit");
const AVAILABLE: FieldName = FieldName::new("available");
const PRICE: FieldName = FieldName::new("price");

/// Request body for `POST /ingredient/`.
///
/// Fields are read as raw JSON so that type mismatches are reported per
/// field alongside the other validation failures.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateIngredientRequest {
    #[schema(value_type = String, example = "Tomato")]
    pub name: Option<Value>,
    #[schema(value_type = String, example = "fresh")]
    pub category: Option<Value>,
    #[schema(value_type = String, example = "kg")]
    pub unit: Option<Value>,
    /// Number or numeric string.
    #[schema(value_type = f64, example = 59.99)]
    pub cost_per_unit: Option<Value>,
    /// Defaults to `true` when omitted; only JSON booleans are accepted.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<bool>, example = true)]
    pub available: Option<Value>,
}

/// Full ingredient record returned by every ingredient endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IngredientResponse {
    #[schema(example = "Tomato")]
    pub name: String,
    #[schema(example = "fresh")]
    pub category: String,
    #[schema(example = "kg")]
    pub unit: String,
    #[schema(example = 59.99)]
    pub cost_per_unit: Option<f64>,
    pub available: bool,
}

impl From<Ingredient> for IngredientResponse {
    fn from(value: Ingredient) -> Self {
        Self {
            name: value.name().to_string(),
            category: value.category().to_string(),
            unit: value.unit().to_string(),
            cost_per_unit: value.cost_per_unit(),
            available: value.is_available(),
        }
    }
}

/// Query string for the cost update endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct NewCostQuery {
    /// New price per unit; must be a finite number.
    #[param(value_type = f64, example = 60)]
    pub price: Option<String>,
}

fn parse_name(value: &Value) -> Result<IngredientName, FieldRejection> {
    let raw = parse_string(value, NAME)?;
    IngredientName::new(raw).map_err(|err| {
        invalid_value(NAME, FieldErrorCode::InvalidValue, err.to_string(), value)
    })
}

fn parse_category(value: &Value) -> Result<Category, FieldRejection> {
    let raw = parse_string(value, CATEGORY)?;
    raw.parse::<Category>().map_err(|_| {
        invalid_value(
            CATEGORY,
            FieldErrorCode::InvalidChoice,
            format!("\"{raw}\" is not a valid category"),
            value,
        )
    })
}

fn parse_unit(value: &Value) -> Result<Unit, FieldRejection> {
    let raw = parse_string(value, UNIT)?;
    raw.parse::<Unit>().map_err(|_| {
        invalid_value(
            UNIT,
            FieldErrorCode::InvalidChoice,
            format!("\"{raw}\" is not a valid unit"),
            value,
        )
    })
}

fn parse_cost(value: &Value, field: FieldName) -> Result<CostPerUnit, FieldRejection> {
    let number = parse_number(value, field)?;
    CostPerUnit::new(number).map_err(|err| {
        invalid_value(field, FieldErrorCode::InvalidNumber, err.to_string(), value)
    })
}

fn required<T>(
    errors: &mut FieldErrors,
    field: FieldName,
    value: Option<&Value>,
    parse: impl FnOnce(&Value) -> Result<T, FieldRejection>,
) -> Option<T> {
    match value {
        Some(value) => errors.check(parse(value)),
        None => {
            errors.missing(field);
            None
        }
    }
}

/// Validate every field of a create request, reporting all failures at once.
pub(crate) fn parse_create_request(body: &CreateIngredientRequest) -> Result<Ingredient, Error> {
    let mut errors = FieldErrors::new();
    let name = required(&mut errors, NAME, body.name.as_ref(), parse_name);
    let category = required(&mut errors, CATEGORY, body.category.as_ref(), parse_category);
    let unit = required(&mut errors, UNIT, body.unit.as_ref(), parse_unit);
    let cost = required(&mut errors, COST_PER_UNIT, body.cost_per_unit.as_ref(), |value| {
        parse_cost(value, COST_PER_UNIT)
    });
    let available = match body.available.as_ref() {
        Some(value) => errors.check(parse_strict_bool(value, AVAILABLE)),
        None => Some(true),
    };
    errors.finish()?;

    let (Some(name), Some(category), Some(unit), Some(cost), Some(available)) =
        (name, category, unit, cost, available)
    else {
        return Err(Error::internal("validated ingredient fields were missing"));
    };
    Ok(Ingredient::new(name, category, unit, Some(cost)).with_availability(available))
}

fn parse_price(raw: Option<String>) -> Result<CostPerUnit, Error> {
    let mut errors = FieldErrors::new();
    let price = required(&mut errors, PRICE, raw.map(Value::String).as_ref(), |value| {
        parse_cost(value, PRICE)
    });
    errors.finish()?;
    price.ok_or_else(|| Error::internal("validated price was missing"))
}

/// Names taken from the path always exist as text; an unusable name cannot
/// match any stored ingredient.
fn path_name(raw: &str) -> Result<IngredientName, Error> {
    IngredientName::new(raw).map_err(|_| Error::not_found(format!("ingredient {raw} not found")))
}

/// Create an ingredient.
#[utoipa::path(
    post,
    path = "/ingredient/",
    request_body = CreateIngredientRequest,
    responses(
        (status = 201, description = "Ingredient created", body = IngredientResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Name already taken", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "createIngredient",
    security([])
)]
#[post("/ingredient/")]
pub async fn create_ingredient(
    state: web::Data<HttpState>,
    payload: web::Json<CreateIngredientRequest>,
) -> ApiResult<HttpResponse> {
    let ingredient = parse_create_request(&payload)?;
    let created = state.ingredients.create_ingredient(ingredient).await?;
    Ok(HttpResponse::Created().json(IngredientResponse::from(created)))
}

/// Fetch an ingredient by name.
#[utoipa::path(
    get,
    path = "/ingredient/{name}/",
    params(("name" = String, Path, description = "Ingredient name")),
    responses(
        (status = 200, description = "Ingredient", body = IngredientResponse),
        (status = 404, description = "Unknown ingredient", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "getIngredient",
    security([])
)]
#[get("/ingredient/{name}/")]
pub async fn get_ingredient(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<IngredientResponse>> {
    let name = path_name(&path)?;
    let ingredient = state.ingredients_query.get_ingredient(&name).await?;
    Ok(web::Json(ingredient.into()))
}

/// Replace the unit price of an ingredient.
///
/// The price is validated before the lookup, so an invalid price on an
/// unknown ingredient reports `400`.
#[utoipa::path(
    patch,
    path = "/ingredient/{name}/new_cost_per_unit/",
    params(("name" = String, Path, description = "Ingredient name"), NewCostQuery),
    responses(
        (status = 200, description = "Updated ingredient", body = IngredientResponse),
        (status = 400, description = "Invalid price", body = ErrorSchema),
        (status = 404, description = "Unknown ingredient", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "updateIngredientCost",
    security([])
)]
#[patch("/ingredient/{name}/new_cost_per_unit/")]
pub async fn update_cost_per_unit(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<NewCostQuery>,
) -> ApiResult<web::Json<IngredientResponse>> {
    let price = parse_price(query.into_inner().price)?;
    let name = path_name(&path)?;
    let ingredient = state.ingredients.update_cost_per_unit(&name, price).await?;
    Ok(web::Json(ingredient.into()))
}

/// Mark an ingredient unavailable. Repeating the call is harmless.
#[utoipa::path(
    patch,
    path = "/ingredient/{name}/flag_unavailable/",
    params(("name" = String, Path, description = "Ingredient name")),
    responses(
        (status = 200, description = "Updated ingredient", body = IngredientResponse),
        (status = 404, description = "Unknown ingredient", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "flagIngredientUnavailable",
    security([])
)]
#[patch("/ingredient/{name}/flag_unavailable/")]
pub async fn flag_unavailable(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<IngredientResponse>> {
    let name = path_name(&path)?;
    let ingredient = state.ingredients.flag_unavailable(&name).await?;
    Ok(web::Json(ingredient.into()))
}

#[cfg(test)]
#[path = "ingredients_tests.rs"]
mod tests;
