//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversion into domain types happens in the
//! repositories so that stored values are revalidated on the way out.

use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{ingredients, shopping_list_items, shopping_lists, users};

/// Row struct for reading login accounts.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub password_digest: String,
}

/// Insertable struct for creating login accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_digest: &'a str,
}

// ---------------------------------------------------------------------------
// Ingredient models
// ---------------------------------------------------------------------------

/// Row struct for reading and inserting ingredients.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IngredientRow {
    pub name: String,
    pub category: String,
    pub unit: String,
    pub cost_per_unit: Option<f64>,
    pub available: bool,
}

// ---------------------------------------------------------------------------
// Shopping list models
// ---------------------------------------------------------------------------

/// Row struct for reading shopping lists.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = shopping_lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ShoppingListRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
}

/// Insertable struct for creating shopping lists.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = shopping_lists)]
pub(crate) struct NewShoppingListRow<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: &'a str,
}

/// Row struct for reading and inserting list items.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = shopping_list_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ShoppingListItemRow {
    pub id: Uuid,
    pub shopping_list_id: Uuid,
    pub ingredient_name: Option<String>,
    pub quantity: f64,
}
