//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Login accounts. `password_digest` is a hex SHA-256 digest.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        password_digest -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ingredient catalogue keyed by unique name.
    ingredients (name) {
        name -> Varchar,
        /// Lower-case category identifier, e.g. `fresh`.
        category -> Varchar,
        /// Unit symbol, e.g. `kg`.
        unit -> Varchar,
        cost_per_unit -> Nullable<Float8>,
        available -> Bool,
    }
}

diesel::table! {
    /// Owned shopping lists; titles are globally unique.
    shopping_lists (id) {
        id -> Uuid,
        owner_id -> Uuid,
        title -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ingredient quantities on a list. Deleting an ingredient clears
    /// `ingredient_name` but keeps the row.
    shopping_list_items (id) {
        id -> Uuid,
        shopping_list_id -> Uuid,
        ingredient_name -> Nullable<Varchar>,
        quantity -> Float8,
    }
}

diesel::joinable!(shopping_list_items -> shopping_lists (shopping_list_id));
diesel::joinable!(shopping_list_items -> ingredients (ingredient_name));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    ingredients,
    shopping_lists,
    shopping_list_items,
);
