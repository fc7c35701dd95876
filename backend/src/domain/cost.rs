//! Shopping list cost aggregation.
//!
//! Totals are computed from a snapshot of (item, ingredient) lines so the
//! arithmetic stays independent of how the lines were loaded.

use crate::domain::shopping::ShoppingListLine;

/// Sum `quantity * cost_per_unit` over every line whose ingredient is still
/// present, available, and priced, rounded to cents.
///
/// Lines that fail any of those conditions contribute nothing. A list with
/// no contributing lines totals `0.0`.
///
/// # Examples
/// ```
/// use pantry::domain::cost::total_cost;
/// use pantry::domain::{
///     Category, CostPerUnit, Ingredient, IngredientName, Quantity, ShoppingList,
///     ShoppingListItem, ShoppingListLine, ShoppingListTitle, Unit, UserId,
/// };
/// use uuid::Uuid;
///
/// let list = ShoppingList::new(
///     Uuid::new_v4(),
///     UserId::random(),
///     ShoppingListTitle::new("Weekly shop").unwrap(),
/// );
/// let rice = Ingredient::new(
///     IngredientName::new("Rice").unwrap(),
///     Category::Dry,
///     Unit::Kilogram,
///     Some(CostPerUnit::new(1.5).unwrap()),
/// );
/// let item =
///     ShoppingListItem::attach(Uuid::new_v4(), &list, &rice, Quantity::new(2.5).unwrap()).unwrap();
/// let lines = [ShoppingListLine { item, ingredient: Some(rice) }];
///
/// assert_eq!(total_cost(&lines), 3.75);
/// assert_eq!(total_cost(&[]), 0.0);
/// ```
pub fn total_cost(lines: &[ShoppingListLine]) -> f64 {
    let sum = lines.iter().filter_map(line_cost).fold(0.0, |acc, cost| acc + cost);
    round_to_cents(sum)
}

fn line_cost(line: &ShoppingListLine) -> Option<f64> {
    let ingredient = line.ingredient.as_ref()?;
    if !ingredient.is_available() {
        return None;
    }
    let cost_per_unit = ingredient.cost_per_unit()?;
    Some(line.item.quantity().value() * cost_per_unit)
}

/// Round half away from zero at two decimal places.
///
/// Halves that are exact in binary round away from zero, so `0.125` becomes
/// `0.13`, where round-half-to-even would give `0.12`.
///
/// # Examples
/// ```
/// use pantry::domain::cost::round_to_cents;
///
/// assert_eq!(round_to_cents(69.989_999), 69.99);
/// assert_eq!(round_to_cents(0.125), 0.13);
/// ```
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
