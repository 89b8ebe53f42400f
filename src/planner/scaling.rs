use crate::models::recipe::NUTRIENT_CALORIES;
use crate::models::{Ingredient, MealPlanEntry, Recipe};

/// Ratio projecting quantities from a base serving count onto a target.
///
/// A base of zero is treated as 1 to guard the division; the target is never
/// clamped here, callers clamp it to >= 1 before invoking the scaler.
pub fn serving_ratio(base_servings: u32, target_servings: u32) -> f64 {
    f64::from(target_servings) / f64::from(base_servings.max(1))
}

/// Project a quantity from `base_servings` onto `target_servings`.
pub fn scale(quantity: f64, base_servings: u32, target_servings: u32) -> f64 {
    quantity * serving_ratio(base_servings, target_servings)
}

/// Macro-nutrient figures scaled to a target serving count.
///
/// Values keep full precision; truncation to integers happens only at the
/// display layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScaledNutrition {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

/// Recompute a recipe's macro figures for a target serving count.
///
/// The calorie base falls back to the recipe's derived accessor when no
/// explicit "Calories" nutrient entry exists.
pub fn scale_nutrients(recipe: &Recipe, target_servings: u32) -> ScaledNutrition {
    let base = recipe.effective_servings();
    let base_calories = recipe
        .nutrition
        .as_ref()
        .and_then(|n| n.nutrients.iter().find(|nu| nu.name == NUTRIENT_CALORIES))
        .map(|nu| nu.amount)
        .unwrap_or_else(|| recipe.calories());

    ScaledNutrition {
        calories: scale(base_calories, base, target_servings),
        protein: scale(recipe.protein(), base, target_servings),
        fat: scale(recipe.fat(), base, target_servings),
        carbs: scale(recipe.carbs(), base, target_servings),
    }
}

/// Scale every ingredient amount from `base_servings` onto `target_servings`.
///
/// Ingredients without an amount pass through unscaled; their free-text
/// description is their only representation.
pub fn scale_ingredients(
    ingredients: &[Ingredient],
    base_servings: u32,
    target_servings: u32,
) -> Vec<Ingredient> {
    ingredients
        .iter()
        .map(|ing| {
            let mut scaled = ing.clone();
            if let Some(amount) = ing.amount {
                scaled.amount = Some(scale(amount, base_servings, target_servings));
            }
            scaled
        })
        .collect()
}

/// Read-time scaling of a planned entry's ingredient snapshot.
///
/// The base is the entry's stored `original_servings`, never the live
/// recipe's default, so re-opened entries are not scaled twice. Entries
/// without a snapshot yield an empty list.
pub fn scale_entry_ingredients(entry: &MealPlanEntry) -> Vec<Ingredient> {
    match entry.ingredients.as_deref() {
        Some(snapshot) => scale_ingredients(snapshot, entry.original_servings, entry.servings),
        None => Vec::new(),
    }
}
