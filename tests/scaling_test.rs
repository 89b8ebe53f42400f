use assert_float_eq::*;
use chrono::NaiveDate;

use smart_chef_rs::models::{
    Ingredient, MealPlanEntry, MealSlot, Nutrient, Nutrition, Recipe, RecipeId,
};
use smart_chef_rs::planner::{scale, scale_entry_ingredients, scale_nutrients};

fn make_recipe(servings: u32, calories: f64) -> Recipe {
    Recipe {
        id: RecipeId::from_raw(1),
        title: "Test Dish".to_string(),
        image: None,
        ready_in_minutes: Some(30),
        servings: Some(servings),
        nutrition: Some(Nutrition {
            nutrients: vec![
                Nutrient {
                    name: "Calories".to_string(),
                    amount: calories,
                    unit: "kcal".to_string(),
                },
                Nutrient {
                    name: "Protein".to_string(),
                    amount: 18.0,
                    unit: "g".to_string(),
                },
                Nutrient {
                    name: "Fat".to_string(),
                    amount: 9.0,
                    unit: "g".to_string(),
                },
                Nutrient {
                    name: "Carbohydrates".to_string(),
                    amount: 45.0,
                    unit: "g".to_string(),
                },
            ],
        }),
        extended_ingredients: None,
        analyzed_instructions: None,
        summary: None,
    }
}

fn make_entry(servings: u32, original_servings: u32) -> MealPlanEntry {
    MealPlanEntry {
        id: 1,
        recipe_id: RecipeId::from_raw(1),
        title: "Test Dish".to_string(),
        image: None,
        ready_in_minutes: None,
        calories: 400.0,
        protein: 18.0,
        fat: 9.0,
        carbs: 45.0,
        date: NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
        slot: MealSlot::Lunch,
        servings,
        original_servings,
        ingredients: Some(vec![
            Ingredient {
                id: Some(1),
                name: Some("rice".to_string()),
                original: None,
                amount: Some(150.0),
                unit: Some("g".to_string()),
            },
            Ingredient {
                original: Some("a splash of soy sauce".to_string()),
                ..Ingredient::default()
            },
        ]),
        instructions: None,
    }
}

#[test]
fn test_scale_matches_contract_for_all_inputs() {
    for base in 1..=8u32 {
        for target in 1..=8u32 {
            for quantity in [0.0, 0.5, 100.0, 333.3] {
                let expected = quantity * f64::from(target) / f64::from(base);
                assert_float_absolute_eq!(scale(quantity, base, target), expected, 1e-9);
            }
        }
    }
}

#[test]
fn test_scale_is_linear_in_target() {
    let q = 275.0;
    let base = 3;
    let unit = scale(q, base, 1);
    for target in 1..=12u32 {
        assert_float_absolute_eq!(scale(q, base, target), unit * f64::from(target), 1e-9);
    }
}

#[test]
fn test_zero_base_never_divides_by_zero() {
    let scaled = scale(120.0, 0, 2);
    assert!(scaled.is_finite());
    assert_float_absolute_eq!(scaled, 240.0, 1e-9);
}

#[test]
fn test_nutrient_scaling_keeps_ratios() {
    let recipe = make_recipe(2, 400.0);
    let scaled = scale_nutrients(&recipe, 5);

    assert_float_absolute_eq!(scaled.calories, 1000.0, 1e-9);
    assert_float_absolute_eq!(scaled.protein, 45.0, 1e-9);
    assert_float_absolute_eq!(scaled.fat, 22.5, 1e-9);
    assert_float_absolute_eq!(scaled.carbs, 112.5, 1e-9);
}

#[test]
fn test_entry_scaling_is_idempotent() {
    // Read-time scaling always starts from the stored snapshot, so reading
    // twice with the same target must not compound the ratio.
    let entry = make_entry(4, 2);

    let once = scale_entry_ingredients(&entry);
    let twice = scale_entry_ingredients(&entry);

    assert_eq!(once, twice);
    assert_float_absolute_eq!(once[0].amount.unwrap(), 300.0, 1e-9);
}

#[test]
fn test_entry_scaling_passes_amountless_through() {
    let entry = make_entry(6, 2);
    let scaled = scale_entry_ingredients(&entry);

    assert_eq!(scaled[1].amount, None);
    assert_eq!(scaled[1].original.as_deref(), Some("a splash of soy sauce"));
}

#[test]
fn test_entry_without_snapshot_scales_to_nothing() {
    let mut entry = make_entry(4, 2);
    entry.ingredients = None;
    assert!(scale_entry_ingredients(&entry).is_empty());
}
