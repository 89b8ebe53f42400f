use assert_float_eq::*;
use chrono::NaiveDate;
use tempfile::NamedTempFile;

use smart_chef_rs::models::{MealSlot, Nutrient, Nutrition, Recipe, RecipeId};
use smart_chef_rs::state::{
    load_app_data, save_app_data, AppData, AppStateManager, UserRecipeDraft,
};

fn recipe(id: i64, servings: u32, calories: f64) -> Recipe {
    Recipe {
        id: RecipeId::from_raw(id),
        title: format!("Recipe {}", id),
        image: None,
        ready_in_minutes: Some(25),
        servings: Some(servings),
        nutrition: Some(Nutrition {
            nutrients: vec![Nutrient {
                name: "Calories".to_string(),
                amount: calories,
                unit: "kcal".to_string(),
            }],
        }),
        extended_ingredients: None,
        analyzed_instructions: None,
        summary: None,
    }
}

fn noon() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

#[test]
fn test_plan_then_edit_servings_scenario() {
    // Recipe with servings=2, calories=400; planned at 4 servings.
    let mut manager = AppStateManager::new(AppData::default());
    let r = recipe(1, 2, 400.0);

    let id = manager.add_meal_plan_entry(&r, noon(), MealSlot::Dinner, 4, 2);
    {
        let entry = manager.get_meal_plan_entry(id).unwrap();
        assert_eq!(entry.calories, 800.0);
        assert_eq!(entry.original_servings, 2);
        assert_eq!(entry.servings, 4);
    }

    // Edit back to 2: calories recompute to 400, not 800 halved twice.
    let base = manager.get_meal_plan_entry(id).unwrap().pre_scale_calories();
    manager.update_meal_plan_servings(id, 2, base).unwrap();
    let entry = manager.get_meal_plan_entry(id).unwrap();
    assert_eq!(entry.calories, 400.0);
    assert_eq!(entry.original_servings, 2);
}

#[test]
fn test_many_edits_do_not_drift_materially() {
    let mut manager = AppStateManager::new(AppData::default());
    let r = recipe(1, 3, 700.0);
    let id = manager.add_meal_plan_entry(&r, noon(), MealSlot::Lunch, 3, 3);

    for target in [7, 1, 9, 4, 2, 5, 3] {
        let base = manager.get_meal_plan_entry(id).unwrap().pre_scale_calories();
        manager.update_meal_plan_servings(id, target, base).unwrap();
    }

    // Back at the base count, the figure should be the base figure again.
    let entry = manager.get_meal_plan_entry(id).unwrap();
    assert_float_absolute_eq!(entry.calories, 700.0, 1e-6);
}

#[test]
fn test_persistence_roundtrip_preserves_plan() {
    let mut manager = AppStateManager::new(AppData::default());
    let r = recipe(1, 2, 400.0);
    manager.add_meal_plan_entry(&r, noon(), MealSlot::Breakfast, 4, 2);
    manager.save_favorite(r);
    manager.update_calorie_goal(1750);

    let file = NamedTempFile::new().unwrap();
    save_app_data(file.path(), manager.data()).unwrap();
    let reloaded = AppStateManager::new(load_app_data(file.path()).unwrap());

    assert_eq!(reloaded.data(), manager.data());
    assert_eq!(reloaded.profile().calorie_goal, 1750);
    assert!(reloaded.is_favorite(RecipeId::from_raw(1)));

    let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    let entries = reloaded.list_meal_plan_entries(date);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].calories, 800.0);
}

#[test]
fn test_entry_ids_stay_unique_across_reload() {
    let mut manager = AppStateManager::new(AppData::default());
    let r = recipe(1, 2, 400.0);
    let first = manager.add_meal_plan_entry(&r, noon(), MealSlot::Breakfast, 2, 2);

    let file = NamedTempFile::new().unwrap();
    save_app_data(file.path(), manager.data()).unwrap();

    let mut reloaded = AppStateManager::new(load_app_data(file.path()).unwrap());
    let second = reloaded.add_meal_plan_entry(&r, noon(), MealSlot::Lunch, 2, 2);

    assert_ne!(first, second);
}

#[test]
fn test_user_recipe_lifecycle() {
    let mut manager = AppStateManager::new(AppData::default());

    let id = manager
        .save_user_recipe(UserRecipeDraft {
            title: "Grandma's pie".to_string(),
            servings: Some(8),
            calories: 2400.0,
            steps: vec!["Mix.".to_string(), "Bake.".to_string()],
            ..UserRecipeDraft::default()
        })
        .id;
    assert!(id.is_local());

    let saved = manager.find_recipe(id).unwrap().clone();
    assert_eq!(saved.steps().len(), 2);
    manager.add_meal_plan_entry(&saved, noon(), MealSlot::Dinner, 8, 8);

    manager.delete_user_recipe(id).unwrap();
    assert!(manager.find_recipe(id).is_none());
    let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    assert!(manager.list_meal_plan_entries(date).is_empty());
}
