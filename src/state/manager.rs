use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChefError, Result};
use crate::models::{
    Ingredient, InstructionSection, InstructionStep, MealPlanEntry, MealSlot, Nutrient, Nutrition,
    Recipe, RecipeId, UserProfile,
};
use crate::planner::scaling;

fn first_entry_id() -> u64 {
    1
}

/// The persisted application document: profile, favorites, meal plan and
/// user-authored recipes, with real nested ingredient/instruction lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppData {
    #[serde(default)]
    pub profile: UserProfile,

    #[serde(default)]
    pub favorites: Vec<Recipe>,

    #[serde(default)]
    pub meal_plan: Vec<MealPlanEntry>,

    #[serde(default)]
    pub user_recipes: Vec<Recipe>,

    #[serde(default = "first_entry_id")]
    pub next_entry_id: u64,
}

impl Default for AppData {
    fn default() -> Self {
        Self {
            profile: UserProfile::default(),
            favorites: Vec::new(),
            meal_plan: Vec::new(),
            user_recipes: Vec::new(),
            next_entry_id: first_entry_id(),
        }
    }
}

/// Fields of a user-authored recipe before an id is assigned.
#[derive(Debug, Clone, Default)]
pub struct UserRecipeDraft {
    pub title: String,
    pub image: Option<String>,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
}

/// Manages profile, favorites, meal plan and user recipes over the in-memory
/// document. Callers persist the document explicitly after mutations.
pub struct AppStateManager {
    data: AppData,
}

impl AppStateManager {
    pub fn new(data: AppData) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &AppData {
        &self.data
    }

    // --- Profile ---

    /// The profile always exists in the document; a fresh document carries
    /// the defaults (goal 2000, zero cooked, no dislikes).
    pub fn profile(&self) -> &UserProfile {
        &self.data.profile
    }

    pub fn update_calorie_goal(&mut self, goal: u32) {
        self.data.profile.calorie_goal = goal;
    }

    pub fn increment_cooked_count(&mut self) -> u32 {
        self.data.profile.cooked_count += 1;
        self.data.profile.cooked_count
    }

    pub fn toggle_dislike(&mut self, name: &str) -> Result<()> {
        self.data.profile.toggle_dislike(name)
    }

    pub fn dislikes(&self) -> Vec<String> {
        self.data.profile.dislikes()
    }

    // --- Favorites ---

    /// Save a snapshot of the recipe. Saving an already-favorited id replaces
    /// the stored snapshot.
    pub fn save_favorite(&mut self, recipe: Recipe) {
        self.delete_favorite(recipe.id);
        self.data.favorites.push(recipe);
    }

    pub fn delete_favorite(&mut self, id: RecipeId) {
        self.data.favorites.retain(|r| r.id != id);
    }

    pub fn is_favorite(&self, id: RecipeId) -> bool {
        self.data.favorites.iter().any(|r| r.id == id)
    }

    pub fn list_favorites(&self) -> &[Recipe] {
        &self.data.favorites
    }

    // --- Meal plan ---

    /// Create a planned entry from a recipe snapshot.
    ///
    /// `base_servings` is the recipe's serving count at the time of the add
    /// action; the stored calorie figure is scaled from it onto
    /// `target_servings`. Macro figures and the ingredient/instruction
    /// snapshots stay at base scale and are rescaled at read time.
    pub fn add_meal_plan_entry(
        &mut self,
        recipe: &Recipe,
        date: NaiveDateTime,
        slot: MealSlot,
        target_servings: u32,
        base_servings: u32,
    ) -> u64 {
        let id = self.data.next_entry_id;
        self.data.next_entry_id += 1;

        let entry = MealPlanEntry {
            id,
            recipe_id: recipe.id,
            title: recipe.title.clone(),
            image: recipe.image.clone(),
            ready_in_minutes: recipe.ready_in_minutes,
            calories: scaling::scale(recipe.calories(), base_servings, target_servings),
            protein: recipe.protein(),
            fat: recipe.fat(),
            carbs: recipe.carbs(),
            date,
            slot,
            servings: target_servings,
            original_servings: base_servings,
            ingredients: recipe.extended_ingredients.clone(),
            instructions: recipe.analyzed_instructions.clone(),
        };
        self.data.meal_plan.push(entry);
        id
    }

    /// Change an entry's target serving count.
    ///
    /// `pre_scale_base_calories` is the entry's calorie figure before any
    /// scaling, reconstructed by the caller via
    /// [`MealPlanEntry::pre_scale_calories`]. The base serving count and the
    /// stored snapshots are never touched by this transition.
    pub fn update_meal_plan_servings(
        &mut self,
        entry_id: u64,
        new_servings: u32,
        pre_scale_base_calories: f64,
    ) -> Result<()> {
        let entry = self
            .data
            .meal_plan
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or_else(|| ChefError::NotFound(format!("meal plan entry {}", entry_id)))?;

        entry.servings = new_servings;
        entry.calories = scaling::scale(
            pre_scale_base_calories,
            entry.original_servings,
            new_servings,
        );
        Ok(())
    }

    pub fn delete_meal_plan_entry(&mut self, entry_id: u64) -> Result<()> {
        let before = self.data.meal_plan.len();
        self.data.meal_plan.retain(|e| e.id != entry_id);
        if self.data.meal_plan.len() == before {
            return Err(ChefError::NotFound(format!("meal plan entry {}", entry_id)));
        }
        Ok(())
    }

    pub fn get_meal_plan_entry(&self, entry_id: u64) -> Option<&MealPlanEntry> {
        self.data.meal_plan.iter().find(|e| e.id == entry_id)
    }

    /// Entries planned for the given date, ordered by slot.
    ///
    /// The query window is start of day inclusive to start of the next day
    /// exclusive.
    pub fn list_meal_plan_entries(&self, date: NaiveDate) -> Vec<&MealPlanEntry> {
        let start = date.and_time(NaiveTime::MIN);
        let end = date
            .checked_add_days(Days::new(1))
            .map(|next| next.and_time(NaiveTime::MIN));

        let mut entries: Vec<&MealPlanEntry> = self
            .data
            .meal_plan
            .iter()
            .filter(|e| e.date >= start && end.map(|end| e.date < end).unwrap_or(true))
            .collect();
        entries.sort_by_key(|e| (e.slot, e.id));
        entries
    }

    /// Calories consumed on a date: the per-serving portion of every planned
    /// meal, summed.
    pub fn consumed_calories(&self, date: NaiveDate) -> f64 {
        self.list_meal_plan_entries(date)
            .iter()
            .map(|e| e.calories_per_serving())
            .sum()
    }

    // --- User recipes ---

    /// Persist a user-authored recipe under a fresh negative, time-derived
    /// id.
    pub fn save_user_recipe(&mut self, draft: UserRecipeDraft) -> Recipe {
        let mut raw = -Utc::now().timestamp_millis();
        while self.find_recipe(RecipeId::from_raw(raw)).is_some() {
            raw -= 1;
        }

        let steps = draft
            .steps
            .into_iter()
            .enumerate()
            .map(|(i, step)| InstructionStep {
                number: i as u32 + 1,
                step,
            })
            .collect::<Vec<_>>();

        let recipe = Recipe {
            id: RecipeId::from_raw(raw),
            title: draft.title,
            image: draft.image,
            ready_in_minutes: draft.ready_in_minutes,
            servings: draft.servings,
            nutrition: Some(Nutrition {
                nutrients: vec![
                    Nutrient {
                        name: "Calories".to_string(),
                        amount: draft.calories,
                        unit: "kcal".to_string(),
                    },
                    Nutrient {
                        name: "Protein".to_string(),
                        amount: draft.protein,
                        unit: "g".to_string(),
                    },
                    Nutrient {
                        name: "Fat".to_string(),
                        amount: draft.fat,
                        unit: "g".to_string(),
                    },
                    Nutrient {
                        name: "Carbohydrates".to_string(),
                        amount: draft.carbs,
                        unit: "g".to_string(),
                    },
                ],
            }),
            extended_ingredients: Some(draft.ingredients),
            analyzed_instructions: if steps.is_empty() {
                None
            } else {
                Some(vec![InstructionSection {
                    name: String::new(),
                    steps,
                }])
            },
            summary: None,
        };

        self.data.user_recipes.push(recipe.clone());
        recipe
    }

    /// Delete a user-authored recipe and cascade its planned meals.
    /// Favorites are untouched; a favorited snapshot stands on its own.
    pub fn delete_user_recipe(&mut self, id: RecipeId) -> Result<()> {
        if !id.is_local() {
            return Err(ChefError::InvalidReference(format!(
                "{} is not a user-authored recipe",
                id
            )));
        }
        let before = self.data.user_recipes.len();
        self.data.user_recipes.retain(|r| r.id != id);
        if self.data.user_recipes.len() == before {
            return Err(ChefError::NotFound(format!("user recipe {}", id)));
        }
        self.data.meal_plan.retain(|e| e.recipe_id != id);
        Ok(())
    }

    pub fn list_user_recipes(&self) -> &[Recipe] {
        &self.data.user_recipes
    }

    /// Look up a recipe snapshot by id across user recipes and favorites.
    pub fn find_recipe(&self, id: RecipeId) -> Option<&Recipe> {
        self.data
            .user_recipes
            .iter()
            .chain(self.data.favorites.iter())
            .find(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_recipe(id: i64, servings: u32, calories: f64) -> Recipe {
        Recipe {
            id: RecipeId::from_raw(id),
            title: format!("Recipe {}", id),
            image: None,
            ready_in_minutes: Some(20),
            servings: Some(servings),
            nutrition: Some(Nutrition {
                nutrients: vec![Nutrient {
                    name: "Calories".to_string(),
                    amount: calories,
                    unit: "kcal".to_string(),
                }],
            }),
            extended_ingredients: Some(vec![Ingredient {
                id: Some(1),
                name: Some("flour".to_string()),
                original: None,
                amount: Some(100.0),
                unit: Some("g".to_string()),
            }]),
            analyzed_instructions: None,
            summary: None,
        }
    }

    fn noon(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_favorite_roundtrip() {
        let mut manager = AppStateManager::new(AppData::default());
        let recipe = sample_recipe(5, 2, 300.0);

        assert!(!manager.is_favorite(recipe.id));
        manager.save_favorite(recipe.clone());
        assert!(manager.is_favorite(recipe.id));
        assert_eq!(manager.list_favorites().len(), 1);

        // Saving again replaces, not duplicates.
        manager.save_favorite(recipe.clone());
        assert_eq!(manager.list_favorites().len(), 1);

        manager.delete_favorite(recipe.id);
        assert!(!manager.is_favorite(recipe.id));
    }

    #[test]
    fn test_add_entry_scales_calories() {
        let mut manager = AppStateManager::new(AppData::default());
        let recipe = sample_recipe(1, 2, 400.0);

        let id = manager.add_meal_plan_entry(&recipe, noon(1), MealSlot::Dinner, 4, 2);
        let entry = manager.get_meal_plan_entry(id).unwrap();

        assert_eq!(entry.calories, 800.0);
        assert_eq!(entry.servings, 4);
        assert_eq!(entry.original_servings, 2);
    }

    #[test]
    fn test_edit_servings_does_not_compound() {
        let mut manager = AppStateManager::new(AppData::default());
        let recipe = sample_recipe(1, 2, 400.0);
        let id = manager.add_meal_plan_entry(&recipe, noon(1), MealSlot::Dinner, 4, 2);

        // Back down to the base count: calories return to the base figure.
        let base = manager.get_meal_plan_entry(id).unwrap().pre_scale_calories();
        manager.update_meal_plan_servings(id, 2, base).unwrap();
        let entry = manager.get_meal_plan_entry(id).unwrap();
        assert_eq!(entry.calories, 400.0);
        assert_eq!(entry.original_servings, 2);

        // A second identical edit changes nothing.
        let base = entry.pre_scale_calories();
        manager.update_meal_plan_servings(id, 2, base).unwrap();
        assert_eq!(manager.get_meal_plan_entry(id).unwrap().calories, 400.0);
    }

    #[test]
    fn test_day_window_is_half_open() {
        let mut manager = AppStateManager::new(AppData::default());
        let recipe = sample_recipe(1, 2, 400.0);

        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let midnight = date.and_hms_opt(0, 0, 0).unwrap();
        let next_midnight = date
            .succ_opt()
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        manager.add_meal_plan_entry(&recipe, midnight, MealSlot::Breakfast, 2, 2);
        manager.add_meal_plan_entry(&recipe, next_midnight, MealSlot::Breakfast, 2, 2);

        assert_eq!(manager.list_meal_plan_entries(date).len(), 1);
    }

    #[test]
    fn test_entries_sorted_by_slot() {
        let mut manager = AppStateManager::new(AppData::default());
        let recipe = sample_recipe(1, 2, 400.0);

        manager.add_meal_plan_entry(&recipe, noon(1), MealSlot::Dinner, 2, 2);
        manager.add_meal_plan_entry(&recipe, noon(1), MealSlot::Breakfast, 2, 2);
        manager.add_meal_plan_entry(&recipe, noon(1), MealSlot::Lunch, 2, 2);

        let slots: Vec<MealSlot> = manager
            .list_meal_plan_entries(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap())
            .iter()
            .map(|e| e.slot)
            .collect();
        assert_eq!(
            slots,
            vec![MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner]
        );
    }

    #[test]
    fn test_consumed_calories_sums_per_serving_portions() {
        let mut manager = AppStateManager::new(AppData::default());
        let recipe = sample_recipe(1, 2, 400.0);

        // 400 kcal at base 2 scaled to 4 servings -> 800 total, 200 each.
        manager.add_meal_plan_entry(&recipe, noon(1), MealSlot::Lunch, 4, 2);
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(manager.consumed_calories(date), 200.0);
    }

    #[test]
    fn test_user_recipe_gets_negative_unique_id() {
        let mut manager = AppStateManager::new(AppData::default());
        let first = manager
            .save_user_recipe(UserRecipeDraft {
                title: "Family stew".to_string(),
                ..UserRecipeDraft::default()
            })
            .id;
        let second = manager
            .save_user_recipe(UserRecipeDraft {
                title: "Pancakes".to_string(),
                ..UserRecipeDraft::default()
            })
            .id;

        assert!(first.is_local());
        assert!(second.is_local());
        assert_ne!(first, second);
    }

    #[test]
    fn test_delete_user_recipe_cascades_plan_entries() {
        let mut manager = AppStateManager::new(AppData::default());
        let id = manager
            .save_user_recipe(UserRecipeDraft {
                title: "Family stew".to_string(),
                servings: Some(2),
                calories: 500.0,
                ..UserRecipeDraft::default()
            })
            .id;

        let recipe = manager.find_recipe(id).unwrap().clone();
        manager.save_favorite(recipe.clone());
        manager.add_meal_plan_entry(&recipe, noon(1), MealSlot::Dinner, 2, 2);

        manager.delete_user_recipe(id).unwrap();
        assert!(manager.list_user_recipes().is_empty());
        assert!(manager
            .list_meal_plan_entries(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap())
            .is_empty());
        // Favorites keep their own snapshot.
        assert!(manager.is_favorite(id));
    }

    #[test]
    fn test_delete_user_recipe_rejects_remote_id() {
        let mut manager = AppStateManager::new(AppData::default());
        assert!(manager.delete_user_recipe(RecipeId::from_raw(42)).is_err());
    }

    #[test]
    fn test_profile_mutations() {
        let mut manager = AppStateManager::new(AppData::default());
        assert_eq!(manager.profile().calorie_goal, 2000);

        manager.update_calorie_goal(1800);
        assert_eq!(manager.profile().calorie_goal, 1800);

        assert_eq!(manager.increment_cooked_count(), 1);
        manager.toggle_dislike("Onion").unwrap();
        assert_eq!(manager.dislikes(), vec!["Onion"]);
    }
}
