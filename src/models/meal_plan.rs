use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::recipe::{Ingredient, InstructionSection, RecipeId};

/// Meal slot of a planned day, ordered Breakfast < Lunch < Dinner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    pub fn label(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text.to_lowercase().as_str() {
            "breakfast" => Some(MealSlot::Breakfast),
            "lunch" => Some(MealSlot::Lunch),
            "dinner" => Some(MealSlot::Dinner),
            _ => None,
        }
    }
}

impl std::fmt::Display for MealSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A persisted assignment of a recipe to a date and meal slot.
///
/// The entry is a snapshot of the recipe at planning time. `calories` is
/// always stored pre-scaled to `servings`; the ingredient snapshot is stored
/// at `original_servings` scale and is rescaled at read time. `ingredients`
/// and `instructions` are `None` for entries created before snapshots were
/// captured; such entries contribute nothing to the shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanEntry {
    pub id: u64,

    pub recipe_id: RecipeId,

    pub title: String,

    pub image: Option<String>,

    pub ready_in_minutes: Option<u32>,

    /// Calorie figure scaled to `servings`.
    pub calories: f64,

    pub protein: f64,

    pub fat: f64,

    pub carbs: f64,

    pub date: NaiveDateTime,

    pub slot: MealSlot,

    /// Currently selected target serving count, >= 1.
    pub servings: u32,

    /// Serving count the snapshot figures were captured against. Never
    /// mutated after creation.
    pub original_servings: u32,

    pub ingredients: Option<Vec<Ingredient>>,

    pub instructions: Option<Vec<InstructionSection>>,
}

impl MealPlanEntry {
    /// Ratio the snapshot figures must be multiplied by to match the
    /// currently selected serving count.
    pub fn serving_ratio(&self) -> f64 {
        f64::from(self.servings) / f64::from(self.original_servings.max(1))
    }

    /// Calorie figure per single serving of this entry.
    pub fn calories_per_serving(&self) -> f64 {
        self.calories / f64::from(self.servings.max(1))
    }

    /// Reconstruct the pre-scaling calorie figure by dividing the stored one
    /// back out by the current ratio.
    ///
    /// Servings edits must rescale from this figure, not from the stored
    /// (already scaled) one, or repeated edits would compound the ratio.
    pub fn pre_scale_calories(&self) -> f64 {
        self.calories / self.serving_ratio()
    }
}
