pub mod meal_plan;
pub mod profile;
pub mod recipe;
pub mod shopping;

pub use meal_plan::{MealPlanEntry, MealSlot};
pub use profile::UserProfile;
pub use recipe::{
    effective_servings, format_amount, Ingredient, InstructionSection, InstructionStep, Nutrient,
    Nutrition, Recipe, RecipeId,
};
pub use shopping::ShoppingItem;
