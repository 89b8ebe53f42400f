pub mod api;
pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod planner;
pub mod state;

pub use error::{ChefError, Result};
pub use models::{Ingredient, MealPlanEntry, MealSlot, Recipe, RecipeId, ShoppingItem, UserProfile};
