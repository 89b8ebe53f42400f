use clap::{Parser, Subcommand};

use crate::api::DEFAULT_BASE_URL;

/// SmartChef — recipe discovery and meal planning from the terminal.
#[derive(Parser, Debug)]
#[command(name = "smart_chef")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the app data JSON file.
    #[arg(short, long, default_value = "smart_chef.json")]
    pub file: String,

    /// Base URL of the recipe API.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub api_base: String,

    /// API key; falls back to the SPOONACULAR_API_KEY environment variable.
    #[arg(long)]
    pub api_key: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search recipes in the remote catalog.
    Discover {
        /// Free-text search query.
        query: Option<String>,

        /// Dish category, e.g. "dessert" or "main course".
        #[arg(long)]
        category: Option<String>,

        /// Results per page.
        #[arg(long, default_value_t = 10)]
        number: u32,

        /// Result offset for paging.
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },

    /// Show one recipe in detail, scaled to a serving count.
    Recipe {
        id: i64,

        /// Target serving count (defaults to the recipe's own).
        #[arg(short, long)]
        servings: Option<u32>,

        /// Download the recipe image to this path.
        #[arg(long)]
        image_out: Option<String>,
    },

    /// Save a recipe to favorites.
    Favorite { id: i64 },

    /// Remove a recipe from favorites.
    Unfavorite { id: i64 },

    /// List favorite recipes.
    Favorites,

    /// Manage the calendar meal plan.
    #[command(subcommand)]
    Plan(PlanCommand),

    /// Build the shopping list for a date from the planned meals.
    Shopping {
        /// Date (YYYY-MM-DD), default today.
        #[arg(long)]
        date: Option<String>,

        /// Export as CSV to this path instead of rendering.
        #[arg(long)]
        csv: Option<String>,
    },

    /// Cook a recipe step by step.
    Cook { id: i64 },

    /// Author a new recipe interactively.
    AddRecipe,

    /// Delete a user-authored recipe (also removes its planned meals).
    DeleteRecipe { id: i64 },

    /// Show or edit the chef profile.
    #[command(subcommand)]
    Profile(ProfileCommand),
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan(PlanCommand::Show { date: None })
    }
}

#[derive(Subcommand, Debug)]
pub enum PlanCommand {
    /// Add a recipe to a date and meal slot.
    Add {
        id: i64,

        /// Date (YYYY-MM-DD); prompted when missing.
        #[arg(long)]
        date: Option<String>,

        /// Meal slot (breakfast, lunch, dinner); prompted when missing.
        #[arg(long)]
        slot: Option<String>,

        /// Target serving count; prompted when missing.
        #[arg(long)]
        servings: Option<u32>,
    },

    /// Show the plan for a date.
    Show {
        /// Date (YYYY-MM-DD), default today.
        #[arg(long)]
        date: Option<String>,
    },

    /// Change the serving count of a planned entry.
    Servings { entry: u64, servings: u32 },

    /// Remove a planned entry.
    Remove { entry: u64 },
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Show profile stats.
    Show,

    /// Set the daily calorie goal.
    SetGoal { goal: u32 },

    /// Toggle disliked ingredients.
    Dislikes,
}
