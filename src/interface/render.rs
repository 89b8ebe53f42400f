use chrono::NaiveDate;

use crate::models::{format_amount, MealPlanEntry, MealSlot, Recipe, ShoppingItem, UserProfile};
use crate::planner::{scale_ingredients, scale_nutrients, warnings_for};

/// Display a list of recipes with dislike warnings.
pub fn display_recipe_list(recipes: &[Recipe], dislikes: &[String], title: &str) {
    if recipes.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, recipes.len());
    println!();

    for (i, recipe) in recipes.iter().enumerate() {
        let time = recipe
            .ready_in_minutes
            .map(|m| format!("{} min", m))
            .unwrap_or_else(|| "? min".to_string());

        let warnings = warnings_for(recipe, dislikes);
        let warn_tag = if warnings.is_empty() {
            String::new()
        } else {
            format!("  [warns: {}]", warnings.join(", "))
        };

        println!(
            "{:>3}. {} (id {}) - {}{}",
            i + 1,
            recipe.title,
            recipe.id,
            time,
            warn_tag
        );
    }
    println!();
}

/// Display a full recipe scaled to the target serving count.
pub fn display_recipe_detail(recipe: &Recipe, target_servings: u32, dislikes: &[String]) {
    println!();
    println!("=== {} ===", recipe.title);

    let time = recipe
        .ready_in_minutes
        .map(|m| format!("{} min", m))
        .unwrap_or_else(|| "unknown time".to_string());
    println!("{} | {} servings (base {})", time, target_servings, recipe.effective_servings());

    let warnings = warnings_for(recipe, dislikes);
    if !warnings.is_empty() {
        println!("Warning: contains disliked ingredients: {}", warnings.join(", "));
    }

    // Full precision is kept internally; display truncates to integers.
    let nutrition = scale_nutrients(recipe, target_servings);
    println!();
    println!(
        "Calories: {} kcal | Protein: {} g | Fat: {} g | Carbs: {} g",
        nutrition.calories.trunc() as i64,
        nutrition.protein.trunc() as i64,
        nutrition.fat.trunc() as i64,
        nutrition.carbs.trunc() as i64
    );

    if recipe.has_ingredients() {
        println!();
        println!("--- Ingredients ---");
        let scaled = scale_ingredients(
            recipe.ingredients(),
            recipe.effective_servings(),
            target_servings,
        );
        for ing in &scaled {
            println!("  - {}", ing.display_line());
        }
    }

    let steps = recipe.steps();
    if !steps.is_empty() {
        println!();
        println!("--- Instructions ---");
        for step in steps {
            println!("{:>3}. {}", step.number, step.step);
        }
    } else if let Some(summary) = recipe.plain_summary() {
        println!();
        println!("--- Instructions ---");
        println!("{}", summary);
    }
    println!();
}

/// Display a day of planned meals grouped by slot.
pub fn display_day_plan(date: NaiveDate, entries: &[&MealPlanEntry]) {
    if entries.is_empty() {
        println!("No meals planned for {}.", date);
        println!("Add a recipe with 'plan add'.");
        return;
    }

    println!();
    println!("=== Meal plan for {} ===", date);

    for slot in MealSlot::ALL {
        let in_slot: Vec<&&MealPlanEntry> = entries.iter().filter(|e| e.slot == slot).collect();
        if in_slot.is_empty() {
            continue;
        }

        println!();
        println!("--- {} ---", slot);
        for entry in in_slot {
            println!(
                "  #{} {} - {} kcal, {} servings",
                entry.id,
                entry.title,
                entry.calories.trunc() as i64,
                entry.servings
            );
        }
    }
    println!();
}

/// Display the aggregated shopping list.
pub fn display_shopping_list(items: &[ShoppingItem], date: NaiveDate) {
    if items.is_empty() {
        println!("No meals planned for {}, the shopping list is empty.", date);
        return;
    }

    println!();
    println!("=== Shopping list for {} ({} items) ===", date, items.len());
    println!();

    for (i, item) in items.iter().enumerate() {
        let check = if item.is_checked { "x" } else { " " };
        let quantity = if item.unit.is_empty() {
            format_amount(item.amount)
        } else {
            format!("{} {}", format_amount(item.amount), item.unit)
        };
        println!("{:>3}. [{}] {} - {}", i + 1, check, item.name, quantity);
    }
    println!();
}

/// Display profile stats.
pub fn display_profile(profile: &UserProfile, favorites_count: usize, consumed_today: f64) {
    println!();
    println!("=== Chef profile ===");
    println!(
        "{} | Level {} ({:.0}% to next)",
        profile.rank(),
        profile.level(),
        profile.progress_to_next_level() * 100.0
    );
    println!("Cooked: {} | Favorites: {}", profile.cooked_count, favorites_count);
    println!(
        "Today: {} / {} kcal",
        consumed_today.trunc() as i64,
        profile.calorie_goal
    );

    let dislikes = profile.dislikes();
    if dislikes.is_empty() {
        println!("Dislikes: (none)");
    } else {
        println!("Dislikes: {}", dislikes.join(", "));
    }
    println!();
}
