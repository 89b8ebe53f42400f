use chrono::{Local, NaiveDate, NaiveTime};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use smart_chef_rs::api::{ImageLoader, RecipeApiClient, SearchPage};
use smart_chef_rs::cli::{Cli, Command, PlanCommand, ProfileCommand};
use smart_chef_rs::error::{ChefError, Result};
use smart_chef_rs::interface::{
    display_day_plan, display_profile, display_recipe_detail, display_recipe_list,
    display_shopping_list, prompt_date, prompt_dislike_name, prompt_item_number, prompt_meal_slot,
    prompt_servings, prompt_user_recipe, prompt_yes_no,
};
use smart_chef_rs::models::{MealPlanEntry, MealSlot, Recipe, RecipeId};
use smart_chef_rs::planner::{build_shopping_list, export_csv, scale};
use smart_chef_rs::state::{load_or_default, save_app_data, AppStateManager};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let Cli {
        command,
        file,
        api_base,
        api_key,
    } = Cli::parse();
    let command = command.unwrap_or_default();

    let api_key = api_key
        .or_else(|| std::env::var("SPOONACULAR_API_KEY").ok())
        .unwrap_or_default();
    let http_client = reqwest::Client::new();
    let api = RecipeApiClient::new(&api_base, &api_key, http_client.clone());

    match command {
        Command::Discover {
            query,
            category,
            number,
            offset,
        } => {
            cmd_discover(
                &file,
                &api,
                query.as_deref(),
                category.as_deref(),
                SearchPage { number, offset },
            )
            .await
        }
        Command::Recipe {
            id,
            servings,
            image_out,
        } => cmd_recipe(&file, &api, http_client, id, servings, image_out.as_deref()).await,
        Command::Favorite { id } => cmd_favorite(&file, &api, id).await,
        Command::Unfavorite { id } => cmd_unfavorite(&file, id),
        Command::Favorites => cmd_favorites(&file),
        Command::Plan(plan) => match plan {
            PlanCommand::Add {
                id,
                date,
                slot,
                servings,
            } => cmd_plan_add(&file, &api, id, date.as_deref(), slot.as_deref(), servings).await,
            PlanCommand::Show { date } => cmd_plan_show(&file, date.as_deref()),
            PlanCommand::Servings { entry, servings } => {
                cmd_plan_servings(&file, entry, servings)
            }
            PlanCommand::Remove { entry } => cmd_plan_remove(&file, entry),
        },
        Command::Shopping { date, csv } => cmd_shopping(&file, date.as_deref(), csv.as_deref()),
        Command::Cook { id } => cmd_cook(&file, &api, id).await,
        Command::AddRecipe => cmd_add_recipe(&file),
        Command::DeleteRecipe { id } => cmd_delete_recipe(&file, id),
        Command::Profile(profile) => match profile {
            ProfileCommand::Show => cmd_profile_show(&file),
            ProfileCommand::SetGoal { goal } => cmd_profile_set_goal(&file, goal),
            ProfileCommand::Dislikes => cmd_profile_dislikes(&file),
        },
    }
}

fn parse_date_arg(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map_err(|_| ChefError::InvalidInput(format!("invalid date: {}", text))),
        None => Ok(Local::now().date_naive()),
    }
}

/// Resolve a recipe snapshot: local store first, remote detail fetch to
/// backfill search results that arrived without ingredients.
async fn resolve_recipe(
    manager: &AppStateManager,
    api: &RecipeApiClient,
    id: RecipeId,
    need_details: bool,
) -> Result<Recipe> {
    if let Some(found) = manager.find_recipe(id) {
        if !need_details || found.has_ingredients() {
            return Ok(found.clone());
        }
    }

    if id.is_local() {
        return Err(ChefError::NotFound(format!("user recipe {}", id)));
    }

    api.recipe_detail(id.as_raw()).await
}

/// Search the remote catalog and list the results with dislike warnings.
async fn cmd_discover(
    file: &str,
    api: &RecipeApiClient,
    query: Option<&str>,
    category: Option<&str>,
    page: SearchPage,
) -> Result<()> {
    let manager = AppStateManager::new(load_or_default(file)?);
    let dislikes = manager.dislikes();

    // A failed fetch is reported and leaves everything else untouched.
    let results = match api.search(query, category, page).await {
        Ok(results) => results,
        Err(e) => {
            warn!(error = %e, "recipe search failed");
            println!("Search failed: {}", e);
            return Ok(());
        }
    };

    if results.is_empty() {
        println!("No recipes found.");
        return Ok(());
    }

    display_recipe_list(&results, &dislikes, "Discover");
    println!("Show a recipe with 'recipe <id>'.");
    Ok(())
}

/// Show one recipe scaled to a serving count.
async fn cmd_recipe(
    file: &str,
    api: &RecipeApiClient,
    http_client: reqwest::Client,
    id: i64,
    servings: Option<u32>,
    image_out: Option<&str>,
) -> Result<()> {
    let manager = AppStateManager::new(load_or_default(file)?);
    let recipe = resolve_recipe(&manager, api, RecipeId::from_raw(id), true).await?;

    let target = servings.unwrap_or_else(|| recipe.effective_servings()).max(1);
    display_recipe_detail(&recipe, target, &manager.dislikes());

    if let Some(out) = image_out {
        match &recipe.image {
            Some(reference) => {
                let mut images = ImageLoader::new(http_client);
                let bytes = images.load(reference).await?;
                std::fs::write(out, bytes)?;
                println!("Image saved to {}.", out);
            }
            None => println!("This recipe has no image."),
        }
    }

    Ok(())
}

async fn cmd_favorite(file: &str, api: &RecipeApiClient, id: i64) -> Result<()> {
    let mut manager = AppStateManager::new(load_or_default(file)?);
    let id = RecipeId::from_raw(id);

    if manager.is_favorite(id) {
        println!("Already in favorites.");
        return Ok(());
    }

    let recipe = resolve_recipe(&manager, api, id, true).await?;
    let title = recipe.title.clone();
    manager.save_favorite(recipe);
    save_app_data(file, manager.data())?;
    println!("Added '{}' to favorites.", title);
    Ok(())
}

fn cmd_unfavorite(file: &str, id: i64) -> Result<()> {
    let mut manager = AppStateManager::new(load_or_default(file)?);
    let id = RecipeId::from_raw(id);

    if !manager.is_favorite(id) {
        println!("Not in favorites.");
        return Ok(());
    }

    manager.delete_favorite(id);
    save_app_data(file, manager.data())?;
    println!("Removed from favorites.");
    Ok(())
}

fn cmd_favorites(file: &str) -> Result<()> {
    let manager = AppStateManager::new(load_or_default(file)?);
    display_recipe_list(manager.list_favorites(), &manager.dislikes(), "Favorites");
    Ok(())
}

/// Add a recipe to the plan, prompting for anything not given on the
/// command line.
async fn cmd_plan_add(
    file: &str,
    api: &RecipeApiClient,
    id: i64,
    date: Option<&str>,
    slot: Option<&str>,
    servings: Option<u32>,
) -> Result<()> {
    let mut manager = AppStateManager::new(load_or_default(file)?);
    let recipe = resolve_recipe(&manager, api, RecipeId::from_raw(id), true).await?;

    let date = match date {
        Some(_) => parse_date_arg(date)?,
        None => prompt_date(Local::now().date_naive())?,
    };
    let slot = match slot {
        Some(text) => MealSlot::parse(text)
            .ok_or_else(|| ChefError::InvalidInput(format!("unknown meal slot: {}", text)))?,
        None => prompt_meal_slot()?,
    };

    let base_servings = recipe.effective_servings();
    let target_servings = match servings {
        Some(s) => s.max(1),
        None => prompt_servings(base_servings)?,
    };

    let datetime = date.and_time(NaiveTime::MIN);
    let entry_id =
        manager.add_meal_plan_entry(&recipe, datetime, slot, target_servings, base_servings);
    save_app_data(file, manager.data())?;

    println!(
        "Added '{}' to {} on {} ({} servings, entry #{}).",
        recipe.title,
        slot,
        date.format("%d %b"),
        target_servings,
        entry_id
    );
    Ok(())
}

fn cmd_plan_show(file: &str, date: Option<&str>) -> Result<()> {
    let manager = AppStateManager::new(load_or_default(file)?);
    let date = parse_date_arg(date)?;
    display_day_plan(date, &manager.list_meal_plan_entries(date));
    Ok(())
}

fn cmd_plan_servings(file: &str, entry_id: u64, servings: u32) -> Result<()> {
    let mut manager = AppStateManager::new(load_or_default(file)?);
    let new_servings = servings.max(1);

    let entry = manager
        .get_meal_plan_entry(entry_id)
        .ok_or_else(|| ChefError::NotFound(format!("meal plan entry {}", entry_id)))?;
    // Recover the pre-scale figure before applying the new ratio; rescaling
    // the stored value directly would compound across edits.
    let base_calories = entry.pre_scale_calories();
    let original_servings = entry.original_servings;

    manager.update_meal_plan_servings(entry_id, new_servings, base_calories)?;
    save_app_data(file, manager.data())?;

    let new_calories = scale(base_calories, original_servings, new_servings);
    println!(
        "Entry #{} now {} servings ({} kcal).",
        entry_id,
        new_servings,
        new_calories.trunc() as i64
    );
    Ok(())
}

fn cmd_plan_remove(file: &str, entry_id: u64) -> Result<()> {
    let mut manager = AppStateManager::new(load_or_default(file)?);
    manager.delete_meal_plan_entry(entry_id)?;
    save_app_data(file, manager.data())?;
    println!("Removed entry #{}.", entry_id);
    Ok(())
}

/// Aggregate the shopping list for a date; render it or export as CSV.
fn cmd_shopping(file: &str, date: Option<&str>, csv: Option<&str>) -> Result<()> {
    let manager = AppStateManager::new(load_or_default(file)?);
    let date = parse_date_arg(date)?;

    let entries: Vec<MealPlanEntry> = manager
        .list_meal_plan_entries(date)
        .into_iter()
        .cloned()
        .collect();
    let mut items = build_shopping_list(&entries);

    if let Some(path) = csv {
        let out = std::fs::File::create(path)?;
        export_csv(&items, out)?;
        println!("Exported {} items to {}.", items.len(), path);
        return Ok(());
    }

    display_shopping_list(&items, date);

    // Check marks live only in this session; they are not persisted.
    if !items.is_empty() {
        while let Some(n) = prompt_item_number(items.len())? {
            items[n - 1].is_checked = !items[n - 1].is_checked;
            display_shopping_list(&items, date);
        }
    }

    Ok(())
}

/// Walk through a recipe's steps, counting it as cooked at the end.
async fn cmd_cook(file: &str, api: &RecipeApiClient, id: i64) -> Result<()> {
    let mut manager = AppStateManager::new(load_or_default(file)?);
    let recipe = resolve_recipe(&manager, api, RecipeId::from_raw(id), true).await?;

    let steps = recipe.steps();
    if steps.is_empty() {
        println!("No step-by-step instructions for this recipe.");
        return Ok(());
    }

    println!();
    println!("Cooking '{}'", recipe.title);

    let total = steps.len();
    let mut finished = true;
    for (i, step) in steps.iter().enumerate() {
        println!();
        println!("Step {}/{}: {}", step.number, total, step.step);
        if i + 1 < total && !prompt_yes_no("Next step?", true)? {
            finished = false;
            break;
        }
    }

    if finished {
        let cooked = manager.increment_cooked_count();
        save_app_data(file, manager.data())?;
        let profile = manager.profile();
        println!();
        println!(
            "Done! Recipes cooked: {} ({}, level {}).",
            cooked,
            profile.rank(),
            profile.level()
        );
    }

    Ok(())
}

fn cmd_add_recipe(file: &str) -> Result<()> {
    let mut manager = AppStateManager::new(load_or_default(file)?);
    let draft = prompt_user_recipe()?;
    let recipe = manager.save_user_recipe(draft);
    let title = recipe.title.clone();
    let id = recipe.id;
    save_app_data(file, manager.data())?;
    println!("Saved '{}' with id {}.", title, id);
    Ok(())
}

fn cmd_delete_recipe(file: &str, id: i64) -> Result<()> {
    let mut manager = AppStateManager::new(load_or_default(file)?);
    let id = RecipeId::from_raw(id);

    if !id.is_local() {
        return Err(ChefError::InvalidReference(
            "only user-authored recipes (negative id) can be deleted; use 'unfavorite' for remote ones"
                .to_string(),
        ));
    }

    manager.delete_user_recipe(id)?;
    save_app_data(file, manager.data())?;
    println!("Deleted recipe {} and its planned meals.", id);
    Ok(())
}

fn cmd_profile_show(file: &str) -> Result<()> {
    let manager = AppStateManager::new(load_or_default(file)?);
    let today = Local::now().date_naive();
    display_profile(
        manager.profile(),
        manager.list_favorites().len(),
        manager.consumed_calories(today),
    );
    Ok(())
}

fn cmd_profile_set_goal(file: &str, goal: u32) -> Result<()> {
    let mut manager = AppStateManager::new(load_or_default(file)?);
    manager.update_calorie_goal(goal);
    save_app_data(file, manager.data())?;
    println!("Daily goal set to {} kcal.", goal);
    Ok(())
}

fn cmd_profile_dislikes(file: &str) -> Result<()> {
    let mut manager = AppStateManager::new(load_or_default(file)?);

    let current = manager.dislikes();
    if current.is_empty() {
        println!("No disliked ingredients yet.");
    } else {
        println!("Disliked: {}", current.join(", "));
    }

    let mut changed = false;
    while let Some(name) = prompt_dislike_name()? {
        manager.toggle_dislike(&name)?;
        changed = true;
        let now = manager.dislikes();
        if now.contains(&name) {
            println!("Added '{}'.", name);
        } else {
            println!("Removed '{}'.", name);
        }
    }

    if changed {
        save_app_data(file, manager.data())?;
        println!("Dislikes saved.");
    }
    Ok(())
}
