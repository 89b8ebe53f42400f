use chrono::NaiveDate;
use dialoguer::{Confirm, Input, Select};
use rand::Rng;
use strsim::jaro_winkler;

use crate::error::{ChefError, Result};
use crate::models::MealSlot;
use crate::planner::SUGGESTED_INGREDIENTS;
use crate::state::UserRecipeDraft;

/// Prompt for a date, defaulting to the given one.
pub fn prompt_date(default: NaiveDate) -> Result<NaiveDate> {
    let input: String = Input::new()
        .with_prompt("Date (YYYY-MM-DD)")
        .default(default.format("%Y-%m-%d").to_string())
        .interact_text()?;

    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| ChefError::InvalidInput(format!("invalid date: {}", input)))
}

/// Prompt for a meal slot.
pub fn prompt_meal_slot() -> Result<MealSlot> {
    let labels: Vec<&str> = MealSlot::ALL.iter().map(|s| s.label()).collect();
    let selection = Select::new()
        .with_prompt("Meal slot")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(MealSlot::ALL[selection])
}

/// Prompt for a serving count. Values below 1 are clamped to 1.
pub fn prompt_servings(default: u32) -> Result<u32> {
    let input: String = Input::new()
        .with_prompt("Servings")
        .default(default.to_string())
        .interact_text()?;

    let servings: u32 = input
        .trim()
        .parse()
        .map_err(|_| ChefError::InvalidInput("Invalid number".to_string()))?;

    Ok(servings.max(1))
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Prompt for a disliked ingredient name, fuzzy-matched against the
/// suggested catalog.
///
/// Returns None when the user finishes with an empty line. Free-text names
/// outside the catalog are accepted as typed.
pub fn prompt_dislike_name() -> Result<Option<String>> {
    loop {
        let input: String = Input::new()
            .with_prompt("Ingredient to toggle (or press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        if input.contains(',') {
            println!("Ingredient names may not contain commas.");
            continue;
        }

        // Exact catalog match first (case-insensitive).
        if let Some(name) = SUGGESTED_INGREDIENTS
            .iter()
            .find(|s| s.to_lowercase() == input.to_lowercase())
        {
            return Ok(Some((*name).to_string()));
        }

        // Fuzzy catalog match.
        let mut candidates: Vec<(&str, f64)> = SUGGESTED_INGREDIENTS
            .iter()
            .map(|s| (*s, jaro_winkler(&s.to_lowercase(), &input.to_lowercase())))
            .filter(|(_, score)| *score > 0.7)
            .collect();

        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        if let Some((best, _)) = candidates.first() {
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", best))
                .default(true)
                .interact()?;
            if confirm {
                return Ok(Some((*best).to_string()));
            }
        }

        // Not in the catalog, accept as typed.
        return Ok(Some(input.to_string()));
    }
}

/// Prompt for a 1-based list item number, Enter to finish.
pub fn prompt_item_number(max: usize) -> Result<Option<usize>> {
    loop {
        let input: String = Input::new()
            .with_prompt("Item number to toggle (or press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        match input.parse::<usize>() {
            Ok(n) if (1..=max).contains(&n) => return Ok(Some(n)),
            _ => println!("Enter a number between 1 and {}.", max),
        }
    }
}

/// Parse a free-text quantity like "2 cups" into amount and unit.
pub fn parse_amount_and_unit(text: &str) -> (Option<f64>, Option<String>) {
    let clean = text.trim().replace(',', ".");
    let numeric_len = clean
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || *c == '.')
        .map(|(i, c)| i + c.len_utf8())
        .last()
        .unwrap_or(0);

    let amount = clean[..numeric_len].parse::<f64>().ok();
    let unit = clean[numeric_len..].trim();
    let unit = (!unit.is_empty() && amount.is_some()).then(|| unit.to_string());
    (amount, unit)
}

/// Collect a user-authored recipe interactively.
pub fn prompt_user_recipe() -> Result<UserRecipeDraft> {
    let title: String = Input::new().with_prompt("Recipe title").interact_text()?;
    if title.trim().is_empty() {
        return Err(ChefError::InvalidInput("title must not be empty".to_string()));
    }

    let ready_in_minutes = prompt_optional_u32("Minutes to cook (optional)")?;
    let servings = Some(prompt_servings(2)?);
    let calories = prompt_f64("Calories (kcal)", 0.0)?;
    let protein = prompt_f64("Protein (g)", 0.0)?;
    let fat = prompt_f64("Fat (g)", 0.0)?;
    let carbs = prompt_f64("Carbohydrates (g)", 0.0)?;

    let mut ingredients = Vec::new();
    loop {
        let name: String = Input::new()
            .with_prompt("Ingredient name (or press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;
        let name = name.trim().to_string();
        if name.is_empty() {
            break;
        }

        let quantity: String = Input::new()
            .with_prompt("Quantity (e.g. 2 cups)")
            .allow_empty(true)
            .interact_text()?;
        let (amount, unit) = parse_amount_and_unit(&quantity);

        ingredients.push(crate::models::Ingredient {
            id: Some(rand::thread_rng().gen_range(0..=99_999)),
            name: Some(name.clone()),
            original: Some(format!("{} {}", quantity.trim(), name).trim().to_string()),
            amount,
            unit,
        });
    }

    let mut steps = Vec::new();
    loop {
        let step: String = Input::new()
            .with_prompt(format!("Step {} (or press Enter to finish)", steps.len() + 1))
            .allow_empty(true)
            .interact_text()?;
        let step = step.trim().to_string();
        if step.is_empty() {
            break;
        }
        steps.push(step);
    }

    Ok(UserRecipeDraft {
        title: title.trim().to_string(),
        image: None,
        ready_in_minutes,
        servings,
        calories,
        protein,
        fat,
        carbs,
        ingredients,
        steps,
    })
}

fn prompt_optional_u32(prompt: &str) -> Result<Option<u32>> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    input
        .parse()
        .map(Some)
        .map_err(|_| ChefError::InvalidInput("Invalid number".to_string()))
}

fn prompt_f64(prompt: &str, default: f64) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;
    input
        .trim()
        .parse()
        .map_err(|_| ChefError::InvalidInput("Invalid number".to_string()))
}
