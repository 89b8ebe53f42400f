use crate::models::Recipe;

/// Catalog of common ingredients offered by the dislikes editor. Free-text
/// entries outside this list are allowed.
pub const SUGGESTED_INGREDIENTS: [&str; 30] = [
    "Alcohol",
    "Avocado",
    "Beef",
    "Bell Pepper",
    "Caffeine",
    "Chicken",
    "Chocolate",
    "Cilantro",
    "Coconut",
    "Corn",
    "Dairy",
    "Eggplant",
    "Eggs",
    "Fish",
    "Garlic",
    "Gluten",
    "Lamb",
    "Mushrooms",
    "Mustard",
    "Onion",
    "Peanuts",
    "Pork",
    "Sesame",
    "Shellfish",
    "Soy",
    "Strawberry",
    "Sugar",
    "Tomato",
    "Tree Nuts",
    "Wheat",
];

/// True when the disliked name occurs anywhere in the recipe's title or
/// ingredient names.
///
/// The match is a case-insensitive substring check, not a whole-word one: a
/// loose, false-positive-tolerant warning heuristic. It only annotates a
/// recipe and never blocks viewing or cooking it.
pub fn matches_dislike(disliked: &str, recipe: &Recipe) -> bool {
    if disliked.is_empty() {
        return false;
    }
    let haystack = search_text(recipe);
    haystack.contains(&disliked.to_lowercase())
}

/// All disliked names that match the recipe, for warning annotations.
pub fn warnings_for(recipe: &Recipe, dislikes: &[String]) -> Vec<String> {
    let haystack = search_text(recipe);
    dislikes
        .iter()
        .filter(|d| !d.is_empty() && haystack.contains(&d.to_lowercase()))
        .cloned()
        .collect()
}

/// Lowercase concatenation of title and all ingredient names, joined by
/// spaces.
fn search_text(recipe: &Recipe) -> String {
    let mut parts = vec![recipe.title.clone()];
    for ing in recipe.ingredients() {
        if let Some(name) = &ing.name {
            parts.push(name.clone());
        }
    }
    parts.join(" ").to_lowercase()
}
