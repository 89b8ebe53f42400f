use std::collections::HashMap;
use std::io::Write;

use tracing::debug;

use crate::error::Result;
use crate::models::{MealPlanEntry, ShoppingItem};

/// Combine the scaled ingredient lists of planned meals into one
/// deduplicated shopping list.
///
/// Ingredients merge under the key `lowercase(name) + "_" + lowercase(unit)`;
/// the same name under different units stays separate (no unit conversion).
/// Entries without an ingredient snapshot are skipped; historical entries may
/// predate snapshot capture. The result is sorted ascending by display name.
pub fn build_shopping_list(entries: &[MealPlanEntry]) -> Vec<ShoppingItem> {
    let mut merged: HashMap<String, ShoppingItem> = HashMap::new();

    for entry in entries {
        let ratio = entry.serving_ratio();

        let Some(ingredients) = entry.ingredients.as_deref() else {
            debug!(entry_id = entry.id, title = %entry.title, "skipping entry without ingredient snapshot");
            continue;
        };

        for ing in ingredients {
            let (Some(name), Some(amount)) = (ing.name.as_deref(), ing.amount) else {
                continue;
            };

            let unit = ing.unit.as_deref().unwrap_or("");
            let scaled_amount = amount * ratio;
            let key = format!("{}_{}", name.to_lowercase(), unit.to_lowercase());

            merged
                .entry(key)
                .and_modify(|item| item.amount += scaled_amount)
                .or_insert_with(|| {
                    ShoppingItem::new(capitalize_words(name), scaled_amount, unit.to_string())
                });
        }
    }

    let mut items: Vec<ShoppingItem> = merged.into_values().collect();
    items.sort_by(|a, b| a.name.cmp(&b.name));
    items
}

/// Write the shopping list as CSV (name, amount, unit).
pub fn export_csv<W: Write>(items: &[ShoppingItem], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["name", "amount", "unit"])?;
    for item in items {
        let amount = item.amount.to_string();
        wtr.write_record([item.name.as_str(), amount.as_str(), item.unit.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Capitalize the first letter of every whitespace-separated word.
fn capitalize_words(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
