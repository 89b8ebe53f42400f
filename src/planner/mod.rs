pub mod dislikes;
pub mod scaling;
pub mod shopping_list;

pub use dislikes::{matches_dislike, warnings_for, SUGGESTED_INGREDIENTS};
pub use scaling::{
    scale, scale_entry_ingredients, scale_ingredients, scale_nutrients, serving_ratio,
    ScaledNutrition,
};
pub use shopping_list::{build_shopping_list, export_csv};
