pub mod prompts;
pub mod render;

pub use prompts::{
    parse_amount_and_unit, prompt_date, prompt_dislike_name, prompt_item_number, prompt_meal_slot,
    prompt_servings, prompt_user_recipe, prompt_yes_no,
};
pub use render::{
    display_day_plan, display_profile, display_recipe_detail, display_recipe_list,
    display_shopping_list,
};
