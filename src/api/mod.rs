pub mod client;
pub mod images;

pub use client::{RecipeApiClient, SearchPage, DEFAULT_BASE_URL};
pub use images::ImageLoader;
