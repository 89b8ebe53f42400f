pub mod manager;
pub mod persistence;

pub use manager::{AppData, AppStateManager, UserRecipeDraft};
pub use persistence::{load_app_data, load_or_default, save_app_data};
