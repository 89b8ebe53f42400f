use std::fs;
use std::path::Path;

use tracing::warn;

use crate::error::{ChefError, Result};
use crate::state::AppData;

/// Load the application document from a JSON file.
pub fn load_app_data<P: AsRef<Path>>(path: P) -> Result<AppData> {
    let content = fs::read_to_string(&path).map_err(|e| {
        ChefError::PersistenceFailure(format!("read {}: {}", path.as_ref().display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        ChefError::PersistenceFailure(format!("parse {}: {}", path.as_ref().display(), e))
    })
}

/// Load the document, falling back to a fresh one when the file does not
/// exist yet. A corrupt file is an error, never silently discarded.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<AppData> {
    if !path.as_ref().exists() {
        warn!(path = %path.as_ref().display(), "no data file yet, starting fresh");
        return Ok(AppData::default());
    }
    load_app_data(path)
}

/// Save the application document to a JSON file.
///
/// Failures are returned to the caller instead of being swallowed; there is
/// still no retry and no rollback.
pub fn save_app_data<P: AsRef<Path>>(path: P, data: &AppData) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    fs::write(&path, json).map_err(|e| {
        ChefError::PersistenceFailure(format!("write {}: {}", path.as_ref().display(), e))
    })
}
