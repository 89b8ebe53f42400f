use serde::{Deserialize, Serialize};

use crate::error::{ChefError, Result};

/// Default daily calorie goal for a fresh profile.
pub const DEFAULT_CALORIE_GOAL: u32 = 2000;

/// Recipes cooked per chef level.
const COOKS_PER_LEVEL: u32 = 5;

/// Singleton-per-user record of goals, progress and dislikes.
///
/// Dislikes are persisted as comma-joined text; no element may itself contain
/// a comma, and names compare case-sensitively as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub calorie_goal: u32,

    pub cooked_count: u32,

    dislikes: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            calorie_goal: DEFAULT_CALORIE_GOAL,
            cooked_count: 0,
            dislikes: String::new(),
        }
    }
}

impl UserProfile {
    /// Disliked ingredient names, in insertion order.
    pub fn dislikes(&self) -> Vec<String> {
        if self.dislikes.is_empty() {
            return Vec::new();
        }
        self.dislikes.split(',').map(str::to_string).collect()
    }

    /// Add the name if absent, remove it if present. Comparison is
    /// case-sensitive as authored.
    pub fn toggle_dislike(&mut self, name: &str) -> Result<()> {
        if name.contains(',') {
            return Err(ChefError::InvalidInput(format!(
                "disliked ingredient may not contain a comma: {}",
                name
            )));
        }
        let mut current = self.dislikes();
        if let Some(pos) = current.iter().position(|d| d == name) {
            current.remove(pos);
        } else {
            current.push(name.to_string());
        }
        self.dislikes = current.join(",");
        Ok(())
    }

    /// Chef level: one level per five cooked recipes, starting at 1.
    pub fn level(&self) -> u32 {
        self.cooked_count / COOKS_PER_LEVEL + 1
    }

    pub fn rank(&self) -> &'static str {
        let level = self.level();
        if level > 20 {
            "Master Chef"
        } else if level > 5 {
            "Sous Chef"
        } else {
            "Novice"
        }
    }

    /// Fraction of progress toward the next level, in [0, 1).
    pub fn progress_to_next_level(&self) -> f64 {
        f64::from(self.cooked_count % COOKS_PER_LEVEL) / f64::from(COOKS_PER_LEVEL)
    }
}
