use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Canonical nutrient names used for exact-match lookups.
pub const NUTRIENT_CALORIES: &str = "Calories";
pub const NUTRIENT_PROTEIN: &str = "Protein";
pub const NUTRIENT_FAT: &str = "Fat";
pub const NUTRIENT_CARBS: &str = "Carbohydrates";

/// Identifier of a recipe.
///
/// Remote ids come from the search API and are non-negative; local ids are
/// assigned to user-authored recipes and are negative. The raw signed integer
/// is the wire/persisted representation; the sign convention is applied
/// exactly once, in [`RecipeId::from_raw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipeId {
    Remote(i64),
    Local(i64),
}

impl RecipeId {
    pub fn from_raw(raw: i64) -> Self {
        if raw < 0 {
            RecipeId::Local(raw)
        } else {
            RecipeId::Remote(raw)
        }
    }

    pub fn as_raw(self) -> i64 {
        match self {
            RecipeId::Remote(id) | RecipeId::Local(id) => id,
        }
    }

    /// True for user-authored recipes. Gates delete-vs-unfavorite behavior.
    pub fn is_local(self) -> bool {
        matches!(self, RecipeId::Local(_))
    }
}

impl std::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_raw())
    }
}

impl Serialize for RecipeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_raw())
    }
}

impl<'de> Deserialize<'de> for RecipeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(RecipeId::from_raw(i64::deserialize(deserializer)?))
    }
}

/// A single named nutrient figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    #[serde(default)]
    pub nutrients: Vec<Nutrient>,
}

/// One ingredient line of a recipe. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub name: Option<String>,

    /// Free-text fallback description ("2 cups flour, sifted").
    #[serde(default)]
    pub original: Option<String>,

    #[serde(default)]
    pub amount: Option<f64>,

    #[serde(default)]
    pub unit: Option<String>,
}

impl Ingredient {
    /// Display line for an ingredient.
    ///
    /// When an amount is present, "amount unit name" is preferred over the
    /// free-text `original` field.
    pub fn display_line(&self) -> String {
        if let Some(amount) = self.amount {
            let unit = self.unit.as_deref().unwrap_or("");
            let name = self.name.as_deref().unwrap_or("");
            return format!("{} {} {}", format_amount(amount), unit, name)
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
        }
        self.original
            .clone()
            .or_else(|| self.name.clone())
            .unwrap_or_default()
    }
}

/// Format a quantity for display: whole numbers without decimals, everything
/// else with one decimal place.
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.0}", amount)
    } else {
        format!("{:.1}", amount)
    }
}

/// Normalize an optional serving count for use as a divisor.
pub fn effective_servings(servings: Option<u32>) -> u32 {
    servings.filter(|&s| s > 0).unwrap_or(1)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionStep {
    pub number: u32,
    pub step: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstructionSection {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub steps: Vec<InstructionStep>,
}

/// A recipe as returned by the search API or authored by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,

    pub title: String,

    /// Remote URL or local file path.
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub ready_in_minutes: Option<u32>,

    #[serde(default)]
    pub servings: Option<u32>,

    #[serde(default)]
    pub nutrition: Option<Nutrition>,

    #[serde(default)]
    pub extended_ingredients: Option<Vec<Ingredient>>,

    #[serde(default)]
    pub analyzed_instructions: Option<Vec<InstructionSection>>,

    /// Free-text fallback when no structured instructions exist.
    #[serde(default)]
    pub summary: Option<String>,
}

impl Recipe {
    /// Look up a nutrient amount by exact name. First occurrence wins,
    /// missing names yield 0.
    pub fn nutrient_amount(&self, name: &str) -> f64 {
        self.nutrition
            .as_ref()
            .and_then(|n| n.nutrients.iter().find(|nu| nu.name == name))
            .map(|nu| nu.amount)
            .unwrap_or(0.0)
    }

    pub fn calories(&self) -> f64 {
        self.nutrient_amount(NUTRIENT_CALORIES)
    }

    pub fn protein(&self) -> f64 {
        self.nutrient_amount(NUTRIENT_PROTEIN)
    }

    pub fn fat(&self) -> f64 {
        self.nutrient_amount(NUTRIENT_FAT)
    }

    pub fn carbs(&self) -> f64 {
        self.nutrient_amount(NUTRIENT_CARBS)
    }

    /// Serving count normalized for use as a divisor.
    pub fn effective_servings(&self) -> u32 {
        effective_servings(self.servings)
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        self.extended_ingredients.as_deref().unwrap_or(&[])
    }

    pub fn has_ingredients(&self) -> bool {
        !self.ingredients().is_empty()
    }

    /// Structured steps: the first section with a non-empty step list.
    pub fn steps(&self) -> &[InstructionStep] {
        self.analyzed_instructions
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .find(|section| !section.steps.is_empty())
            .map(|section| section.steps.as_slice())
            .unwrap_or(&[])
    }

    /// Fallback instruction text with HTML tags stripped, used only when no
    /// structured steps exist.
    pub fn plain_summary(&self) -> Option<String> {
        self.summary.as_deref().map(strip_tags)
    }
}

fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for ch in text.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
