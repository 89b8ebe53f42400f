/// A derived shopping-list line. Never persisted; `is_checked` is a
/// session-local toggle that does not survive a reload.
#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingItem {
    /// Display name, word-capitalized from the first-seen ingredient.
    pub name: String,

    /// Accumulated quantity across all planned meals.
    pub amount: f64,

    pub unit: String,

    pub is_checked: bool,
}

impl ShoppingItem {
    pub fn new(name: String, amount: f64, unit: String) -> Self {
        Self {
            name,
            amount,
            unit,
            is_checked: false,
        }
    }
}
