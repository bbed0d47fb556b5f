use serde::{Deserialize, Serialize};

use crate::domain::ingredient::value_objects::IngredientCategory;

/// One detected or manually entered food item.
///
/// `quantity` stays free text ("1/2", "2.5") and `unit` is not checked
/// against [`MeasurementUnit`](super::MeasurementUnit) here; only the entry
/// form enforces the unit vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub category: IngredientCategory,
}

impl Ingredient {
    pub fn new(
        name: impl Into<String>,
        quantity: impl Into<String>,
        unit: impl Into<String>,
        category: IngredientCategory,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            quantity: quantity.into(),
            unit: unit.into(),
            category,
        }
    }

    /// "quantity unit name", skipping blank parts. Used in recipe prompts.
    pub fn describe(&self) -> String {
        [
            self.quantity.trim(),
            self.unit.trim(),
            self.name.trim(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<&str>>()
        .join(" ")
    }
}
