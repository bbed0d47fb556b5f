use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::{
    common::entities::app_errors::CoreError, ingredient::entities::Ingredient,
};

/// Closed set of ingredient categories.
///
/// Decoding always succeeds: anything unrecognised becomes [`Other`](Self::Other).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IngredientCategory {
    Vegetables,
    Proteins,
    Grains,
    Dairy,
    Seasonings,
    Oil,
    Other,
}

impl IngredientCategory {
    pub const ALL: [IngredientCategory; 7] = [
        IngredientCategory::Vegetables,
        IngredientCategory::Proteins,
        IngredientCategory::Grains,
        IngredientCategory::Dairy,
        IngredientCategory::Seasonings,
        IngredientCategory::Oil,
        IngredientCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientCategory::Vegetables => "vegetables",
            IngredientCategory::Proteins => "proteins",
            IngredientCategory::Grains => "grains",
            IngredientCategory::Dairy => "dairy",
            IngredientCategory::Seasonings => "seasonings",
            IngredientCategory::Oil => "oil",
            IngredientCategory::Other => "other",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == label)
    }
}

impl fmt::Display for IngredientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for IngredientCategory {
    fn from(raw: &str) -> Self {
        normalize_category(raw)
    }
}

impl Serialize for IngredientCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for IngredientCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(normalize_category(&raw))
    }
}

/// Map free-form model output onto a category. Never fails.
pub fn normalize_category(raw: &str) -> IngredientCategory {
    if let Some(category) = IngredientCategory::from_label(raw) {
        return category;
    }

    let key = raw.trim().to_lowercase();
    if let Some(category) = IngredientCategory::from_label(&key) {
        return category;
    }

    match key.as_str() {
        "vegetable" | "veggie" | "veggies" | "veg" | "produce" | "fruit" | "fruits" | "greens" => {
            IngredientCategory::Vegetables
        }
        "protein" | "meat" | "meats" | "poultry" | "fish" | "seafood" | "egg" | "eggs"
        | "legume" | "legumes" | "beans" => IngredientCategory::Proteins,
        "grain" | "carb" | "carbs" | "starch" | "starches" | "bread" | "pasta" | "rice"
        | "cereal" | "cereals" => IngredientCategory::Grains,
        "dairies" | "milk" | "cheese" | "cheeses" | "dairy products" => IngredientCategory::Dairy,
        "seasoning" | "spice" | "spices" | "herb" | "herbs" | "condiment" | "condiments"
        | "sauce" | "sauces" => IngredientCategory::Seasonings,
        "oils" | "fat" | "fats" | "cooking oil" => IngredientCategory::Oil,
        _ => IngredientCategory::Other,
    }
}

/// Units accepted by the manual entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementUnit {
    // volume
    Teaspoon,
    Tablespoon,
    Cup,
    Milliliter,
    Liter,
    // weight
    Gram,
    Kilogram,
    Ounce,
    Pound,
    // count
    Piece,
    Clove,
    Slice,
    Can,
    Bunch,
    Pinch,
}

impl MeasurementUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementUnit::Teaspoon => "tsp",
            MeasurementUnit::Tablespoon => "tbsp",
            MeasurementUnit::Cup => "cup",
            MeasurementUnit::Milliliter => "ml",
            MeasurementUnit::Liter => "l",
            MeasurementUnit::Gram => "g",
            MeasurementUnit::Kilogram => "kg",
            MeasurementUnit::Ounce => "oz",
            MeasurementUnit::Pound => "lb",
            MeasurementUnit::Piece => "piece",
            MeasurementUnit::Clove => "clove",
            MeasurementUnit::Slice => "slice",
            MeasurementUnit::Can => "can",
            MeasurementUnit::Bunch => "bunch",
            MeasurementUnit::Pinch => "pinch",
        }
    }

    /// The vocabulary listed in the extraction prompt.
    pub fn vocabulary() -> Vec<&'static str> {
        [
            MeasurementUnit::Teaspoon,
            MeasurementUnit::Tablespoon,
            MeasurementUnit::Cup,
            MeasurementUnit::Milliliter,
            MeasurementUnit::Liter,
            MeasurementUnit::Gram,
            MeasurementUnit::Kilogram,
            MeasurementUnit::Ounce,
            MeasurementUnit::Pound,
            MeasurementUnit::Piece,
            MeasurementUnit::Clove,
            MeasurementUnit::Slice,
            MeasurementUnit::Can,
            MeasurementUnit::Bunch,
            MeasurementUnit::Pinch,
        ]
        .iter()
        .map(MeasurementUnit::as_str)
        .collect()
    }

    /// Accepts abbreviations, full names and plurals, case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        let key = raw.trim().trim_end_matches('.').to_lowercase();
        let unit = match key.as_str() {
            "tsp" | "teaspoon" | "teaspoons" => MeasurementUnit::Teaspoon,
            "tbsp" | "tablespoon" | "tablespoons" => MeasurementUnit::Tablespoon,
            "cup" | "cups" => MeasurementUnit::Cup,
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
                MeasurementUnit::Milliliter
            }
            "l" | "liter" | "liters" | "litre" | "litres" => MeasurementUnit::Liter,
            "g" | "gram" | "grams" => MeasurementUnit::Gram,
            "kg" | "kilogram" | "kilograms" => MeasurementUnit::Kilogram,
            "oz" | "ounce" | "ounces" => MeasurementUnit::Ounce,
            "lb" | "lbs" | "pound" | "pounds" => MeasurementUnit::Pound,
            "piece" | "pieces" | "pc" | "pcs" => MeasurementUnit::Piece,
            "clove" | "cloves" => MeasurementUnit::Clove,
            "slice" | "slices" => MeasurementUnit::Slice,
            "can" | "cans" => MeasurementUnit::Can,
            "bunch" | "bunches" => MeasurementUnit::Bunch,
            "pinch" | "pinches" => MeasurementUnit::Pinch,
            _ => return None,
        };
        Some(unit)
    }
}

impl fmt::Display for MeasurementUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Manual entry form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientForm {
    pub name: String,
    pub quantity: String,
    pub unit: MeasurementUnit,
    pub category: IngredientCategory,
}

impl IngredientForm {
    pub fn new(
        name: impl Into<String>,
        quantity: impl Into<String>,
        unit: MeasurementUnit,
        category: IngredientCategory,
    ) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            unit,
            category,
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::validation("Ingredient name is required"));
        }
        if self.quantity.trim().is_empty() {
            return Err(CoreError::validation("Ingredient quantity is required"));
        }
        Ok(())
    }

    pub fn into_ingredient(self, id: Option<String>) -> Ingredient {
        Ingredient {
            id,
            name: self.name.trim().to_string(),
            quantity: self.quantity.trim().to_string(),
            unit: self.unit.as_str().to_string(),
            category: self.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_labels_are_fixed_points() {
        for category in IngredientCategory::ALL {
            assert_eq!(normalize_category(category.as_str()), category);
        }
    }

    #[test]
    fn normalization_is_case_insensitive_and_plural_tolerant() {
        assert_eq!(normalize_category("VEGETABLE"), IngredientCategory::Vegetables);
        assert_eq!(normalize_category("veggies"), IngredientCategory::Vegetables);
        assert_eq!(normalize_category("  Meat "), IngredientCategory::Proteins);
        assert_eq!(normalize_category("carbs"), IngredientCategory::Grains);
        assert_eq!(normalize_category("Spice"), IngredientCategory::Seasonings);
        assert_eq!(normalize_category("herbs"), IngredientCategory::Seasonings);
        assert_eq!(normalize_category("FATS"), IngredientCategory::Oil);
        assert_eq!(normalize_category("Dairy"), IngredientCategory::Dairy);
    }

    #[test]
    fn unknown_or_odd_input_falls_back_to_other() {
        for raw in ["", "   ", "beverages", "🍕", "null", "vegetables!!", "\u{0}"] {
            assert_eq!(normalize_category(raw), IngredientCategory::Other, "{raw:?}");
        }
    }

    #[test]
    fn normalization_is_total_over_arbitrary_strings() {
        let samples = (0u32..2000)
            .filter_map(char::from_u32)
            .map(|c| format!("{c}{c}s"));
        for raw in samples {
            assert!(IngredientCategory::ALL.contains(&normalize_category(&raw)));
        }
    }

    #[test]
    fn unit_parse_accepts_common_spellings() {
        assert_eq!(MeasurementUnit::parse("Tablespoons"), Some(MeasurementUnit::Tablespoon));
        assert_eq!(MeasurementUnit::parse("tsp."), Some(MeasurementUnit::Teaspoon));
        assert_eq!(MeasurementUnit::parse("LBS"), Some(MeasurementUnit::Pound));
        assert_eq!(MeasurementUnit::parse("clove"), Some(MeasurementUnit::Clove));
        assert_eq!(MeasurementUnit::parse("handful"), None);
    }

    #[test]
    fn form_rejects_blank_name() {
        let form = IngredientForm::new(
            "  ",
            "1",
            MeasurementUnit::Cup,
            IngredientCategory::Grains,
        );
        assert!(matches!(form.validate(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn form_converts_to_trimmed_ingredient() {
        let form = IngredientForm::new(
            " Garlic ",
            "3",
            MeasurementUnit::Clove,
            IngredientCategory::Vegetables,
        );
        let ingredient = form.into_ingredient(None);
        assert_eq!(ingredient.name, "Garlic");
        assert_eq!(ingredient.unit, "clove");
        assert_eq!(ingredient.id, None);
    }
}
