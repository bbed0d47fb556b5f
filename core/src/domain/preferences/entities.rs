use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_COOK_MINUTES: u32 = 60;
pub const MIN_COOK_MINUTES: u32 = 5;
pub const MAX_COOK_MINUTES: u32 = 240;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietType {
    Vegetarian,
    Vegan,
    Pescatarian,
    Keto,
    Paleo,
    LowCarb,
}

impl DietType {
    pub const ALL: [DietType; 6] = [
        DietType::Vegetarian,
        DietType::Vegan,
        DietType::Pescatarian,
        DietType::Keto,
        DietType::Paleo,
        DietType::LowCarb,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DietType::Vegetarian => "vegetarian",
            DietType::Vegan => "vegan",
            DietType::Pescatarian => "pescatarian",
            DietType::Keto => "keto",
            DietType::Paleo => "paleo",
            DietType::LowCarb => "low-carb",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let key = raw.trim().to_lowercase().replace([' ', '_'], "-");
        Self::ALL.into_iter().find(|d| d.as_str() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllergyType {
    Peanuts,
    TreeNuts,
    Milk,
    Eggs,
    Fish,
    Shellfish,
    Soy,
    Wheat,
    Sesame,
}

impl AllergyType {
    pub const ALL: [AllergyType; 9] = [
        AllergyType::Peanuts,
        AllergyType::TreeNuts,
        AllergyType::Milk,
        AllergyType::Eggs,
        AllergyType::Fish,
        AllergyType::Shellfish,
        AllergyType::Soy,
        AllergyType::Wheat,
        AllergyType::Sesame,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AllergyType::Peanuts => "peanuts",
            AllergyType::TreeNuts => "tree-nuts",
            AllergyType::Milk => "milk",
            AllergyType::Eggs => "eggs",
            AllergyType::Fish => "fish",
            AllergyType::Shellfish => "shellfish",
            AllergyType::Soy => "soy",
            AllergyType::Wheat => "wheat",
            AllergyType::Sesame => "sesame",
        }
    }

    /// Human wording used in prompts ("tree nuts").
    pub fn label(&self) -> String {
        self.as_str().replace('-', " ")
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let key = raw.trim().to_lowercase().replace([' ', '_'], "-");
        Self::ALL.into_iter().find(|a| a.as_str() == key)
    }
}

/// Per-user recipe constraints. At most one record per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietaryPreferences {
    pub diet_types: BTreeSet<DietType>,
    pub allergies: BTreeSet<AllergyType>,
    pub disliked_ingredients: Vec<String>,
    pub max_cook_minutes: u32,
}

impl Default for DietaryPreferences {
    fn default() -> Self {
        Self {
            diet_types: BTreeSet::new(),
            allergies: BTreeSet::new(),
            disliked_ingredients: Vec::new(),
            max_cook_minutes: DEFAULT_MAX_COOK_MINUTES,
        }
    }
}

impl DietaryPreferences {
    /// Natural-language constraints appended to the recipe prompt.
    ///
    /// Allergies come first and are framed as hard requirements.
    pub fn prompt_fragment(&self) -> String {
        let mut lines = Vec::new();

        if !self.allergies.is_empty() {
            let allergies = self
                .allergies
                .iter()
                .map(AllergyType::label)
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!(
                "CRITICAL - MUST AVOID (allergies): {allergies}. \
                 Do not use these or any ingredient derived from them."
            ));
        }

        if !self.diet_types.is_empty() {
            let diets = self
                .diet_types
                .iter()
                .map(DietType::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("Follow these diets: {diets}."));
        }

        if !self.disliked_ingredients.is_empty() {
            lines.push(format!(
                "Avoid these disliked ingredients: {}.",
                self.disliked_ingredients.join(", ")
            ));
        }

        lines.push(format!(
            "Each recipe must take at most {} minutes to cook.",
            self.max_cook_minutes
        ));

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_only_bound_cooking_time() {
        let fragment = DietaryPreferences::default().prompt_fragment();
        assert_eq!(fragment, "Each recipe must take at most 60 minutes to cook.");
    }

    #[test]
    fn allergies_use_critical_framing_first() {
        let preferences = DietaryPreferences {
            diet_types: BTreeSet::from([DietType::Vegan, DietType::LowCarb]),
            allergies: BTreeSet::from([AllergyType::TreeNuts, AllergyType::Peanuts]),
            disliked_ingredients: vec!["cilantro".to_string()],
            max_cook_minutes: 30,
        };

        let fragment = preferences.prompt_fragment();
        let lines: Vec<&str> = fragment.lines().collect();
        assert!(lines[0].starts_with("CRITICAL - MUST AVOID (allergies): peanuts, tree nuts."));
        assert_eq!(lines[1], "Follow these diets: vegan, low-carb.");
        assert_eq!(lines[2], "Avoid these disliked ingredients: cilantro.");
        assert!(lines[3].contains("30 minutes"));
    }

    #[test]
    fn sets_deduplicate_on_deserialize() {
        let preferences: DietaryPreferences = serde_json::from_value(serde_json::json!({
            "dietTypes": ["keto", "keto"],
            "allergies": ["soy", "soy", "sesame"],
            "dislikedIngredients": [],
            "maxCookMinutes": 45
        }))
        .unwrap();
        assert_eq!(preferences.diet_types.len(), 1);
        assert_eq!(preferences.allergies.len(), 2);
    }

    #[test]
    fn parse_accepts_spaces_and_case() {
        assert_eq!(DietType::parse("Low Carb"), Some(DietType::LowCarb));
        assert_eq!(AllergyType::parse("tree_nuts"), Some(AllergyType::TreeNuts));
        assert_eq!(AllergyType::parse("gluten"), None);
    }
}
