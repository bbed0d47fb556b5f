use serde::{Deserialize, Serialize};

use crate::domain::common::generate_uuid_v7;

/// One generated recipe suggestion.
///
/// `ingredients` are display lines from the model, not references to
/// [`Ingredient`](crate::domain::ingredient::Ingredient) records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(rename = "recipeID")]
    pub recipe_id: String,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub calories: i32,
    pub servings: i32,
    pub cook_min: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
    pub fiber: i32,
    #[serde(default)]
    pub sugar: i32,
    #[serde(default)]
    pub favorited: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_scan_id: Option<String>,
}

impl Recipe {
    pub fn generate_id() -> String {
        generate_uuid_v7().to_string()
    }
}

/// Nutrition block as the model returns it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawNutrition {
    #[serde(deserialize_with = "whole_number")]
    pub protein: i32,
    #[serde(deserialize_with = "whole_number")]
    pub carbs: i32,
    #[serde(deserialize_with = "whole_number")]
    pub fat: i32,
    #[serde(deserialize_with = "whole_number")]
    pub fiber: i32,
    #[serde(default, deserialize_with = "optional_whole_number")]
    pub sugar: Option<i32>,
    pub description: String,
}

/// A recipe as decoded from model output, before it gets an id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    #[serde(deserialize_with = "whole_number")]
    pub cook_min: i32,
    #[serde(deserialize_with = "whole_number")]
    pub calories: i32,
    #[serde(deserialize_with = "whole_number")]
    pub servings: i32,
    pub nutrition: RawNutrition,
    #[serde(default)]
    pub favorited: Option<bool>,
}

impl RawRecipe {
    pub fn into_recipe(self, recipe_id: String) -> Recipe {
        Recipe {
            recipe_id,
            title: self.title,
            description: self.nutrition.description,
            ingredients: self.ingredients,
            steps: self.steps,
            calories: self.calories,
            servings: self.servings,
            cook_min: self.cook_min,
            protein: self.nutrition.protein,
            carbs: self.nutrition.carbs,
            fat: self.nutrition.fat,
            fiber: self.nutrition.fiber,
            sugar: self.nutrition.sugar.unwrap_or(0),
            favorited: self.favorited.unwrap_or(false),
            source_scan_id: None,
        }
    }
}

/// Integers, or floats rounded to the nearest integer ("12.5" grams of fat).
fn whole_number<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value < i32::MIN as f64 || value > i32::MAX as f64 {
        return Err(serde::de::Error::custom(format!(
            "{value} is not a valid whole number"
        )));
    }
    Ok(value.round() as i32)
}

fn optional_whole_number<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapped(#[serde(deserialize_with = "whole_number")] i32);

    Ok(Option::<Wrapped>::deserialize(deserializer)?.map(|Wrapped(n)| n))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn raw_recipe_maps_nutrition_onto_recipe() {
        let raw: RawRecipe = serde_json::from_value(json!({
            "title": "Fried rice",
            "ingredients": ["2 cup rice", "2 piece eggs"],
            "steps": ["Cook rice", "Fry"],
            "cookMin": 20,
            "calories": 540,
            "servings": 2,
            "nutrition": {
                "protein": 18, "carbs": 70, "fat": 12.4, "fiber": 3, "sugar": 2,
                "description": "Quick weeknight rice"
            }
        }))
        .unwrap();

        let recipe = raw.into_recipe("r1".to_string());
        assert_eq!(recipe.recipe_id, "r1");
        assert_eq!(recipe.description, "Quick weeknight rice");
        assert_eq!(recipe.fat, 12);
        assert_eq!(recipe.sugar, 2);
        assert_eq!(recipe.cook_min, 20);
        assert!(!recipe.favorited);
    }

    #[test]
    fn null_sugar_is_treated_as_absent() {
        let nutrition: RawNutrition = serde_json::from_value(json!({
            "protein": 1, "carbs": 2, "fat": 3, "fiber": 4, "sugar": null,
            "description": "x"
        }))
        .unwrap();
        assert_eq!(nutrition.sugar, None);
    }

    #[test]
    fn recipe_serializes_with_camel_case_keys() {
        let recipe = RawRecipe {
            title: "Soup".to_string(),
            ingredients: vec![],
            steps: vec![],
            cook_min: 30,
            calories: 200,
            servings: 4,
            nutrition: RawNutrition {
                protein: 5,
                carbs: 20,
                fat: 4,
                fiber: 6,
                sugar: None,
                description: "Warm".to_string(),
            },
            favorited: Some(true),
        }
        .into_recipe("r9".to_string());

        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(value["recipeID"], "r9");
        assert_eq!(value["cookMin"], 30);
        assert_eq!(value["favorited"], true);
        assert!(value.get("sourceScanId").is_none());
    }
}
