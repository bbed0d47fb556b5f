use serde_json::json;

use crate::domain::ingredient::value_objects::IngredientCategory;

/// Response schema for ingredient extraction: a bare array of ingredients.
pub fn get_ingredient_schema() -> serde_json::Value {
    let categories: Vec<&str> = IngredientCategory::ALL.iter().map(|c| c.as_str()).collect();

    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "quantity": { "type": "string" },
                "unit": { "type": "string" },
                "category": {
                    "type": "string",
                    "enum": categories
                }
            },
            "required": ["name", "quantity", "unit", "category"]
        }
    })
}

/// Response schema for recipe generation, nutrition nested per recipe.
pub fn get_recipe_schema() -> serde_json::Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "title": { "type": "string" },
                "ingredients": {
                    "type": "array",
                    "items": { "type": "string" }
                },
                "steps": {
                    "type": "array",
                    "items": { "type": "string" }
                },
                "cookMin": { "type": "integer" },
                "calories": { "type": "integer" },
                "servings": { "type": "integer" },
                "nutrition": {
                    "type": "object",
                    "properties": {
                        "protein": { "type": "integer" },
                        "carbs": { "type": "integer" },
                        "fat": { "type": "integer" },
                        "fiber": { "type": "integer" },
                        "sugar": { "type": "integer" },
                        "description": { "type": "string" }
                    },
                    "required": ["protein", "carbs", "fat", "fiber", "description"]
                }
            },
            "required": [
                "title", "ingredients", "steps", "cookMin",
                "calories", "servings", "nutrition"
            ]
        }
    })
}
