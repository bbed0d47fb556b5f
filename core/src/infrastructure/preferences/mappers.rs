use crate::{
    domain::preferences::entities::{DEFAULT_MAX_COOK_MINUTES, DietaryPreferences},
    entity::dietary_preferences,
    infrastructure::db::json_column,
};

impl From<&dietary_preferences::Model> for DietaryPreferences {
    fn from(model: &dietary_preferences::Model) -> Self {
        Self {
            diet_types: json_column("diet_types", &model.diet_types),
            allergies: json_column("allergies", &model.allergies),
            disliked_ingredients: json_column("disliked_ingredients", &model.disliked_ingredients),
            max_cook_minutes: u32::try_from(model.max_cook_minutes)
                .unwrap_or(DEFAULT_MAX_COOK_MINUTES),
        }
    }
}

impl From<dietary_preferences::Model> for DietaryPreferences {
    fn from(model: dietary_preferences::Model) -> Self {
        Self::from(&model)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;
    use crate::domain::preferences::entities::{AllergyType, DietType};

    #[test]
    fn stored_sets_decode_into_typed_sets() {
        let model = dietary_preferences::Model {
            user_id: "user-1".to_string(),
            diet_types: json!(["vegan", "low-carb"]),
            allergies: json!(["tree-nuts"]),
            disliked_ingredients: json!(["olives"]),
            max_cook_minutes: 45,
            updated_at: Utc::now().fixed_offset(),
        };

        let preferences = DietaryPreferences::from(model);
        assert!(preferences.diet_types.contains(&DietType::LowCarb));
        assert!(preferences.allergies.contains(&AllergyType::TreeNuts));
        assert_eq!(preferences.disliked_ingredients, ["olives"]);
        assert_eq!(preferences.max_cook_minutes, 45);
    }
}
