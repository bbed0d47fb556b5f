use crate::domain::{
    common::entities::app_errors::DecodeError,
    llm::payload::{decode_element, parse_array, require_fields},
    recipe::entities::{RawRecipe, Recipe},
};

const REQUIRED_FIELDS: [&str; 7] = [
    "title",
    "ingredients",
    "steps",
    "cookMin",
    "calories",
    "servings",
    "nutrition",
];

const REQUIRED_NUTRITION_FIELDS: [&str; 5] = ["protein", "carbs", "fat", "fiber", "description"];

/// Decode model output into recipes, all or nothing.
///
/// Every recipe gets a freshly generated id, so two suggestions with the
/// same title never collide. Missing `sugar` becomes 0 and missing
/// `favorited` becomes false.
pub fn decode_recipes(raw_text: &str) -> Result<Vec<Recipe>, DecodeError> {
    let elements = parse_array(raw_text)?;

    let mut recipes = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        require_fields(index, &element, &REQUIRED_FIELDS)?;
        require_fields(index, &element["nutrition"], &REQUIRED_NUTRITION_FIELDS).map_err(
            |e| match e {
                DecodeError::MissingField { index, field } => DecodeError::MissingField {
                    index,
                    field: format!("nutrition.{field}"),
                },
                other => other,
            },
        )?;

        let raw: RawRecipe = decode_element(index, element)?;
        recipes.push(raw.into_recipe(Recipe::generate_id()));
    }

    tracing::debug!(count = recipes.len(), "Decoded recipes");
    Ok(recipes)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn recipe_json(title: &str, nutrition_extra: &str, extra: &str) -> String {
        format!(
            r#"{{
                "title": "{title}",
                "ingredients": ["2 cup rice", "1 piece onion"],
                "steps": ["Chop", "Cook"],
                "cookMin": 25,
                "calories": 480,
                "servings": 2,
                "nutrition": {{
                    "protein": 12, "carbs": 80, "fat": 9, "fiber": 4{nutrition_extra},
                    "description": "Simple and filling"
                }}{extra}
            }}"#
        )
    }

    #[test]
    fn missing_sugar_and_favorited_take_defaults() {
        let text = format!("[{}]", recipe_json("Rice bowl", "", ""));
        let recipes = decode_recipes(&text).unwrap();

        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].sugar, 0);
        assert!(!recipes[0].favorited);
        assert_eq!(recipes[0].description, "Simple and filling");
        assert_eq!(recipes[0].ingredients, ["2 cup rice", "1 piece onion"]);
        assert_eq!(recipes[0].steps, ["Chop", "Cook"]);
    }

    #[test]
    fn present_sugar_and_favorited_are_kept() {
        let text = format!(
            "[{}]",
            recipe_json("Rice bowl", r#", "sugar": 7"#, r#", "favorited": true"#)
        );
        let recipes = decode_recipes(&text).unwrap();
        assert_eq!(recipes[0].sugar, 7);
        assert!(recipes[0].favorited);
    }

    #[test]
    fn ids_are_unique_even_for_identical_titles() {
        let text = format!(
            "```json\n[{}, {}, {}]\n```",
            recipe_json("Omelette", "", ""),
            recipe_json("Omelette", "", ""),
            recipe_json("Omelette", "", "")
        );
        let recipes = decode_recipes(&text).unwrap();

        let ids: HashSet<&str> = recipes.iter().map(|r| r.recipe_id.as_str()).collect();
        assert_eq!(ids.len(), 3);
        assert!(ids.iter().all(|id| !id.is_empty()));
    }

    #[test]
    fn missing_nutrition_field_names_the_path() {
        let text = r#"[{
            "title": "Toast", "ingredients": [], "steps": [],
            "cookMin": 5, "calories": 100, "servings": 1,
            "nutrition": {"protein": 3, "carbs": 20, "fat": 1, "fiber": 1}
        }]"#;
        let err = decode_recipes(text).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingField {
                index: 0,
                field: "nutrition.description".to_string()
            }
        );
    }

    #[test]
    fn missing_top_level_field_fails_the_batch() {
        let text = format!(
            r#"[{}, {{"title": "No steps", "ingredients": []}}]"#,
            recipe_json("Fine", "", "")
        );
        let err = decode_recipes(&text).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingField {
                index: 1,
                field: "steps".to_string()
            }
        );
    }

    #[test]
    fn nutrition_that_is_not_an_object_is_malformed() {
        let text = r#"[{
            "title": "Toast", "ingredients": [], "steps": [],
            "cookMin": 5, "calories": 100, "servings": 1, "nutrition": "lots"
        }]"#;
        assert!(matches!(
            decode_recipes(text),
            Err(DecodeError::MalformedPayload(_))
        ));
    }

    #[test]
    fn truncated_payload_is_malformed() {
        let text = "```json\n[{\"title\": \"Half";
        assert!(matches!(
            decode_recipes(text),
            Err(DecodeError::MalformedPayload(_))
        ));
    }
}
