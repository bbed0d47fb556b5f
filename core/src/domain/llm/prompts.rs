use crate::domain::ingredient::value_objects::{IngredientCategory, MeasurementUnit};

pub const RECIPES_PER_REQUEST: usize = 3;

pub fn render_extraction_prompt() -> String {
    let categories = IngredientCategory::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let units = MeasurementUnit::vocabulary().join(", ");

    format!(
        "Identify every food ingredient visible in this photo.\n\
         Respond with a JSON array only, no commentary. Each element must be an object with:\n\
         - \"name\": the ingredient name\n\
         - \"quantity\": the amount as text, e.g. \"2\", \"0.5\" or \"1/2\"\n\
         - \"unit\": one of: {units}\n\
         - \"category\": one of: {categories}\n\
         Estimate quantities when they are not obvious. If no food is visible, return []."
    )
}

pub fn render_recipe_prompt(ingredient_descriptions: &[String], dietary_prompt: &str) -> String {
    let ingredients = ingredient_descriptions
        .iter()
        .map(|line| format!("- {line}"))
        .collect::<Vec<_>>()
        .join("\n");

    let mut prompt = format!(
        "I have the following ingredients:\n{ingredients}\n\n\
         Suggest exactly {RECIPES_PER_REQUEST} recipes that mainly use these ingredients. \
         Common pantry staples such as salt, pepper and water may be assumed.\n"
    );

    if !dietary_prompt.trim().is_empty() {
        prompt.push('\n');
        prompt.push_str(dietary_prompt.trim());
        prompt.push('\n');
    }

    prompt.push_str(
        "\nRespond with a JSON array only, no commentary. Each element must be an object with:\n\
         - \"title\": string\n\
         - \"ingredients\": array of strings, each formatted as \"quantity unit name\"\n\
         - \"steps\": array of strings in cooking order\n\
         - \"cookMin\", \"calories\", \"servings\": integers\n\
         - \"nutrition\": object with integer \"protein\", \"carbs\", \"fat\", \"fiber\", \
         \"sugar\" (grams per serving) and a short \"description\" string of the dish",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_prompt_lists_both_vocabularies() {
        let prompt = render_extraction_prompt();
        assert!(prompt.contains("vegetables, proteins, grains, dairy, seasonings, oil, other"));
        assert!(prompt.contains("tbsp"));
        assert!(prompt.contains("clove"));
    }

    #[test]
    fn recipe_prompt_lists_ingredients_and_constraints() {
        let prompt = render_recipe_prompt(
            &["2 cup rice".to_string(), "3 clove garlic".to_string()],
            "CRITICAL - MUST AVOID (allergies): peanuts.",
        );
        assert!(prompt.contains("- 2 cup rice\n- 3 clove garlic"));
        assert!(prompt.contains("exactly 3 recipes"));
        assert!(prompt.contains("CRITICAL - MUST AVOID"));
    }

    #[test]
    fn recipe_prompt_without_constraints_has_no_blank_section() {
        let prompt = render_recipe_prompt(&["1 can beans".to_string()], "  ");
        assert!(!prompt.contains("\n\n\n"));
    }
}
