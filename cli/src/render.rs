use std::fmt::Write as _;

use pantrylens_core::domain::{
    ingredient::{
        controller::{IngredientState, IngredientView},
        entities::Ingredient,
    },
    preferences::entities::{AllergyType, DietType, DietaryPreferences},
    recipe::{controller::RecipeView, entities::Recipe},
};

fn ingredient_line(ingredient: &Ingredient) -> String {
    format!(
        "  {:<38} {} ({})",
        ingredient.id.as_deref().unwrap_or("-"),
        ingredient.describe(),
        ingredient.category
    )
}

pub fn ingredients(view: &IngredientView) -> String {
    let mut out = String::new();
    match &view.state {
        IngredientState::Idle => out.push_str("No ingredients loaded\n"),
        IngredientState::Analyzing => out.push_str("Analyzing photos...\n"),
        IngredientState::Failed(message) => {
            let _ = writeln!(out, "Analysis failed: {message}");
        }
        IngredientState::Ready(list) if list.is_empty() => {
            out.push_str("No ingredients found\n");
        }
        IngredientState::Ready(list) => {
            let _ = writeln!(out, "{} ingredients:", list.len());
            for ingredient in list {
                let _ = writeln!(out, "{}", ingredient_line(ingredient));
            }
        }
    }
    if let Some(message) = &view.message {
        let _ = writeln!(out, "! {message}");
    }
    out
}

fn recipe_block(out: &mut String, recipe: &Recipe) {
    let star = if recipe.favorited { "*" } else { " " };
    let _ = writeln!(out, "{star} {}  [{}]", recipe.title, recipe.recipe_id);
    let _ = writeln!(
        out,
        "    {} min, {} servings, {} kcal | protein {}g carbs {}g fat {}g fiber {}g sugar {}g",
        recipe.cook_min,
        recipe.servings,
        recipe.calories,
        recipe.protein,
        recipe.carbs,
        recipe.fat,
        recipe.fiber,
        recipe.sugar
    );
    if !recipe.description.is_empty() {
        let _ = writeln!(out, "    {}", recipe.description);
    }
    for line in &recipe.ingredients {
        let _ = writeln!(out, "    - {line}");
    }
    for (n, step) in recipe.steps.iter().enumerate() {
        let _ = writeln!(out, "    {}. {step}", n + 1);
    }
}

fn recipe_list(out: &mut String, recipes: Option<&Vec<Recipe>>, empty: &str) {
    match recipes {
        Some(list) if !list.is_empty() => {
            for recipe in list {
                recipe_block(out, recipe);
                out.push('\n');
            }
        }
        _ => {
            let _ = writeln!(out, "{empty}");
        }
    }
}

pub fn recipes(view: &RecipeView) -> String {
    let mut out = String::new();
    recipe_list(&mut out, view.current.as_ref(), "No recipes");
    if view.can_load_more() {
        out.push_str("More recipes can be generated with --more\n");
    }
    if let Some(message) = &view.message {
        let _ = writeln!(out, "! {message}");
    }
    out
}

pub fn favorites(view: &RecipeView) -> String {
    let mut out = String::new();
    recipe_list(&mut out, view.favorites.as_ref(), "No favorite recipes");
    if let Some(message) = &view.message {
        let _ = writeln!(out, "! {message}");
    }
    out
}

pub fn preferences(preferences: &DietaryPreferences) -> String {
    let join_or_none = |items: Vec<String>| {
        if items.is_empty() {
            "none".to_string()
        } else {
            items.join(", ")
        }
    };

    let diets = preferences
        .diet_types
        .iter()
        .map(|d| DietType::as_str(d).to_string())
        .collect();
    let allergies = preferences.allergies.iter().map(AllergyType::label).collect();

    format!(
        "Diets: {}\nAllergies: {}\nDisliked: {}\nMax cooking time: {} min\n",
        join_or_none(diets),
        join_or_none(allergies),
        join_or_none(preferences.disliked_ingredients.clone()),
        preferences.max_cook_minutes
    )
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pantrylens_core::domain::ingredient::value_objects::IngredientCategory;

    use super::*;

    #[test]
    fn ready_list_shows_description_and_category() {
        let view = IngredientView {
            state: IngredientState::Ready(vec![Ingredient {
                id: Some("ing-1".to_string()),
                ..Ingredient::new("Garlic", "3", "clove", IngredientCategory::Vegetables)
            }]),
            scan_id: Some("scan-1".to_string()),
            message: None,
        };

        let out = ingredients(&view);
        assert!(out.starts_with("1 ingredients:"));
        assert!(out.contains("3 clove Garlic (vegetables)"));
    }

    #[test]
    fn failure_and_message_are_shown() {
        let view = IngredientView {
            state: IngredientState::Failed("No response from the AI service".to_string()),
            scan_id: None,
            message: Some("offline".to_string()),
        };
        let out = ingredients(&view);
        assert!(out.contains("Analysis failed: No response from the AI service"));
        assert!(out.contains("! offline"));
    }

    #[test]
    fn empty_recipe_view_with_status_message() {
        let view = RecipeView {
            message: Some("No recipes to save".to_string()),
            ..RecipeView::default()
        };
        let out = recipes(&view);
        assert!(out.contains("No recipes"));
        assert!(out.contains("! No recipes to save"));
    }

    #[test]
    fn preferences_render_allergy_labels() {
        let out = preferences(&DietaryPreferences {
            allergies: BTreeSet::from([AllergyType::TreeNuts]),
            ..DietaryPreferences::default()
        });
        assert!(out.contains("Diets: none"));
        assert!(out.contains("Allergies: tree nuts"));
        assert!(out.contains("Max cooking time: 60 min"));
    }
}
