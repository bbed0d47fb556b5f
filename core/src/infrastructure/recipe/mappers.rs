use crate::{
    domain::recipe::entities::Recipe, entity::recipes, infrastructure::db::json_column,
};

impl From<&recipes::Model> for Recipe {
    fn from(model: &recipes::Model) -> Self {
        Self {
            recipe_id: model.id.to_string(),
            title: model.title.clone(),
            description: model.description.clone(),
            ingredients: json_column("ingredients", &model.ingredients),
            steps: json_column("steps", &model.steps),
            calories: model.calories,
            servings: model.servings,
            cook_min: model.cook_min,
            protein: model.protein,
            carbs: model.carbs,
            fat: model.fat,
            fiber: model.fiber,
            sugar: model.sugar,
            favorited: model.favorited,
            source_scan_id: model.source_scan_id.map(|id| id.to_string()),
        }
    }
}

impl From<recipes::Model> for Recipe {
    fn from(model: recipes::Model) -> Self {
        Self::from(&model)
    }
}
