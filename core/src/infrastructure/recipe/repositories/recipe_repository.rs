use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    sea_query::OnConflict,
};

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        recipe::{entities::Recipe, ports::RecipeRepository},
    },
    entity::{
        recipes::{ActiveModel as RecipeActiveModel, Column as RecipeColumn, Entity as RecipeEntity},
        scans::{Column as ScanColumn, Entity as ScanEntity},
    },
    infrastructure::db::{parse_id, persistence_error},
};

#[derive(Debug, Clone)]
pub struct PostgresRecipeRepository {
    pub db: DatabaseConnection,
}

impl PostgresRecipeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl RecipeRepository for PostgresRecipeRepository {
    async fn save_recipes(
        &self,
        user_id: String,
        scan_id: Option<String>,
        recipes: Vec<Recipe>,
    ) -> Result<(), CoreError> {
        if recipes.is_empty() {
            return Ok(());
        }
        let source_scan_id = scan_id.as_deref().map(parse_id).transpose()?;
        let created_at = Utc::now().fixed_offset();

        let mut models = Vec::with_capacity(recipes.len());
        for (position, recipe) in recipes.iter().enumerate() {
            let ingredients = serde_json::to_value(&recipe.ingredients)
                .map_err(|e| persistence_error("Failed to serialize recipe ingredients", e))?;
            let steps = serde_json::to_value(&recipe.steps)
                .map_err(|e| persistence_error("Failed to serialize recipe steps", e))?;

            models.push(RecipeActiveModel {
                id: Set(parse_id(&recipe.recipe_id)?),
                created_by: Set(user_id.clone()),
                source_scan_id: Set(source_scan_id),
                title: Set(recipe.title.clone()),
                description: Set(recipe.description.clone()),
                ingredients: Set(ingredients),
                steps: Set(steps),
                calories: Set(recipe.calories),
                servings: Set(recipe.servings),
                cook_min: Set(recipe.cook_min),
                protein: Set(recipe.protein),
                carbs: Set(recipe.carbs),
                fat: Set(recipe.fat),
                fiber: Set(recipe.fiber),
                sugar: Set(recipe.sugar),
                favorited: Set(recipe.favorited),
                position: Set(position as i32),
                created_at: Set(created_at),
            });
        }

        // saving the same batch twice only refreshes the favorite flag
        RecipeEntity::insert_many(models)
            .on_conflict(
                OnConflict::column(RecipeColumn::Id)
                    .update_column(RecipeColumn::Favorited)
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| persistence_error("Failed to save recipes", e))?;

        tracing::info!(user_id = %user_id, count = recipes.len(), "Recipes stored");
        Ok(())
    }

    async fn set_favorited(&self, recipe_id: String, favorited: bool) -> Result<(), CoreError> {
        let id = parse_id(&recipe_id)?;

        let result = RecipeEntity::update_many()
            .set(RecipeActiveModel {
                favorited: Set(favorited),
                ..Default::default()
            })
            .filter(RecipeColumn::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| persistence_error("Failed to update favorite", e))?;

        if result.rows_affected == 0 {
            return Err(CoreError::NotFound);
        }
        Ok(())
    }

    async fn get_recipe(&self, recipe_id: String) -> Result<Recipe, CoreError> {
        let id = parse_id(&recipe_id)?;

        RecipeEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| persistence_error("Failed to get recipe", e))?
            .map(Recipe::from)
            .ok_or(CoreError::NotFound)
    }

    async fn list_for_latest_scan(&self, user_id: String) -> Result<Vec<Recipe>, CoreError> {
        let latest_scan = ScanEntity::find()
            .filter(ScanColumn::UserId.eq(user_id.clone()))
            .order_by_desc(ScanColumn::CreatedAt)
            .one(&self.db)
            .await
            .map_err(|e| persistence_error("Failed to get latest scan", e))?;

        let Some(scan) = latest_scan else {
            return Ok(Vec::new());
        };

        let recipes = RecipeEntity::find()
            .filter(RecipeColumn::CreatedBy.eq(user_id))
            .filter(RecipeColumn::SourceScanId.eq(scan.id))
            .order_by_desc(RecipeColumn::CreatedAt)
            .order_by_asc(RecipeColumn::Position)
            .all(&self.db)
            .await
            .map_err(|e| persistence_error("Failed to list recipes", e))?
            .into_iter()
            .map(Recipe::from)
            .collect();

        Ok(recipes)
    }

    async fn list_favorites(&self, user_id: String) -> Result<Vec<Recipe>, CoreError> {
        let recipes = RecipeEntity::find()
            .filter(RecipeColumn::CreatedBy.eq(user_id))
            .filter(RecipeColumn::Favorited.eq(true))
            .order_by_desc(RecipeColumn::CreatedAt)
            .order_by_asc(RecipeColumn::Position)
            .all(&self.db)
            .await
            .map_err(|e| persistence_error("Failed to list favorite recipes", e))?
            .into_iter()
            .map(Recipe::from)
            .collect();

        Ok(recipes)
    }
}
