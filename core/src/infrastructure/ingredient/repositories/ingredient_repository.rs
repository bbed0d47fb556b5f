use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    domain::{
        common::{entities::app_errors::CoreError, generate_uuid_v7},
        ingredient::{entities::Ingredient, ports::IngredientRepository},
    },
    entity::ingredients::{
        ActiveModel as IngredientActiveModel, Column as IngredientColumn,
        Entity as IngredientEntity,
    },
    infrastructure::db::{parse_id, persistence_error},
};

#[derive(Debug, Clone)]
pub struct PostgresIngredientRepository {
    pub db: DatabaseConnection,
}

impl PostgresIngredientRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn active_model(
    id: Uuid,
    scan_id: Uuid,
    position: i32,
    ingredient: &Ingredient,
    created_at: chrono::DateTime<Utc>,
) -> IngredientActiveModel {
    IngredientActiveModel {
        id: Set(id),
        scan_id: Set(scan_id),
        name: Set(ingredient.name.clone()),
        quantity: Set(ingredient.quantity.clone()),
        unit: Set(ingredient.unit.clone()),
        category: Set(ingredient.category.as_str().to_string()),
        position: Set(position),
        created_at: Set(created_at.fixed_offset()),
    }
}

impl IngredientRepository for PostgresIngredientRepository {
    async fn create_ingredients(
        &self,
        scan_id: String,
        ingredients: Vec<Ingredient>,
    ) -> Result<Vec<Ingredient>, CoreError> {
        if ingredients.is_empty() {
            return Ok(ingredients);
        }
        let scan_id = parse_id(&scan_id)?;
        let created_at = Utc::now();

        let ids: Vec<Uuid> = ingredients.iter().map(|_| generate_uuid_v7()).collect();
        let models = ingredients
            .iter()
            .zip(&ids)
            .enumerate()
            .map(|(position, (ingredient, id))| {
                active_model(*id, scan_id, position as i32, ingredient, created_at)
            });

        IngredientEntity::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(|e| persistence_error("Failed to create ingredients", e))?;

        tracing::info!(scan_id = %scan_id, count = ids.len(), "Ingredients stored");

        Ok(ingredients
            .into_iter()
            .zip(ids)
            .map(|(ingredient, id)| Ingredient {
                id: Some(id.to_string()),
                ..ingredient
            })
            .collect())
    }

    async fn create_ingredient(
        &self,
        scan_id: String,
        ingredient: Ingredient,
    ) -> Result<Ingredient, CoreError> {
        let scan_id = parse_id(&scan_id)?;

        IngredientEntity::insert(active_model(
            generate_uuid_v7(),
            scan_id,
            0,
            &ingredient,
            Utc::now(),
        ))
        .exec_with_returning(&self.db)
        .await
        .map(Ingredient::from)
        .map_err(|e| persistence_error("Failed to create ingredient", e))
    }

    async fn update_ingredient(
        &self,
        scan_id: String,
        ingredient: Ingredient,
    ) -> Result<Ingredient, CoreError> {
        let scan_id = parse_id(&scan_id)?;
        let id = parse_id(ingredient.id.as_deref().unwrap_or_default())?;

        let result = IngredientEntity::update_many()
            .set(IngredientActiveModel {
                name: Set(ingredient.name.clone()),
                quantity: Set(ingredient.quantity.clone()),
                unit: Set(ingredient.unit.clone()),
                category: Set(ingredient.category.as_str().to_string()),
                ..Default::default()
            })
            .filter(IngredientColumn::Id.eq(id))
            .filter(IngredientColumn::ScanId.eq(scan_id))
            .exec(&self.db)
            .await
            .map_err(|e| persistence_error("Failed to update ingredient", e))?;

        if result.rows_affected == 0 {
            return Err(CoreError::NotFound);
        }
        Ok(ingredient)
    }

    async fn delete_ingredient(&self, scan_id: String, ingredient_id: String) -> Result<(), CoreError> {
        let scan_id = parse_id(&scan_id)?;
        let id = parse_id(&ingredient_id)?;

        let result = IngredientEntity::delete_many()
            .filter(IngredientColumn::Id.eq(id))
            .filter(IngredientColumn::ScanId.eq(scan_id))
            .exec(&self.db)
            .await
            .map_err(|e| persistence_error("Failed to delete ingredient", e))?;

        if result.rows_affected == 0 {
            return Err(CoreError::NotFound);
        }
        Ok(())
    }

    async fn list_by_scan(&self, scan_id: String) -> Result<Vec<Ingredient>, CoreError> {
        let scan_id = parse_id(&scan_id)?;

        let ingredients = IngredientEntity::find()
            .filter(IngredientColumn::ScanId.eq(scan_id))
            .order_by_desc(IngredientColumn::CreatedAt)
            .order_by_asc(IngredientColumn::Position)
            .all(&self.db)
            .await
            .map_err(|e| persistence_error("Failed to list ingredients", e))?
            .into_iter()
            .map(Ingredient::from)
            .collect();

        Ok(ingredients)
    }
}
