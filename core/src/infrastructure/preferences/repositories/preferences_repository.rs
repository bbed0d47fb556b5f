use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    sea_query::OnConflict,
};

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        preferences::{entities::DietaryPreferences, ports::PreferencesRepository},
    },
    entity::dietary_preferences::{
        ActiveModel as PreferencesActiveModel, Column as PreferencesColumn,
        Entity as PreferencesEntity,
    },
    infrastructure::db::persistence_error,
};

#[derive(Debug, Clone)]
pub struct PostgresPreferencesRepository {
    pub db: DatabaseConnection,
}

impl PostgresPreferencesRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, CoreError> {
    serde_json::to_value(value).map_err(|e| persistence_error("Failed to serialize preferences", e))
}

impl PreferencesRepository for PostgresPreferencesRepository {
    async fn get_preferences(&self, user_id: String) -> Result<Option<DietaryPreferences>, CoreError> {
        let preferences = PreferencesEntity::find()
            .filter(PreferencesColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| persistence_error("Failed to get dietary preferences", e))?
            .map(DietaryPreferences::from);

        Ok(preferences)
    }

    async fn upsert_preferences(
        &self,
        user_id: String,
        preferences: DietaryPreferences,
    ) -> Result<DietaryPreferences, CoreError> {
        let max_cook_minutes = i32::try_from(preferences.max_cook_minutes)
            .map_err(|_| CoreError::validation("Cooking time is out of range"))?;

        PreferencesEntity::insert(PreferencesActiveModel {
            user_id: Set(user_id),
            diet_types: Set(to_json(&preferences.diet_types)?),
            allergies: Set(to_json(&preferences.allergies)?),
            disliked_ingredients: Set(to_json(&preferences.disliked_ingredients)?),
            max_cook_minutes: Set(max_cook_minutes),
            updated_at: Set(Utc::now().fixed_offset()),
        })
        .on_conflict(
            OnConflict::column(PreferencesColumn::UserId)
                .update_columns([
                    PreferencesColumn::DietTypes,
                    PreferencesColumn::Allergies,
                    PreferencesColumn::DislikedIngredients,
                    PreferencesColumn::MaxCookMinutes,
                    PreferencesColumn::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(&self.db)
        .await
        .map(DietaryPreferences::from)
        .map_err(|e| persistence_error("Failed to save dietary preferences", e))
    }
}
