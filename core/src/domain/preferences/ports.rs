use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError, preferences::entities::DietaryPreferences,
};

#[cfg_attr(test, mockall::automock)]
pub trait PreferencesRepository: Send + Sync {
    fn get_preferences(
        &self,
        user_id: String,
    ) -> impl Future<Output = Result<Option<DietaryPreferences>, CoreError>> + Send;

    fn upsert_preferences(
        &self,
        user_id: String,
        preferences: DietaryPreferences,
    ) -> impl Future<Output = Result<DietaryPreferences, CoreError>> + Send;
}
