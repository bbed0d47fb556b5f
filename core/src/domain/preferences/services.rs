use tracing::instrument;

use crate::domain::{
    common::entities::app_errors::CoreError,
    identity::ports::IdentityProvider,
    preferences::{
        entities::{DietaryPreferences, MAX_COOK_MINUTES, MIN_COOK_MINUTES},
        ports::PreferencesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PreferencesService<PR, I> {
    preferences_repository: PR,
    identity: I,
}

impl<PR, I> PreferencesService<PR, I>
where
    PR: PreferencesRepository,
    I: IdentityProvider,
{
    pub fn new(preferences_repository: PR, identity: I) -> Self {
        Self {
            preferences_repository,
            identity,
        }
    }

    fn user_id(&self) -> Result<String, CoreError> {
        self.identity
            .current_user_id()
            .ok_or(CoreError::Unauthenticated)
    }

    /// Stored preferences, or the defaults when the user never saved any.
    pub async fn get(&self) -> Result<DietaryPreferences, CoreError> {
        let user_id = self.user_id()?;
        Ok(self
            .preferences_repository
            .get_preferences(user_id)
            .await?
            .unwrap_or_default())
    }

    #[instrument(skip(self, preferences))]
    pub async fn save(
        &self,
        preferences: DietaryPreferences,
    ) -> Result<DietaryPreferences, CoreError> {
        let user_id = self.user_id()?;
        let preferences = clean(preferences)?;
        let saved = self
            .preferences_repository
            .upsert_preferences(user_id, preferences)
            .await?;
        tracing::info!(
            diets = saved.diet_types.len(),
            allergies = saved.allergies.len(),
            "Dietary preferences saved"
        );
        Ok(saved)
    }

    pub async fn prompt_fragment(&self) -> Result<String, CoreError> {
        Ok(self.get().await?.prompt_fragment())
    }
}

fn clean(mut preferences: DietaryPreferences) -> Result<DietaryPreferences, CoreError> {
    if !(MIN_COOK_MINUTES..=MAX_COOK_MINUTES).contains(&preferences.max_cook_minutes) {
        return Err(CoreError::validation(format!(
            "Cooking time must be between {MIN_COOK_MINUTES} and {MAX_COOK_MINUTES} minutes"
        )));
    }

    let mut disliked: Vec<String> = Vec::with_capacity(preferences.disliked_ingredients.len());
    for item in preferences.disliked_ingredients {
        let item = item.trim();
        if !item.is_empty() && !disliked.iter().any(|d| d.eq_ignore_ascii_case(item)) {
            disliked.push(item.to_string());
        }
    }
    preferences.disliked_ingredients = disliked;
    Ok(preferences)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::domain::{
        identity::ports::MockIdentityProvider,
        preferences::{entities::AllergyType, ports::MockPreferencesRepository},
    };

    fn signed_in() -> MockIdentityProvider {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_current_user_id()
            .returning(|| Some("user-1".to_string()));
        identity
    }

    #[tokio::test]
    async fn missing_record_yields_defaults() {
        let mut repo = MockPreferencesRepository::new();
        repo.expect_get_preferences()
            .withf(|user_id| user_id == "user-1")
            .returning(|_| Box::pin(async { Ok(None) }));

        let service = PreferencesService::new(repo, signed_in());
        assert_eq!(service.get().await.unwrap(), DietaryPreferences::default());
    }

    #[tokio::test]
    async fn save_trims_and_drops_blank_dislikes() {
        let mut repo = MockPreferencesRepository::new();
        repo.expect_upsert_preferences()
            .withf(|_, p| p.disliked_ingredients == ["olives", "cilantro"])
            .times(1)
            .returning(|_, p| Box::pin(async move { Ok(p) }));

        let service = PreferencesService::new(repo, signed_in());
        let saved = service
            .save(DietaryPreferences {
                disliked_ingredients: vec![
                    " olives ".to_string(),
                    "".to_string(),
                    "cilantro".to_string(),
                    "Olives".to_string(),
                ],
                ..DietaryPreferences::default()
            })
            .await
            .unwrap();
        assert_eq!(saved.disliked_ingredients.len(), 2);
    }

    #[tokio::test]
    async fn out_of_range_cook_time_is_rejected_before_persistence() {
        let mut repo = MockPreferencesRepository::new();
        repo.expect_upsert_preferences().never();

        let service = PreferencesService::new(repo, signed_in());
        for minutes in [0, 4, 241] {
            let err = service
                .save(DietaryPreferences {
                    max_cook_minutes: minutes,
                    ..DietaryPreferences::default()
                })
                .await
                .unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn signed_out_user_cannot_read_preferences() {
        let mut identity = MockIdentityProvider::new();
        identity.expect_current_user_id().returning(|| None);

        let service = PreferencesService::new(MockPreferencesRepository::new(), identity);
        assert_eq!(service.get().await.unwrap_err(), CoreError::Unauthenticated);
    }

    #[tokio::test]
    async fn fragment_reflects_stored_allergies() {
        let mut repo = MockPreferencesRepository::new();
        repo.expect_get_preferences().returning(|_| {
            Box::pin(async {
                Ok(Some(DietaryPreferences {
                    allergies: BTreeSet::from([AllergyType::Shellfish]),
                    ..DietaryPreferences::default()
                }))
            })
        });

        let service = PreferencesService::new(repo, signed_in());
        let fragment = service.prompt_fragment().await.unwrap();
        assert!(fragment.contains("CRITICAL - MUST AVOID (allergies): shellfish"));
    }
}
