use tokio::sync::watch;
use tracing::instrument;

use crate::domain::{
    common::entities::app_errors::CoreError,
    identity::ports::IdentityProvider,
    ingredient::entities::Ingredient,
    llm::ports::AiGateway,
    preferences::{entities::DietaryPreferences, ports::PreferencesRepository},
    recipe::{entities::Recipe, ports::RecipeRepository, services::decode_recipes},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecipeStatus {
    #[default]
    Idle,
    Retrieving,
    Saving,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecipeView {
    pub status: RecipeStatus,
    pub current: Option<Vec<Recipe>>,
    /// Only ever holds recipes with `favorited == true`.
    pub favorites: Option<Vec<Recipe>>,
    /// Set only by a generation, never by loading from storage.
    pub last_ingredients_used: Option<Vec<Ingredient>>,
    pub source_scan_id: Option<String>,
    pub message: Option<String>,
}

impl RecipeView {
    pub fn can_load_more(&self) -> bool {
        self.last_ingredients_used.is_some()
    }
}

pub struct RecipeController<G, RR, PR, I> {
    ai_gateway: G,
    recipe_repository: RR,
    preferences_repository: PR,
    identity: I,
    view: watch::Sender<RecipeView>,
}

impl<G, RR, PR, I> RecipeController<G, RR, PR, I>
where
    G: AiGateway,
    RR: RecipeRepository,
    PR: PreferencesRepository,
    I: IdentityProvider,
{
    pub fn new(ai_gateway: G, recipe_repository: RR, preferences_repository: PR, identity: I) -> Self {
        let (view, _) = watch::channel(RecipeView::default());
        Self {
            ai_gateway,
            recipe_repository,
            preferences_repository,
            identity,
            view,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<RecipeView> {
        self.view.subscribe()
    }

    pub fn snapshot(&self) -> RecipeView {
        self.view.borrow().clone()
    }

    fn user_id(&self) -> Result<String, CoreError> {
        self.identity
            .current_user_id()
            .ok_or(CoreError::Unauthenticated)
    }

    /// Move to `Retrieving` unless a retrieval is already running.
    fn begin_retrieval(&self) -> bool {
        self.view.send_if_modified(|view| {
            if view.status == RecipeStatus::Retrieving {
                return false;
            }
            view.status = RecipeStatus::Retrieving;
            view.message = None;
            true
        })
    }

    /// Finish an operation: back to idle, recording the error if any.
    fn finish<T>(&self, result: Result<T, CoreError>) -> Result<T, CoreError> {
        let message = result.as_ref().err().map(|e| {
            tracing::warn!(error = %e, "Recipe operation failed");
            e.to_string()
        });
        self.view.send_modify(|view| {
            view.status = RecipeStatus::Idle;
            if message.is_some() {
                view.message = message;
            }
        });
        result
    }

    async fn dietary_prompt(&self) -> Result<String, CoreError> {
        let Some(user_id) = self.identity.current_user_id() else {
            return Ok(DietaryPreferences::default().prompt_fragment());
        };
        let preferences = self
            .preferences_repository
            .get_preferences(user_id)
            .await?
            .unwrap_or_default();
        Ok(preferences.prompt_fragment())
    }

    async fn generate(&self, ingredients: &[Ingredient]) -> Result<Vec<Recipe>, CoreError> {
        let descriptions = ingredients.iter().map(Ingredient::describe).collect();
        let dietary_prompt = self.dietary_prompt().await?;
        let text = self
            .ai_gateway
            .generate_recipes(descriptions, dietary_prompt)
            .await?;
        Ok(decode_recipes(&text)?)
    }

    /// Generate a fresh batch from `ingredients`, replacing the current list.
    #[instrument(skip(self, ingredients), fields(ingredients = ingredients.len()))]
    pub async fn get_recipes(
        &self,
        ingredients: Vec<Ingredient>,
        scan_id: Option<String>,
    ) -> Result<(), CoreError> {
        if ingredients.is_empty() {
            let err = CoreError::validation("Add some ingredients first");
            self.view
                .send_modify(|view| view.message = Some(err.to_string()));
            return Err(err);
        }
        if !self.begin_retrieval() {
            tracing::debug!("Recipes already being retrieved, ignoring request");
            return Ok(());
        }

        match self.generate(&ingredients).await {
            Ok(recipes) => {
                tracing::info!(count = recipes.len(), "Recipes generated");
                self.view.send_modify(|view| {
                    view.current = Some(recipes);
                    view.last_ingredients_used = Some(ingredients);
                    view.source_scan_id = scan_id;
                });
                self.finish(Ok(()))
            }
            Err(e) => {
                self.view.send_modify(|view| view.current = None);
                self.finish(Err(e))
            }
        }
    }

    /// Generate another batch from the last ingredients and append it.
    ///
    /// Does nothing when the current list was loaded from storage.
    #[instrument(skip(self))]
    pub async fn load_more_if_possible(&self) -> Result<(), CoreError> {
        let Some(ingredients) = self.view.borrow().last_ingredients_used.clone() else {
            tracing::debug!("No generation context, nothing to load");
            return Ok(());
        };
        if !self.begin_retrieval() {
            return Ok(());
        }

        let result = self.generate(&ingredients).await.map(|recipes| {
            tracing::info!(count = recipes.len(), "More recipes generated");
            self.view.send_modify(|view| {
                view.current.get_or_insert_with(Vec::new).extend(recipes);
            });
        });
        self.finish(result)
    }

    /// Flip the flag locally, then persist it.
    ///
    /// A recipe that is no longer favorited leaves the favorites list. A
    /// persistence failure keeps the local flip and reports the error.
    #[instrument(skip(self))]
    pub async fn toggle_favorite(&self, recipe_id: &str) -> Result<(), CoreError> {
        let mut new_value = None;
        self.view.send_if_modified(|view| {
            if let Some(recipe) = view
                .current
                .iter_mut()
                .flatten()
                .find(|r| r.recipe_id == recipe_id)
            {
                recipe.favorited = !recipe.favorited;
                new_value = Some(recipe.favorited);
            }

            if let Some(favorites) = view.favorites.as_mut() {
                if let Some(recipe) = favorites.iter_mut().find(|r| r.recipe_id == recipe_id) {
                    recipe.favorited = !recipe.favorited;
                    new_value.get_or_insert(recipe.favorited);
                }
                favorites.retain(|r| r.favorited);
            }

            new_value.is_some()
        });

        let Some(favorited) = new_value else {
            let err = CoreError::validation("Recipe not found");
            self.view
                .send_modify(|view| view.message = Some(err.to_string()));
            return Err(err);
        };

        let result = self
            .recipe_repository
            .set_favorited(recipe_id.to_string(), favorited)
            .await;
        if let Err(e) = &result {
            tracing::error!(error = %e, recipe_id = %recipe_id, "Failed to persist favorite");
            let message = e.to_string();
            self.view.send_modify(|view| view.message = Some(message));
        }
        result
    }

    /// Persist the current batch for the signed-in user.
    #[instrument(skip(self))]
    pub async fn save_recipes(&self) -> Result<(), CoreError> {
        let (recipes, scan_id) = {
            let view = self.view.borrow();
            (
                view.current.clone().unwrap_or_default(),
                view.source_scan_id.clone(),
            )
        };
        if recipes.is_empty() {
            self.view
                .send_modify(|view| view.message = Some("No recipes to save".to_string()));
            return Ok(());
        }

        let user_id = match self.user_id() {
            Ok(user_id) => user_id,
            Err(e) => return self.finish(Err(e)),
        };

        self.view.send_modify(|view| {
            view.status = RecipeStatus::Saving;
            view.message = None;
        });
        let count = recipes.len();
        let result = self
            .recipe_repository
            .save_recipes(user_id, scan_id, recipes)
            .await;
        if result.is_ok() {
            tracing::info!(count, "Recipes saved");
            let noun = if count == 1 { "recipe" } else { "recipes" };
            self.view
                .send_modify(|view| view.message = Some(format!("Saved {count} {noun}")));
        }
        self.finish(result)
    }

    /// Load the recipes saved for the user's most recent scan.
    #[instrument(skip(self))]
    pub async fn load_saved_recipes(&self) -> Result<(), CoreError> {
        let result = match self.user_id() {
            Ok(user_id) => self.recipe_repository.list_for_latest_scan(user_id).await,
            Err(e) => Err(e),
        };
        let result = result.map(|recipes| {
            tracing::debug!(count = recipes.len(), "Loaded saved recipes");
            self.view.send_modify(|view| {
                view.source_scan_id = recipes.first().and_then(|r| r.source_scan_id.clone());
                view.current = Some(recipes);
                view.last_ingredients_used = None;
            });
        });
        self.finish(result)
    }

    /// Load one saved recipe by id as the current list.
    #[instrument(skip(self))]
    pub async fn load_recipe(&self, recipe_id: &str) -> Result<(), CoreError> {
        let result = self
            .recipe_repository
            .get_recipe(recipe_id.to_string())
            .await
            .map(|recipe| {
                self.view.send_modify(|view| {
                    view.source_scan_id = recipe.source_scan_id.clone();
                    view.current = Some(vec![recipe]);
                    view.last_ingredients_used = None;
                });
            });
        self.finish(result)
    }

    #[instrument(skip(self))]
    pub async fn load_favorites(&self) -> Result<(), CoreError> {
        let result = match self.user_id() {
            Ok(user_id) => self.recipe_repository.list_favorites(user_id).await,
            Err(e) => Err(e),
        };
        let result = result.map(|recipes| {
            tracing::debug!(count = recipes.len(), "Loaded favorite recipes");
            self.view.send_modify(|view| {
                view.favorites = Some(recipes.into_iter().filter(|r| r.favorited).collect());
            });
        });
        self.finish(result)
    }
}
