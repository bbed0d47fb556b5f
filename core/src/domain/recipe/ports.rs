use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, recipe::entities::Recipe};

#[cfg_attr(test, mockall::automock)]
pub trait RecipeRepository: Send + Sync {
    /// Store a batch owned by `user_id`, tagged with the scan it came from.
    fn save_recipes(
        &self,
        user_id: String,
        scan_id: Option<String>,
        recipes: Vec<Recipe>,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn set_favorited(
        &self,
        recipe_id: String,
        favorited: bool,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// A saved recipe by id; `NotFound` when no row exists.
    fn get_recipe(
        &self,
        recipe_id: String,
    ) -> impl Future<Output = Result<Recipe, CoreError>> + Send;

    /// Recipes tagged with the user's most recent scan.
    fn list_for_latest_scan(
        &self,
        user_id: String,
    ) -> impl Future<Output = Result<Vec<Recipe>, CoreError>> + Send;

    /// Favorited recipes, newest first.
    fn list_favorites(
        &self,
        user_id: String,
    ) -> impl Future<Output = Result<Vec<Recipe>, CoreError>> + Send;
}
