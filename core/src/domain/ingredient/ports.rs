use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, ingredient::entities::Ingredient};

/// Ingredient documents, stored under their owning scan.
#[cfg_attr(test, mockall::automock)]
pub trait IngredientRepository: Send + Sync {
    /// Insert a batch, returning the records with ids assigned, in input order.
    fn create_ingredients(
        &self,
        scan_id: String,
        ingredients: Vec<Ingredient>,
    ) -> impl Future<Output = Result<Vec<Ingredient>, CoreError>> + Send;

    fn create_ingredient(
        &self,
        scan_id: String,
        ingredient: Ingredient,
    ) -> impl Future<Output = Result<Ingredient, CoreError>> + Send;

    fn update_ingredient(
        &self,
        scan_id: String,
        ingredient: Ingredient,
    ) -> impl Future<Output = Result<Ingredient, CoreError>> + Send;

    fn delete_ingredient(
        &self,
        scan_id: String,
        ingredient_id: String,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Newest first.
    fn list_by_scan(
        &self,
        scan_id: String,
    ) -> impl Future<Output = Result<Vec<Ingredient>, CoreError>> + Send;
}
