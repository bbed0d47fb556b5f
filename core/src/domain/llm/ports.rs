use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, scan::value_objects::CapturedImage};

/// LLM Client trait for calling AI models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn generate_with_image(
        &self,
        prompt: String,
        image: CapturedImage,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    fn generate_with_text(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// The two model calls the controllers depend on.
///
/// Both return the raw model text. An empty answer is
/// [`CoreError::NoResponse`], never an empty string.
#[cfg_attr(test, mockall::automock)]
pub trait AiGateway: Send + Sync {
    fn extract_ingredients(
        &self,
        image: CapturedImage,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    fn generate_recipes(
        &self,
        ingredient_descriptions: Vec<String>,
        dietary_prompt: String,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}
