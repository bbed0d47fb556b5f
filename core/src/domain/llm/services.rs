use tracing::instrument;

use crate::domain::{
    common::entities::app_errors::CoreError,
    llm::{
        ports::{AiGateway, LLMClient},
        prompts::{render_extraction_prompt, render_recipe_prompt},
        schema::{get_ingredient_schema, get_recipe_schema},
    },
    scan::value_objects::CapturedImage,
};

/// [`AiGateway`] that builds the fixed prompts and delegates to an [`LLMClient`].
#[derive(Debug, Clone)]
pub struct PromptingGateway<L> {
    llm_client: L,
}

impl<L: LLMClient> PromptingGateway<L> {
    pub fn new(llm_client: L) -> Self {
        Self { llm_client }
    }
}

fn non_empty(text: String) -> Result<String, CoreError> {
    if text.trim().is_empty() {
        tracing::warn!("LLM returned an empty response");
        return Err(CoreError::NoResponse);
    }
    Ok(text)
}

impl<L: LLMClient> AiGateway for PromptingGateway<L> {
    #[instrument(skip(self, image), fields(image_size = image.data.len()))]
    async fn extract_ingredients(&self, image: CapturedImage) -> Result<String, CoreError> {
        let prompt = render_extraction_prompt();
        let text = self
            .llm_client
            .generate_with_image(prompt, image, get_ingredient_schema())
            .await?;
        non_empty(text)
    }

    #[instrument(skip(self, ingredient_descriptions, dietary_prompt), fields(ingredients = ingredient_descriptions.len()))]
    async fn generate_recipes(
        &self,
        ingredient_descriptions: Vec<String>,
        dietary_prompt: String,
    ) -> Result<String, CoreError> {
        let prompt = render_recipe_prompt(&ingredient_descriptions, &dietary_prompt);
        tracing::debug!(prompt_len = prompt.len(), "Requesting recipes");
        let text = self
            .llm_client
            .generate_with_text(prompt, get_recipe_schema())
            .await?;
        non_empty(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::ports::MockLLMClient;

    #[tokio::test]
    async fn blank_model_text_is_no_response() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_image()
            .returning(|_, _, _| Box::pin(async { Ok("  \n ".to_string()) }));

        let gateway = PromptingGateway::new(llm);
        let err = gateway
            .extract_ingredients(CapturedImage::jpeg(vec![1, 2, 3]))
            .await
            .unwrap_err();
        assert_eq!(err, CoreError::NoResponse);
    }

    #[tokio::test]
    async fn recipe_prompt_carries_ingredients_and_preferences() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_text()
            .withf(|prompt, _| prompt.contains("- 2 cup rice") && prompt.contains("vegan"))
            .times(1)
            .returning(|_, _| Box::pin(async { Ok("[]".to_string()) }));

        let gateway = PromptingGateway::new(llm);
        let text = gateway
            .generate_recipes(
                vec!["2 cup rice".to_string()],
                "Follow these diets: vegan.".to_string(),
            )
            .await
            .unwrap();
        assert_eq!(text, "[]");
    }

    #[tokio::test]
    async fn transport_errors_pass_through() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_text().returning(|_, _| {
            Box::pin(async { Err(CoreError::ExternalService("503".to_string())) })
        });

        let gateway = PromptingGateway::new(llm);
        let err = gateway
            .generate_recipes(vec![], String::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ExternalService(_)));
    }
}
