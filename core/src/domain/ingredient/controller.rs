use std::sync::atomic::{AtomicU64, Ordering};

use futures::future::try_join_all;
use tokio::sync::watch;
use tracing::instrument;

use crate::domain::{
    common::entities::app_errors::CoreError,
    ingredient::{
        entities::Ingredient, ports::IngredientRepository, services::decode_ingredients,
        value_objects::IngredientForm,
    },
    llm::ports::AiGateway,
    scan::value_objects::CapturedImage,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IngredientState {
    #[default]
    Idle,
    Analyzing,
    /// The current ingredient list, newest manual additions first.
    Ready(Vec<Ingredient>),
    Failed(String),
}

/// What the presentation layer observes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IngredientView {
    pub state: IngredientState,
    pub scan_id: Option<String>,
    /// Last error from an add, update, delete or load.
    pub message: Option<String>,
}

impl IngredientView {
    pub fn ingredients(&self) -> Option<&[Ingredient]> {
        match &self.state {
            IngredientState::Ready(ingredients) => Some(ingredients),
            _ => None,
        }
    }
}

/// Drives image analysis and ingredient edits for one scan at a time.
pub struct IngredientController<G, IR> {
    ai_gateway: G,
    ingredient_repository: IR,
    view: watch::Sender<IngredientView>,
    // bumped by every analysis and by reset(); a finished analysis whose
    // number is no longer current is discarded
    generation: AtomicU64,
}

impl<G, IR> IngredientController<G, IR>
where
    G: AiGateway,
    IR: IngredientRepository,
{
    pub fn new(ai_gateway: G, ingredient_repository: IR) -> Self {
        let (view, _) = watch::channel(IngredientView::default());
        Self {
            ai_gateway,
            ingredient_repository,
            view,
            generation: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<IngredientView> {
        self.view.subscribe()
    }

    pub fn snapshot(&self) -> IngredientView {
        self.view.borrow().clone()
    }

    pub fn current_ingredients(&self) -> Option<Vec<Ingredient>> {
        self.view.borrow().ingredients().map(<[Ingredient]>::to_vec)
    }

    pub fn current_scan_id(&self) -> Option<String> {
        self.view.borrow().scan_id.clone()
    }

    fn is_analyzing(&self) -> bool {
        self.view.borrow().state == IngredientState::Analyzing
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Extract ingredients from every image concurrently and persist them.
    ///
    /// A call while an analysis is running does nothing. Any failed image
    /// fails the whole scan and no partial list is kept.
    #[instrument(skip(self, images), fields(images = images.len()))]
    pub async fn analyze_images(
        &self,
        images: Vec<CapturedImage>,
        scan_id: String,
    ) -> Result<(), CoreError> {
        if images.is_empty() {
            return self.surface(Err(CoreError::validation("Capture at least one photo")));
        }

        // the generation is taken under the view lock so a reset cannot slip in
        let mut generation = None;
        self.view.send_if_modified(|view| {
            if view.state == IngredientState::Analyzing {
                return false;
            }
            generation = Some(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
            view.state = IngredientState::Analyzing;
            view.scan_id = Some(scan_id.clone());
            view.message = None;
            true
        });
        let Some(generation) = generation else {
            tracing::debug!("Analysis already running, ignoring request");
            return Ok(());
        };

        let outcome = self.run_analysis(images, &scan_id, generation).await;

        if !self.is_current(generation) {
            tracing::warn!(scan_id = %scan_id, "Discarding stale analysis result");
            return Ok(());
        }

        match outcome {
            Ok(Some(ingredients)) => {
                tracing::info!(scan_id = %scan_id, count = ingredients.len(), "Analysis succeeded");
                self.view.send_modify(|view| {
                    view.state = IngredientState::Ready(ingredients);
                });
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) => {
                tracing::error!(error = %e, scan_id = %scan_id, "Analysis failed");
                self.view.send_modify(|view| {
                    view.state = IngredientState::Failed(e.to_string());
                });
                Err(e)
            }
        }
    }

    async fn run_analysis(
        &self,
        images: Vec<CapturedImage>,
        scan_id: &str,
        generation: u64,
    ) -> Result<Option<Vec<Ingredient>>, CoreError> {
        let per_image = try_join_all(images.into_iter().map(|image| async move {
            let text = self.ai_gateway.extract_ingredients(image).await?;
            Ok::<_, CoreError>(decode_ingredients(&text)?)
        }))
        .await?;

        if !self.is_current(generation) {
            return Ok(None);
        }

        let ingredients: Vec<Ingredient> = per_image.into_iter().flatten().collect();
        let persisted = self
            .ingredient_repository
            .create_ingredients(scan_id.to_string(), ingredients)
            .await?;
        Ok(Some(persisted))
    }

    /// Back to idle; any analysis still in flight will be discarded.
    pub fn reset(&self) {
        self.view.send_modify(|view| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            *view = IngredientView::default();
        });
    }

    /// Make a scan current without loading its ingredients.
    pub fn select_scan(&self, scan_id: String) -> Result<(), CoreError> {
        self.ensure_not_analyzing()?;
        self.view.send_replace(IngredientView {
            state: IngredientState::Idle,
            scan_id: Some(scan_id),
            message: None,
        });
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn load_ingredients(&self, scan_id: String) -> Result<(), CoreError> {
        self.ensure_not_analyzing()?;
        let ingredients = self
            .surface(self.ingredient_repository.list_by_scan(scan_id.clone()).await)?;

        self.view.send_replace(IngredientView {
            state: IngredientState::Ready(ingredients),
            scan_id: Some(scan_id),
            message: None,
        });
        Ok(())
    }

    /// Persist first, then put the new ingredient at the front of the list.
    #[instrument(skip(self))]
    pub async fn add_ingredient(&self, form: IngredientForm) -> Result<(), CoreError> {
        let scan_id = self.surface(self.editable_scan())?;
        self.surface(form.validate())?;

        let created = self.surface(
            self.ingredient_repository
                .create_ingredient(scan_id, form.into_ingredient(None))
                .await,
        )?;

        self.view.send_modify(|view| {
            view.message = None;
            match &mut view.state {
                IngredientState::Ready(ingredients) => ingredients.insert(0, created),
                state => *state = IngredientState::Ready(vec![created]),
            }
        });
        Ok(())
    }

    /// Replace the fields of a persisted ingredient with the form values.
    #[instrument(skip(self))]
    pub async fn update_ingredient(
        &self,
        ingredient: &Ingredient,
        form: IngredientForm,
    ) -> Result<(), CoreError> {
        let scan_id = self.surface(self.editable_scan())?;
        let id = self.surface(ingredient_id(ingredient))?;
        self.surface(form.validate())?;

        let updated = self.surface(
            self.ingredient_repository
                .update_ingredient(scan_id, form.into_ingredient(Some(id.clone())))
                .await,
        )?;

        self.view.send_modify(|view| {
            view.message = None;
            if let IngredientState::Ready(ingredients) = &mut view.state {
                if let Some(slot) = ingredients
                    .iter_mut()
                    .find(|i| i.id.as_deref() == Some(id.as_str()))
                {
                    *slot = updated;
                }
            }
        });
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_ingredient(&self, ingredient: &Ingredient) -> Result<(), CoreError> {
        let scan_id = self.surface(self.editable_scan())?;
        let id = self.surface(ingredient_id(ingredient))?;

        self.surface(
            self.ingredient_repository
                .delete_ingredient(scan_id, id.clone())
                .await,
        )?;

        self.view.send_modify(|view| {
            view.message = None;
            if let IngredientState::Ready(ingredients) = &mut view.state {
                ingredients.retain(|i| i.id.as_deref() != Some(id.as_str()));
            }
        });
        Ok(())
    }

    fn ensure_not_analyzing(&self) -> Result<(), CoreError> {
        if self.is_analyzing() {
            return Err(CoreError::validation("Analysis in progress"));
        }
        Ok(())
    }

    fn editable_scan(&self) -> Result<String, CoreError> {
        self.ensure_not_analyzing()?;
        self.current_scan_id()
            .ok_or_else(|| CoreError::validation("No scan selected"))
    }

    /// Record an error on the view before handing it back.
    fn surface<T>(&self, result: Result<T, CoreError>) -> Result<T, CoreError> {
        if let Err(e) = &result {
            tracing::warn!(error = %e, "Ingredient operation failed");
            let message = e.to_string();
            self.view.send_modify(|view| view.message = Some(message));
        }
        result
    }
}

fn ingredient_id(ingredient: &Ingredient) -> Result<String, CoreError> {
    ingredient
        .id
        .clone()
        .ok_or_else(|| CoreError::validation("Ingredient has no id"))
}
