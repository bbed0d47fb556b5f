use std::sync::Arc;

use crate::{
    domain::{
        common::PantryLensConfig, ingredient::controller::IngredientController,
        llm::services::PromptingGateway, preferences::services::PreferencesService,
        recipe::controller::RecipeController, scan::services::ScanService,
    },
    infrastructure::{
        db::postgres::Postgres,
        identity::StaticIdentity,
        ingredient::repositories::ingredient_repository::PostgresIngredientRepository,
        llm::gemini_client::GeminiLLMClient,
        object_storage::minio::MinioObjectStorage,
        preferences::repositories::preferences_repository::PostgresPreferencesRepository,
        recipe::repositories::recipe_repository::PostgresRecipeRepository,
        scan::repositories::scan_repository::PostgresScanRepository,
    },
};

pub type DefaultAiGateway = PromptingGateway<GeminiLLMClient>;
pub type DefaultScanService =
    ScanService<MinioObjectStorage, PostgresScanRepository, StaticIdentity>;
pub type DefaultIngredientController =
    IngredientController<DefaultAiGateway, PostgresIngredientRepository>;
pub type DefaultRecipeController = RecipeController<
    DefaultAiGateway,
    PostgresRecipeRepository,
    PostgresPreferencesRepository,
    StaticIdentity,
>;
pub type DefaultPreferencesService =
    PreferencesService<PostgresPreferencesRepository, StaticIdentity>;

/// Everything a front-end needs, wired to the production adapters.
#[derive(Clone)]
pub struct PantryLensService {
    pub scans: DefaultScanService,
    pub ingredients: Arc<DefaultIngredientController>,
    pub recipes: Arc<DefaultRecipeController>,
    pub preferences: DefaultPreferencesService,
}

pub async fn create_service(
    config: PantryLensConfig,
    user_id: Option<String>,
) -> Result<PantryLensService, anyhow::Error> {
    let postgres = Postgres::new(&config.database).await?;

    let object_storage = MinioObjectStorage::new(config.object_storage);
    object_storage.ensure_bucket().await?;

    let identity = StaticIdentity::new(user_id);
    let gateway = PromptingGateway::new(GeminiLLMClient::from_config(&config.llm));
    let preferences_repository = PostgresPreferencesRepository::new(postgres.get_db());

    Ok(PantryLensService {
        scans: ScanService::new(
            object_storage,
            PostgresScanRepository::new(postgres.get_db()),
            identity.clone(),
        ),
        ingredients: Arc::new(IngredientController::new(
            gateway.clone(),
            PostgresIngredientRepository::new(postgres.get_db()),
        )),
        recipes: Arc::new(RecipeController::new(
            gateway,
            PostgresRecipeRepository::new(postgres.get_db()),
            preferences_repository.clone(),
            identity.clone(),
        )),
        preferences: PreferencesService::new(preferences_repository, identity),
    })
}
