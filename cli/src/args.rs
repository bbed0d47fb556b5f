use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use pantrylens_core::domain::{
    common::{DatabaseConfig, LLMConfig, ObjectStorageConfig, PantryLensConfig},
    ingredient::value_objects::{IngredientCategory, MeasurementUnit},
    preferences::entities::{AllergyType, DietType},
};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "pantrylens",
    version,
    about = "Photograph your ingredients, get recipes that fit your diet"
)]
pub struct Args {
    #[command(flatten)]
    pub db: DatabaseArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub object_storage: ObjectStorageArgs,

    /// Id of the signed-in user
    #[arg(long, env = "PANTRYLENS_USER_ID", global = true)]
    pub user_id: Option<String>,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON", global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct DatabaseArgs {
    #[arg(long = "database-host", env = "DATABASE_HOST", default_value = "localhost")]
    pub host: String,

    #[arg(long = "database-port", env = "DATABASE_PORT", default_value_t = 5432)]
    pub port: u16,

    #[arg(long = "database-user", env = "DATABASE_USER", default_value = "postgres")]
    pub user: String,

    #[arg(
        long = "database-password",
        env = "DATABASE_PASSWORD",
        default_value = "postgres",
        hide_env_values = true
    )]
    pub password: String,

    #[arg(long = "database-name", env = "DATABASE_NAME", default_value = "pantrylens")]
    pub name: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(long, env = "GEMINI_API_KEY", default_value = "", hide_env_values = true)]
    pub gemini_api_key: String,

    #[arg(long, env = "GEMINI_MODEL", default_value = "gemini-2.0-flash")]
    pub gemini_model: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ObjectStorageArgs {
    #[arg(long = "minio-endpoint", env = "MINIO_ENDPOINT", default_value = "http://localhost:9000")]
    pub endpoint: String,

    #[arg(long = "minio-region", env = "MINIO_REGION", default_value = "us-east-1")]
    pub region: String,

    #[arg(long = "minio-access-key", env = "MINIO_ACCESS_KEY", default_value = "minioadmin")]
    pub access_key: String,

    #[arg(
        long = "minio-secret-key",
        env = "MINIO_SECRET_KEY",
        default_value = "minioadmin",
        hide_env_values = true
    )]
    pub secret_key: String,

    #[arg(long = "minio-bucket", env = "MINIO_BUCKET", default_value = "pantrylens-scans")]
    pub bucket: String,

    #[arg(long = "minio-use-ssl", env = "MINIO_USE_SSL")]
    pub use_ssl: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Upload 1 to 5 photos as a new scan and extract its ingredients
    Scan {
        #[arg(required = true, num_args = 1..=5)]
        images: Vec<PathBuf>,
    },

    /// List the ingredients of a scan (latest scan by default)
    Ingredients {
        #[arg(long)]
        scan_id: Option<String>,
    },

    /// Add an ingredient by hand
    AddIngredient {
        #[arg(long)]
        scan_id: Option<String>,

        name: String,

        quantity: String,

        #[arg(value_parser = parse_unit)]
        unit: MeasurementUnit,

        #[arg(long, default_value = "other", value_parser = parse_category)]
        category: IngredientCategory,
    },

    /// Delete an ingredient from a scan
    RemoveIngredient {
        #[arg(long)]
        scan_id: Option<String>,

        ingredient_id: String,
    },

    /// Generate recipes from a scan's ingredients
    Recipes {
        #[arg(long)]
        scan_id: Option<String>,

        /// Extra batches to generate after the first
        #[arg(long, default_value_t = 0)]
        more: u32,

        /// Keep the generated recipes
        #[arg(long)]
        save: bool,
    },

    /// Show recipes saved for the latest scan
    Saved,

    /// Show favorite recipes
    Favorites,

    /// Toggle the favorite flag of a saved recipe
    Favorite { recipe_id: String },

    /// Show or change dietary preferences
    Preferences {
        #[command(subcommand)]
        action: PreferencesCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum PreferencesCommand {
    Show,

    /// Replace the stored preferences
    Set {
        #[arg(long = "diet", value_parser = parse_diet)]
        diets: Vec<DietType>,

        #[arg(long = "allergy", value_parser = parse_allergy)]
        allergies: Vec<AllergyType>,

        #[arg(long = "dislike")]
        disliked: Vec<String>,

        #[arg(long)]
        max_cook_minutes: Option<u32>,
    },
}

fn parse_unit(raw: &str) -> Result<MeasurementUnit, String> {
    MeasurementUnit::parse(raw).ok_or_else(|| {
        format!(
            "unknown unit `{raw}`, expected one of: {}",
            MeasurementUnit::vocabulary().join(", ")
        )
    })
}

fn parse_category(raw: &str) -> Result<IngredientCategory, String> {
    Ok(IngredientCategory::from(raw))
}

fn parse_diet(raw: &str) -> Result<DietType, String> {
    DietType::parse(raw).ok_or_else(|| {
        let known: Vec<&str> = DietType::ALL.iter().map(DietType::as_str).collect();
        format!("unknown diet `{raw}`, expected one of: {}", known.join(", "))
    })
}

fn parse_allergy(raw: &str) -> Result<AllergyType, String> {
    AllergyType::parse(raw).ok_or_else(|| {
        let known: Vec<&str> = AllergyType::ALL.iter().map(AllergyType::as_str).collect();
        format!("unknown allergy `{raw}`, expected one of: {}", known.join(", "))
    })
}

impl From<Args> for PantryLensConfig {
    fn from(args: Args) -> Self {
        Self {
            database: DatabaseConfig {
                host: args.db.host,
                port: args.db.port,
                username: args.db.user,
                password: args.db.password,
                name: args.db.name,
            },
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
            },
            object_storage: ObjectStorageConfig {
                endpoint: args.object_storage.endpoint,
                region: args.object_storage.region,
                access_key: args.object_storage.access_key,
                secret_key: args.object_storage.secret_key,
                bucket: args.object_storage.bucket,
                use_ssl: args.object_storage.use_ssl,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn add_ingredient_accepts_unit_spellings() {
        let args = parse(&[
            "pantrylens",
            "add-ingredient",
            "Garlic",
            "3",
            "cloves",
            "--category",
            "veggies",
        ]);
        match args.command {
            Command::AddIngredient {
                name,
                unit,
                category,
                scan_id,
                ..
            } => {
                assert_eq!(name, "Garlic");
                assert_eq!(unit, MeasurementUnit::Clove);
                assert_eq!(category, IngredientCategory::Vegetables);
                assert_eq!(scan_id, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn unknown_unit_is_rejected() {
        let result = Args::try_parse_from(["pantrylens", "add-ingredient", "Rice", "1", "handful"]);
        assert!(result.is_err());
    }

    #[test]
    fn scan_takes_at_most_five_images() {
        assert!(Args::try_parse_from(["pantrylens", "scan"]).is_err());
        assert!(
            Args::try_parse_from(["pantrylens", "scan", "1", "2", "3", "4", "5", "6"]).is_err()
        );
        let args = parse(&["pantrylens", "scan", "a.jpg", "b.png"]);
        assert!(matches!(args.command, Command::Scan { images } if images.len() == 2));
    }

    #[test]
    fn recipes_flags() {
        let args = parse(&["pantrylens", "recipes", "--more", "2", "--save"]);
        assert!(matches!(
            args.command,
            Command::Recipes { more: 2, save: true, scan_id: None }
        ));
    }

    #[test]
    fn preferences_set_collects_repeated_flags() {
        let args = parse(&[
            "pantrylens",
            "preferences",
            "set",
            "--diet",
            "vegan",
            "--diet",
            "low carb",
            "--allergy",
            "tree-nuts",
            "--dislike",
            "olives",
            "--max-cook-minutes",
            "30",
        ]);
        match args.command {
            Command::Preferences {
                action:
                    PreferencesCommand::Set {
                        diets,
                        allergies,
                        disliked,
                        max_cook_minutes,
                    },
            } => {
                assert_eq!(diets, [DietType::Vegan, DietType::LowCarb]);
                assert_eq!(allergies, [AllergyType::TreeNuts]);
                assert_eq!(disliked, ["olives"]);
                assert_eq!(max_cook_minutes, Some(30));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn config_maps_connection_flags() {
        let args = parse(&[
            "pantrylens",
            "--database-host",
            "db",
            "--database-port",
            "6543",
            "--minio-bucket",
            "photos",
            "--user-id",
            "user-1",
            "saved",
        ]);
        assert_eq!(args.user_id.as_deref(), Some("user-1"));

        let config = PantryLensConfig::from(args);
        assert_eq!(config.database.host, "db");
        assert_eq!(config.database.port, 6543);
        assert_eq!(config.object_storage.bucket, "photos");
        assert!(config.database.url().starts_with("postgres://"));
    }
}
