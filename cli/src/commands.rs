use std::path::Path;

use anyhow::{Context, bail};
use bytes::Bytes;
use pantrylens_core::{
    application::PantryLensService,
    domain::{
        ingredient::value_objects::IngredientForm,
        preferences::entities::DietaryPreferences,
        scan::value_objects::CapturedImage,
    },
};
use tracing::instrument;

use crate::{
    args::{Command, PreferencesCommand},
    render,
};

pub async fn run(service: &PantryLensService, command: &Command) -> anyhow::Result<()> {
    match command {
        Command::Scan { images } => scan(service, images).await,
        Command::Ingredients { scan_id } => ingredients(service, scan_id.clone()).await,
        Command::AddIngredient {
            scan_id,
            name,
            quantity,
            unit,
            category,
        } => {
            let form = IngredientForm::new(name.as_str(), quantity.as_str(), *unit, *category);
            add_ingredient(service, scan_id.clone(), form).await
        }
        Command::RemoveIngredient {
            scan_id,
            ingredient_id,
        } => remove_ingredient(service, scan_id.clone(), ingredient_id).await,
        Command::Recipes {
            scan_id,
            more,
            save,
        } => recipes(service, scan_id.clone(), *more, *save).await,
        Command::Saved => {
            service.recipes.load_saved_recipes().await?;
            print!("{}", render::recipes(&service.recipes.snapshot()));
            Ok(())
        }
        Command::Favorites => {
            service.recipes.load_favorites().await?;
            print!("{}", render::favorites(&service.recipes.snapshot()));
            Ok(())
        }
        Command::Favorite { recipe_id } => favorite(service, recipe_id).await,
        Command::Preferences { action } => preferences(service, action).await,
    }
}

/// Read a photo from disk; the type comes from the file extension.
pub fn read_image(path: &Path) -> anyhow::Result<CapturedImage> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let mime_type = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "heic" => "image/heic",
        _ => bail!("{} is not a supported image (jpg, png, webp, heic)", path.display()),
    };

    let data = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    Ok(CapturedImage::new(Bytes::from(data), mime_type))
}

async fn resolve_scan_id(
    service: &PantryLensService,
    scan_id: Option<String>,
) -> anyhow::Result<String> {
    if let Some(scan_id) = scan_id {
        return Ok(service.scans.get_scan(&scan_id).await?.id);
    }
    match service.scans.latest_scan().await? {
        Some(scan) => Ok(scan.id),
        None => bail!("No scans yet, run `pantrylens scan <photos>` first"),
    }
}

#[instrument(skip(service))]
async fn scan(
    service: &PantryLensService,
    paths: &[std::path::PathBuf],
) -> anyhow::Result<()> {
    let images = paths
        .iter()
        .map(|path| read_image(path))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let scan = service.scans.create_scan(images.clone()).await?;
    println!("Scan {} uploaded ({} photos)", scan.id, scan.image_paths.len());

    let analysis = service
        .ingredients
        .analyze_images(images, scan.id.clone())
        .await;
    print!("{}", render::ingredients(&service.ingredients.snapshot()));
    analysis?;
    Ok(())
}

async fn ingredients(service: &PantryLensService, scan_id: Option<String>) -> anyhow::Result<()> {
    let scan_id = resolve_scan_id(service, scan_id).await?;
    service.ingredients.load_ingredients(scan_id).await?;
    print!("{}", render::ingredients(&service.ingredients.snapshot()));
    Ok(())
}

async fn add_ingredient(
    service: &PantryLensService,
    scan_id: Option<String>,
    form: IngredientForm,
) -> anyhow::Result<()> {
    let scan_id = resolve_scan_id(service, scan_id).await?;
    service.ingredients.load_ingredients(scan_id).await?;
    service.ingredients.add_ingredient(form).await?;
    print!("{}", render::ingredients(&service.ingredients.snapshot()));
    Ok(())
}

async fn remove_ingredient(
    service: &PantryLensService,
    scan_id: Option<String>,
    ingredient_id: &str,
) -> anyhow::Result<()> {
    let scan_id = resolve_scan_id(service, scan_id).await?;
    service.ingredients.load_ingredients(scan_id).await?;

    let ingredient = service
        .ingredients
        .current_ingredients()
        .unwrap_or_default()
        .into_iter()
        .find(|i| i.id.as_deref() == Some(ingredient_id))
        .with_context(|| format!("No ingredient {ingredient_id} in this scan"))?;

    service.ingredients.delete_ingredient(&ingredient).await?;
    print!("{}", render::ingredients(&service.ingredients.snapshot()));
    Ok(())
}

async fn recipes(
    service: &PantryLensService,
    scan_id: Option<String>,
    more: u32,
    save: bool,
) -> anyhow::Result<()> {
    let scan_id = resolve_scan_id(service, scan_id).await?;
    service.ingredients.load_ingredients(scan_id.clone()).await?;
    let ingredients = service.ingredients.current_ingredients().unwrap_or_default();

    service
        .recipes
        .get_recipes(ingredients, Some(scan_id))
        .await?;
    for _ in 0..more {
        service.recipes.load_more_if_possible().await?;
    }
    if save {
        service.recipes.save_recipes().await?;
    }

    print!("{}", render::recipes(&service.recipes.snapshot()));
    Ok(())
}

async fn favorite(service: &PantryLensService, recipe_id: &str) -> anyhow::Result<()> {
    // the toggle works on recipes the controller already holds
    service.recipes.load_recipe(recipe_id).await?;
    service.recipes.load_favorites().await?;
    service.recipes.toggle_favorite(recipe_id).await?;

    let view = service.recipes.snapshot();
    let favorited = view
        .current
        .iter()
        .flatten()
        .chain(view.favorites.iter().flatten())
        .any(|r| r.recipe_id == recipe_id && r.favorited);
    if favorited {
        println!("Added {recipe_id} to favorites");
    } else {
        println!("Removed {recipe_id} from favorites");
    }
    Ok(())
}

async fn preferences(
    service: &PantryLensService,
    action: &PreferencesCommand,
) -> anyhow::Result<()> {
    let preferences = match action {
        PreferencesCommand::Show => service.preferences.get().await?,
        PreferencesCommand::Set {
            diets,
            allergies,
            disliked,
            max_cook_minutes,
        } => {
            let defaults = DietaryPreferences::default();
            service
                .preferences
                .save(DietaryPreferences {
                    diet_types: diets.iter().copied().collect(),
                    allergies: allergies.iter().copied().collect(),
                    disliked_ingredients: disliked.clone(),
                    max_cook_minutes: max_cook_minutes.unwrap_or(defaults.max_cook_minutes),
                })
                .await?
        }
    };

    print!("{}", render::preferences(&preferences));
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn unsupported_extension_is_rejected_before_reading() {
        let err = read_image(&PathBuf::from("/does/not/exist/notes.txt")).unwrap_err();
        assert!(err.to_string().contains("not a supported image"));
    }

    #[test]
    fn image_type_follows_extension() {
        let path = std::env::temp_dir().join(format!("pantrylens-{}.PNG", std::process::id()));
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let image = read_image(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data.len(), 4);
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = read_image(&PathBuf::from("/does/not/exist/photo.jpg")).unwrap_err();
        assert!(err.to_string().contains("/does/not/exist/photo.jpg"));
    }
}
