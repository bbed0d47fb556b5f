use serde::Deserialize;

use crate::domain::{
    common::entities::app_errors::DecodeError,
    ingredient::{entities::Ingredient, value_objects::IngredientCategory},
    llm::payload::{decode_element, parse_array, require_fields},
};

const REQUIRED_FIELDS: [&str; 4] = ["name", "quantity", "unit", "category"];

#[derive(Debug, Deserialize)]
struct RawIngredient {
    name: String,
    #[serde(deserialize_with = "quantity_text")]
    quantity: String,
    unit: String,
    category: IngredientCategory,
}

/// Models sometimes emit `"quantity": 2`; keep it as text either way.
fn quantity_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Quantity {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Quantity::deserialize(deserializer)? {
        Quantity::Text(text) => text,
        Quantity::Number(number) => number.to_string(),
    })
}

/// Decode model output into ingredients, all or nothing.
///
/// Categories go through [`normalize_category`](super::normalize_category),
/// so an odd category never fails the batch. Ids are left empty for the
/// persistence layer to fill.
pub fn decode_ingredients(raw_text: &str) -> Result<Vec<Ingredient>, DecodeError> {
    let elements = parse_array(raw_text)?;

    let mut ingredients = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        require_fields(index, &element, &REQUIRED_FIELDS)?;
        let raw: RawIngredient = decode_element(index, element)?;
        ingredients.push(Ingredient {
            id: None,
            name: raw.name,
            quantity: raw.quantity,
            unit: raw.unit,
            category: raw.category,
        });
    }

    tracing::debug!(count = ingredients.len(), "Decoded ingredients");
    Ok(ingredients)
}
