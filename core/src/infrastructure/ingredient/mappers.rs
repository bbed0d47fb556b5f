use crate::{
    domain::ingredient::{entities::Ingredient, value_objects::normalize_category},
    entity::ingredients,
};

impl From<&ingredients::Model> for Ingredient {
    fn from(model: &ingredients::Model) -> Self {
        Self {
            id: Some(model.id.to_string()),
            name: model.name.clone(),
            quantity: model.quantity.clone(),
            unit: model.unit.clone(),
            category: normalize_category(&model.category),
        }
    }
}

impl From<ingredients::Model> for Ingredient {
    fn from(model: ingredients::Model) -> Self {
        Self::from(&model)
    }
}
