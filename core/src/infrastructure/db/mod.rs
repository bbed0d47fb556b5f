pub mod postgres;

use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::domain::common::entities::app_errors::CoreError;

/// Ids cross the ports as strings; an id that is not a UUID cannot exist.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, CoreError> {
    Uuid::parse_str(raw).map_err(|_| {
        tracing::debug!(id = %raw, "Rejecting malformed id");
        CoreError::NotFound
    })
}

pub(crate) fn persistence_error(context: &str, e: impl std::fmt::Display) -> CoreError {
    tracing::error!("{}: {}", context, e);
    CoreError::Persistence(format!("{context}: {e}"))
}

/// Decode a jsonb column; an unreadable value is logged and read as empty.
pub(crate) fn json_column<T>(column: &str, value: &serde_json::Value) -> T
where
    T: DeserializeOwned + Default,
{
    serde_json::from_value(value.clone()).unwrap_or_else(|e| {
        tracing::warn!(column = %column, error = %e, "Unreadable jsonb column, using empty value");
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn malformed_ids_are_not_found() {
        assert_eq!(parse_id("scan-1").unwrap_err(), CoreError::NotFound);
        assert!(parse_id("0190b7a0-6a4c-7cc1-a0f4-3a3c2c3b9c10").is_ok());
    }

    #[test]
    fn persistence_errors_keep_the_adapter_message() {
        let err = persistence_error("Failed to list ingredients", "connection reset");
        assert_eq!(
            err.to_string(),
            "Failed to list ingredients: connection reset"
        );
    }

    #[test]
    fn unreadable_json_columns_read_as_empty() {
        let steps: Vec<String> = json_column("steps", &json!({"not": "a list"}));
        assert!(steps.is_empty());

        let steps: Vec<String> = json_column("steps", &json!(["Boil", "Drain"]));
        assert_eq!(steps, ["Boil", "Drain"]);
    }
}
