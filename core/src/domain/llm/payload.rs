use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::{common::entities::app_errors::DecodeError, llm::sanitizer::sanitize};

/// Sanitize model text and parse it as a JSON array of elements.
pub fn parse_array(raw_text: &str) -> Result<Vec<Value>, DecodeError> {
    let cleaned = sanitize(raw_text);
    let value: Value = serde_json::from_str(&cleaned)
        .map_err(|e| DecodeError::MalformedPayload(e.to_string()))?;

    match value {
        Value::Array(elements) => Ok(elements),
        other => Err(DecodeError::MalformedPayload(format!(
            "expected a JSON array, found {}",
            kind(&other)
        ))),
    }
}

/// Check `fields` on the object at `index`; `null` counts as missing.
pub fn require_fields(index: usize, element: &Value, fields: &[&str]) -> Result<(), DecodeError> {
    let Some(object) = element.as_object() else {
        return Err(DecodeError::MalformedPayload(format!(
            "element {index} is {}, expected an object",
            kind(element)
        )));
    };

    for field in fields {
        match object.get(*field) {
            None | Some(Value::Null) => {
                return Err(DecodeError::MissingField {
                    index,
                    field: (*field).to_string(),
                });
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Deserialize one already-checked element.
pub fn decode_element<T: DeserializeOwned>(index: usize, element: Value) -> Result<T, DecodeError> {
    serde_json::from_value(element)
        .map_err(|e| DecodeError::MalformedPayload(format!("element {index}: {e}")))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn object_at_top_level_is_malformed() {
        let err = parse_array("{\"name\": \"x\"}").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedPayload(m) if m.contains("an object")));
    }

    #[test]
    fn null_field_counts_as_missing() {
        let err = require_fields(1, &json!({"a": 1, "b": null}), &["a", "b"]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingField {
                index: 1,
                field: "b".to_string()
            }
        );
    }

    #[test]
    fn non_object_element_is_malformed() {
        let err = require_fields(0, &json!("tomato"), &["name"]).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedPayload(_)));
    }
}
