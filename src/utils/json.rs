use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::errors::AppError;

/// Lowercases every object key, recursively.
///
/// The API is not consistent about property casing (`Data`, `data`,
/// `totalPages`, `TotalPages`), so payloads are folded before being decoded
/// into structs that use lowercase names.
pub fn fold_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key.to_lowercase(), fold_keys(value)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(fold_keys).collect()),
        other => other,
    }
}

/// Decodes a body with case-insensitive property matching.
pub fn from_str_case_insensitive<T: DeserializeOwned>(body: &str) -> Result<T, AppError> {
    let value: Value = serde_json::from_str(body)?;
    Ok(serde_json::from_value(fold_keys(value))?)
}
