//! Row-normalization boundary.
//!
//! The store keeps `hashtags`, `image_urls` and `external_links` as JSON
//! columns, and depending on driver and column type those can come back as
//! native arrays or as JSON-encoded text. Everything past this module sees
//! one strict shape: `Vec<String>`. Parse failures degrade to an empty
//! vector, never an error.

use serde_json::Value;

/// Coerce a JSON column value into a string array.
///
/// Accepts a native array (non-string elements are skipped), a JSON-encoded
/// string containing an array, or nothing. Anything else is an empty vector.
pub fn string_array(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(elems)) => elems
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        Some(Value::String(text)) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(elems)) => elems
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Coerce a text column holding JSON into a string array. Used on the raw
/// row values the store hands back; `None`, malformed JSON and non-array
/// payloads all degrade to empty.
pub fn string_array_from_text(value: Option<&str>) -> Vec<String> {
    match value {
        Some(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(elems)) => elems
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        },
        None => Vec::new(),
    }
}

/// Serialize an optional array field for storage. `None` stays NULL so a
/// partial update can tell "not provided" from "provided empty".
pub fn to_json_column(values: Option<&Vec<String>>) -> Option<String> {
    values.map(|v| serde_json::to_string(v).unwrap_or_else(|_| "[]".to_string()))
}
