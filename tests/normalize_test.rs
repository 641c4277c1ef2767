use news_portal::normalize::{string_array, string_array_from_text, to_json_column};
use serde_json::json;

#[test]
fn native_array_passes_through() {
    let value = json!(["AI", "Research"]);
    assert_eq!(string_array(Some(&value)), vec!["AI", "Research"]);
}

#[test]
fn json_encoded_text_is_parsed() {
    let value = json!("[\"AI\",\"Research\"]");
    assert_eq!(string_array(Some(&value)), vec!["AI", "Research"]);
}

#[test]
fn malformed_payloads_degrade_to_empty() {
    assert!(string_array(None).is_empty());
    assert!(string_array(Some(&json!("not json at all"))).is_empty());
    assert!(string_array(Some(&json!("{\"a\":1}"))).is_empty());
    assert!(string_array(Some(&json!(42))).is_empty());
    assert!(string_array(Some(&json!({"a": 1}))).is_empty());
}

#[test]
fn non_string_elements_are_skipped() {
    let value = json!(["AI", 3, null, "Research"]);
    assert_eq!(string_array(Some(&value)), vec!["AI", "Research"]);
}

#[test]
fn text_column_parses_or_degrades() {
    assert_eq!(
        string_array_from_text(Some("[\"a\",\"b\"]")),
        vec!["a", "b"]
    );
    assert!(string_array_from_text(Some("broken [")).is_empty());
    assert!(string_array_from_text(Some("\"just a string\"")).is_empty());
    assert!(string_array_from_text(None).is_empty());
}

#[test]
fn json_column_serialization_keeps_none_as_null() {
    assert_eq!(to_json_column(None), None);
    assert_eq!(
        to_json_column(Some(&vec!["AI".to_string()])),
        Some("[\"AI\"]".to_string())
    );
    assert_eq!(to_json_column(Some(&Vec::new())), Some("[]".to_string()));
}
