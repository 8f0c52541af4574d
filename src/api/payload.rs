//! Validate-or-default decoding of response payloads.
//!
//! Pages never fail on an unexpected payload shape. Lists fall back to empty,
//! single records to "not found" and report objects to their default.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Decode a list payload. Non-arrays become an empty list; elements that do
/// not decode are skipped.
pub fn list_or_default<T: DeserializeOwned>(payload: Value, resource: &str) -> Vec<T> {
  let items = match payload {
    Value::Array(items) => items,
    other => {
      warn!(resource, kind = kind_of(&other), "Expected a list payload, using empty list");
      return Vec::new();
    }
  };

  let total = items.len();
  let decoded: Vec<T> = items
    .into_iter()
    .enumerate()
    .filter_map(|(index, item)| match serde_json::from_value(item) {
      Ok(record) => Some(record),
      Err(e) => {
        warn!(resource, index, error = %e, "Skipping malformed list element");
        None
      }
    })
    .collect();

  if decoded.len() < total {
    warn!(resource, skipped = total - decoded.len(), "Some list elements were skipped");
  }

  decoded
}

/// Decode a single record, or `None` if the payload is not one.
pub fn record_or_none<T: DeserializeOwned>(payload: Value, resource: &str) -> Option<T> {
  if !payload.is_object() {
    warn!(resource, kind = kind_of(&payload), "Expected a record payload");
    return None;
  }

  match serde_json::from_value(payload) {
    Ok(record) => Some(record),
    Err(e) => {
      warn!(resource, error = %e, "Malformed record payload");
      None
    }
  }
}

/// Decode an object payload, or the type's default if it is malformed.
pub fn object_or_default<T: DeserializeOwned + Default>(payload: Value, resource: &str) -> T {
  record_or_none(payload, resource).unwrap_or_default()
}

fn kind_of(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "bool",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::types::{ComprehensiveReport, WasteCategory};
  use serde_json::json;

  #[test]
  fn test_list_of_records() {
    let categories: Vec<WasteCategory> = list_or_default(
      json!([{ "id": "1", "name": "Glass" }, { "id": "2", "name": "Paper" }]),
      "waste-categories",
    );
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[1].name, "Paper");
  }

  #[test]
  fn test_non_array_becomes_empty() {
    let from_object: Vec<WasteCategory> =
      list_or_default(json!({ "message": "oops" }), "waste-categories");
    let from_null: Vec<WasteCategory> = list_or_default(Value::Null, "waste-categories");
    assert!(from_object.is_empty());
    assert!(from_null.is_empty());
  }

  #[test]
  fn test_malformed_elements_are_skipped() {
    let categories: Vec<WasteCategory> = list_or_default(
      json!([{ "id": "1", "name": "Glass" }, { "name": "no id" }, 42]),
      "waste-categories",
    );
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].id, "1");
  }

  #[test]
  fn test_record_or_none() {
    let found: Option<WasteCategory> =
      record_or_none(json!({ "id": "1", "name": "Glass" }), "waste-category");
    assert_eq!(found.map(|c| c.name), Some("Glass".to_string()));

    let missing: Option<WasteCategory> = record_or_none(json!([]), "waste-category");
    assert!(missing.is_none());

    let no_id: Option<WasteCategory> = record_or_none(json!({ "name": "x" }), "waste-category");
    assert!(no_id.is_none());
  }

  #[test]
  fn test_object_or_default() {
    let report: ComprehensiveReport = object_or_default(json!("unexpected"), "report");
    assert_eq!(report, ComprehensiveReport::default());

    let report: ComprehensiveReport =
      object_or_default(json!({ "totalCollections": 12 }), "report");
    assert_eq!(report.total_collections, 12);
    assert!(report.by_category.is_empty());
  }
}
