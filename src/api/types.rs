//! Serde types matching the waste sorting API.
//!
//! Identifiers arrive as strings or numbers depending on the endpoint and are
//! normalized to strings. Text and list fields that the API sends as `null`
//! decode as empty.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::payload::list_or_default;

// ============================================================================
// Field helpers
// ============================================================================

/// Accept a JSON string or number as an identifier.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum RawId {
    Text(String),
    Int(i64),
    Unsigned(u64),
    Float(f64),
  }

  Ok(match RawId::deserialize(deserializer)? {
    RawId::Text(s) => s,
    RawId::Int(n) => n.to_string(),
    RawId::Unsigned(n) => n.to_string(),
    RawId::Float(n) => n.to_string(),
  })
}

/// Treat `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept any JSON number as a count. Fractions are rounded, negatives and
/// non-numbers count as zero.
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Value::deserialize(deserializer)?;
  Ok(match value.as_u64() {
    Some(n) => n,
    None => value
      .as_f64()
      .filter(|n| n.is_finite() && *n > 0.0)
      .map(|n| n.round() as u64)
      .unwrap_or(0),
  })
}

/// Decode report rows one at a time, skipping the ones that do not decode.
fn lenient_rows<'de, D>(deserializer: D) -> Result<Vec<ReportRow>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Value::deserialize(deserializer)?;
  if value.is_null() {
    return Ok(Vec::new());
  }
  Ok(list_or_default(value, "report rows"))
}

/// Decode a nested object, or `None` if it does not decode.
fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: serde::de::DeserializeOwned,
{
  let value = Value::deserialize(deserializer)?;
  Ok(serde_json::from_value(value).ok())
}

// ============================================================================
// Reference data
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteCategory {
  #[serde(deserialize_with = "deserialize_id")]
  pub id: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub name: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub description: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub recyclable: bool,
  #[serde(default, deserialize_with = "null_as_default")]
  pub disposal_methods: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisposalGuideline {
  #[serde(deserialize_with = "deserialize_id")]
  pub id: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub title: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub description: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub waste_category: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub steps: Vec<String>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub tips: Vec<String>,
  #[serde(default)]
  pub image_url: Option<String>,
  #[serde(default)]
  pub video_url: Option<String>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub related_categories: Vec<String>,
  #[serde(default)]
  pub created_at: Option<String>,
  #[serde(default)]
  pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecyclingCenter {
  #[serde(deserialize_with = "deserialize_id")]
  pub id: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub name: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub address: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub contact_number: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub email: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub website: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub operating_hours: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub accepted_waste_categories: Vec<String>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub active: bool,
  #[serde(default)]
  pub latitude: Option<f64>,
  #[serde(default)]
  pub longitude: Option<f64>,
  #[serde(default)]
  pub notes: Option<String>,
}

// ============================================================================
// Reports
// ============================================================================

/// One row of a grouped report. Exactly one of the grouping fields is set,
/// depending on which report it came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
  #[serde(default)]
  pub category_name: Option<String>,
  #[serde(default)]
  pub location: Option<String>,
  #[serde(default)]
  pub status: Option<String>,
  #[serde(default, deserialize_with = "lenient_count")]
  pub count: u64,
  #[serde(default)]
  pub percentage: Option<f64>,
}

impl ReportRow {
  /// The grouping value, whichever report this row belongs to.
  pub fn label(&self) -> &str {
    self
      .category_name
      .as_deref()
      .or(self.location.as_deref())
      .or(self.status.as_deref())
      .unwrap_or("Unknown")
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecyclableSplit {
  #[serde(default, deserialize_with = "lenient_count")]
  pub recyclable: u64,
  #[serde(default, deserialize_with = "lenient_count")]
  pub non_recyclable: u64,
  #[serde(default, deserialize_with = "null_as_default")]
  pub recyclable_percentage: f64,
  #[serde(default, deserialize_with = "null_as_default")]
  pub non_recyclable_percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensiveReport {
  #[serde(default, deserialize_with = "lenient_rows")]
  pub by_category: Vec<ReportRow>,
  #[serde(default, deserialize_with = "lenient_rows")]
  pub by_location: Vec<ReportRow>,
  #[serde(default, deserialize_with = "lenient_rows")]
  pub by_status: Vec<ReportRow>,
  #[serde(default, deserialize_with = "lenient_object")]
  pub recyclable_vs_non_recyclable: Option<RecyclableSplit>,
  #[serde(default, deserialize_with = "lenient_count")]
  pub total_collections: u64,
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SigninRequest {
  pub username: String,
  pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
  pub username: String,
  pub email: String,
  pub password: String,
  pub role: Vec<String>,
}

/// Successful `signin` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JwtResponse {
  pub access_token: String,
  #[serde(rename = "type", default)]
  pub token_type: Option<String>,
  #[serde(deserialize_with = "deserialize_id")]
  pub id: String,
  pub username: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub email: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub roles: Vec<String>,
}

impl JwtResponse {
  pub fn profile(&self) -> UserProfile {
    UserProfile {
      id: self.id.clone(),
      username: self.username.clone(),
      email: self.email.clone(),
      roles: self.roles.clone(),
    }
  }
}

/// User profile persisted next to the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
  #[serde(deserialize_with = "deserialize_id")]
  pub id: String,
  pub username: String,
  #[serde(default)]
  pub email: String,
  #[serde(default)]
  pub roles: Vec<String>,
}

/// Plain `{ "message": ... }` body used by signup and error responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
  #[serde(default)]
  pub message: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_numeric_and_string_ids() {
    let a: WasteCategory = serde_json::from_value(json!({ "id": 7, "name": "Glass" })).unwrap();
    let b: WasteCategory = serde_json::from_value(json!({ "id": "7", "name": "Glass" })).unwrap();
    assert_eq!(a.id, "7");
    assert_eq!(a, b);

    let large: WasteCategory =
      serde_json::from_value(json!({ "id": 18_446_744_073_709_551_615u64 })).unwrap();
    assert_eq!(large.id, "18446744073709551615");
  }

  #[test]
  fn test_report_survives_bad_rows() {
    let report: ComprehensiveReport = serde_json::from_value(json!({
      "byCategory": [
        { "categoryName": "Glass", "count": 12.0 },
        { "categoryName": "Paper", "count": 3, "percentage": "n/a" }
      ],
      "byLocation": [{ "location": "North", "count": 8 }],
      "byStatus": "unavailable",
      "recyclableVsNonRecyclable": [],
      "totalCollections": 20.0
    }))
    .unwrap();

    assert_eq!(report.total_collections, 20);
    assert_eq!(report.by_category.len(), 1);
    assert_eq!(report.by_category[0].label(), "Glass");
    assert_eq!(report.by_category[0].count, 12);
    assert_eq!(report.by_location.len(), 1);
    assert!(report.by_status.is_empty());
    assert_eq!(report.recyclable_vs_non_recyclable, None);
  }

  #[test]
  fn test_counts_are_lenient() {
    let split: RecyclableSplit = serde_json::from_value(json!({
      "recyclable": 7.6,
      "nonRecyclable": -2,
      "recyclablePercentage": 75.0
    }))
    .unwrap();

    assert_eq!(split.recyclable, 8);
    assert_eq!(split.non_recyclable, 0);
    assert_eq!(split.recyclable_percentage, 75.0);
  }

  #[test]
  fn test_nulls_decode_as_empty() {
    let center: RecyclingCenter = serde_json::from_value(json!({
      "id": "c1",
      "name": "North Yard",
      "address": null,
      "acceptedWasteCategories": null,
      "active": true
    }))
    .unwrap();

    assert_eq!(center.address, "");
    assert!(center.accepted_waste_categories.is_empty());
    assert!(center.active);
  }

  #[test]
  fn test_guideline_camel_case_fields() {
    let guideline: DisposalGuideline = serde_json::from_value(json!({
      "id": "g1",
      "title": "Rinse bottles",
      "wasteCategory": "Glass",
      "steps": ["Rinse", "Remove caps"],
      "imageUrl": "https://example.com/glass.png",
      "relatedCategories": ["Metal"]
    }))
    .unwrap();

    assert_eq!(guideline.waste_category, "Glass");
    assert_eq!(guideline.steps.len(), 2);
    assert!(guideline.tips.is_empty());
    assert_eq!(guideline.image_url.as_deref(), Some("https://example.com/glass.png"));
    assert_eq!(guideline.related_categories, vec!["Metal".to_string()]);
  }

  #[test]
  fn test_jwt_response_profile() {
    let response: JwtResponse = serde_json::from_value(json!({
      "accessToken": "a.b.c",
      "type": "Bearer",
      "id": 3,
      "username": "alice",
      "email": "alice@example.com",
      "roles": ["ROLE_USER"]
    }))
    .unwrap();

    assert_eq!(response.token_type.as_deref(), Some("Bearer"));
    let profile = response.profile();
    assert_eq!(profile.id, "3");
    assert_eq!(profile.roles, vec!["ROLE_USER".to_string()]);
  }

  #[test]
  fn test_report_row_label() {
    let row = ReportRow {
      location: Some("Downtown".into()),
      count: 4,
      ..Default::default()
    };
    assert_eq!(row.label(), "Downtown");
    assert_eq!(ReportRow::default().label(), "Unknown");
  }

  #[test]
  fn test_signup_request_shape() {
    let request = SignupRequest {
      username: "alice".into(),
      email: "alice@example.com".into(),
      password: "secret1".into(),
      role: vec!["user".into()],
    };
    assert_eq!(
      serde_json::to_value(&request).unwrap(),
      json!({
        "username": "alice",
        "email": "alice@example.com",
        "password": "secret1",
        "role": ["user"]
      })
    );
  }
}
