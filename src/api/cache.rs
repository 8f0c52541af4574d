//! Cache keys and record identity for API resources.

use crate::cache::QueryKey;
use crate::dedup::Record;

use super::types::{DisposalGuideline, RecyclingCenter, WasteCategory};

// ============================================================================
// Record implementations
// ============================================================================

impl Record for WasteCategory {
  fn record_id(&self) -> &str {
    &self.id
  }

  fn display_name(&self) -> &str {
    &self.name
  }
}

impl Record for DisposalGuideline {
  fn record_id(&self) -> &str {
    &self.id
  }

  fn display_name(&self) -> &str {
    &self.title
  }
}

impl Record for RecyclingCenter {
  fn record_id(&self) -> &str {
    &self.id
  }

  fn display_name(&self) -> &str {
    &self.name
  }
}

// ============================================================================
// Query key types
// ============================================================================

/// Memoized list resources.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResourceKey {
  WasteCategories,
  DisposalGuidelines,
  RecyclingCenters,
  /// Centers accepting a given waste category
  CentersForCategory { category_id: String },
}

impl ResourceKey {
  /// Path segments of the endpoint backing this resource.
  pub fn segments(&self) -> Vec<&str> {
    match self {
      Self::WasteCategories => vec!["waste-categories"],
      Self::DisposalGuidelines => vec!["disposal-guidelines"],
      Self::RecyclingCenters => vec!["recycling-centers"],
      Self::CentersForCategory { category_id } => vec![
        "recycling-centers",
        "search",
        "waste-category",
        category_id.as_str(),
      ],
    }
  }
}

impl QueryKey for ResourceKey {
  fn cache_key(&self) -> String {
    match self {
      Self::WasteCategories => "waste-categories".to_string(),
      Self::DisposalGuidelines => "disposal-guidelines".to_string(),
      Self::RecyclingCenters => "recycling-centers".to_string(),
      Self::CentersForCategory { category_id } => {
        format!("recycling-centers-for-category-{}", category_id)
      }
    }
  }

  fn description(&self) -> String {
    match self {
      Self::WasteCategories => "waste categories".to_string(),
      Self::DisposalGuidelines => "disposal guidelines".to_string(),
      Self::RecyclingCenters => "recycling centers".to_string(),
      Self::CentersForCategory { category_id } => {
        format!("recycling centers for category {}", category_id)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_cache_keys_are_distinct() {
    let keys = [
      ResourceKey::WasteCategories,
      ResourceKey::DisposalGuidelines,
      ResourceKey::RecyclingCenters,
      ResourceKey::CentersForCategory {
        category_id: "1".into(),
      },
      ResourceKey::CentersForCategory {
        category_id: "2".into(),
      },
    ];

    let unique: std::collections::HashSet<String> = keys.iter().map(|k| k.cache_key()).collect();
    assert_eq!(unique.len(), keys.len());
  }

  #[test]
  fn test_segments() {
    let key = ResourceKey::CentersForCategory {
      category_id: "abc".into(),
    };
    assert_eq!(
      key.segments(),
      vec!["recycling-centers", "search", "waste-category", "abc"]
    );
    assert_eq!(ResourceKey::WasteCategories.segments(), vec!["waste-categories"]);
  }

  #[test]
  fn test_guideline_uses_title_as_name() {
    let guideline = DisposalGuideline {
      id: "g1".into(),
      title: "Batteries".into(),
      description: String::new(),
      waste_category: String::new(),
      steps: vec![],
      tips: vec![],
      image_url: None,
      video_url: None,
      related_categories: vec![],
      created_at: None,
      updated_at: None,
    };
    assert_eq!(guideline.display_name(), "Batteries");
    assert_eq!(guideline.record_id(), "g1");
  }
}
