//! Client-side search and facet filters for list pages.

use crate::api::types::{DisposalGuideline, RecyclingCenter, WasteCategory};
use crate::commands::{CategoryArgs, CenterArgs, GuidelineArgs};

/// Narrow a list of items down to the ones a page should show.
pub trait Filter<T> {
  fn matches(&self, item: &T) -> bool;

  /// Matching items, in input order.
  fn apply<'a>(&self, items: &'a [T]) -> Vec<&'a T> {
    items.iter().filter(|item| self.matches(item)).collect()
  }
}

/// Case-insensitive substring search over several fields.
/// An empty term matches everything.
fn search_matches(term: Option<&str>, fields: &[&str]) -> bool {
  let term = match term.map(str::trim) {
    Some(t) if !t.is_empty() => t.to_lowercase(),
    _ => return true,
  };
  fields
    .iter()
    .any(|field| field.to_lowercase().contains(&term))
}

fn facet_matches<V: PartialEq>(facet: Option<&V>, value: &V) -> bool {
  facet.map_or(true, |wanted| wanted == value)
}

// ============================================================================
// Waste categories
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryFilter {
  pub search: Option<String>,
  pub recyclable: Option<bool>,
}

impl Filter<WasteCategory> for CategoryFilter {
  fn matches(&self, item: &WasteCategory) -> bool {
    search_matches(self.search.as_deref(), &[&item.name, &item.description])
      && facet_matches(self.recyclable.as_ref(), &item.recyclable)
  }
}

impl From<&CategoryArgs> for CategoryFilter {
  fn from(args: &CategoryArgs) -> Self {
    Self {
      search: args.search.clone(),
      recyclable: args.recyclable,
    }
  }
}

// ============================================================================
// Disposal guidelines
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuidelineFilter {
  pub search: Option<String>,
  /// Exact waste category name
  pub category: Option<String>,
}

impl Filter<DisposalGuideline> for GuidelineFilter {
  fn matches(&self, item: &DisposalGuideline) -> bool {
    search_matches(self.search.as_deref(), &[&item.title, &item.description])
      && facet_matches(self.category.as_ref(), &item.waste_category)
  }
}

impl From<&GuidelineArgs> for GuidelineFilter {
  fn from(args: &GuidelineArgs) -> Self {
    Self {
      search: args.search.clone(),
      category: args.category.clone(),
    }
  }
}

/// Distinct guideline categories in first-seen order, for the category facet.
pub fn guideline_categories(guidelines: &[DisposalGuideline]) -> Vec<&str> {
  let mut categories: Vec<&str> = Vec::new();
  for guideline in guidelines {
    let category = guideline.waste_category.as_str();
    if !category.is_empty() && !categories.contains(&category) {
      categories.push(category);
    }
  }
  categories
}

// ============================================================================
// Recycling centers
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CenterFilter {
  pub search: Option<String>,
  pub active: Option<bool>,
}

impl Filter<RecyclingCenter> for CenterFilter {
  fn matches(&self, item: &RecyclingCenter) -> bool {
    search_matches(self.search.as_deref(), &[&item.name, &item.address])
      && facet_matches(self.active.as_ref(), &item.active)
  }
}

impl From<&CenterArgs> for CenterFilter {
  fn from(args: &CenterArgs) -> Self {
    Self {
      search: args.search.clone(),
      active: args.active,
    }
  }
}
