//! Duplicate-record filter for list responses.
//!
//! The API has been seen returning the same logical entity more than once in a
//! list, sometimes with cosmetic differences in the name. Two records are the
//! same if their identifiers match and their names match after trimming and
//! lowercasing. The first occurrence wins and order is preserved.

use std::collections::HashSet;

use tracing::debug;

/// A list item with an identifier and a display name.
pub trait Record {
  fn record_id(&self) -> &str;

  /// Name or title shown to the user.
  fn display_name(&self) -> &str;
}

/// Normalize a display name for comparison.
pub fn normalize_name(name: &str) -> String {
  name.trim().to_lowercase()
}

/// Keep the first record for each (identifier, normalized name) pair.
pub fn dedup_records<T: Record>(records: Vec<T>) -> Vec<T> {
  let total = records.len();
  let mut seen = HashSet::with_capacity(total);

  let unique: Vec<T> = records
    .into_iter()
    .filter(|record| {
      seen.insert((
        record.record_id().to_string(),
        normalize_name(record.display_name()),
      ))
    })
    .collect();

  if unique.len() < total {
    debug!(dropped = total - unique.len(), kept = unique.len(), "Dropped duplicate records");
  }

  unique
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug, Clone, PartialEq)]
  struct Item {
    id: &'static str,
    name: &'static str,
  }

  impl Record for Item {
    fn record_id(&self) -> &str {
      self.id
    }

    fn display_name(&self) -> &str {
      self.name
    }
  }

  fn item(id: &'static str, name: &'static str) -> Item {
    Item { id, name }
  }

  #[test]
  fn test_normalize_name() {
    assert_eq!(normalize_name("  Glass "), "glass");
    assert_eq!(normalize_name("E-WASTE"), "e-waste");
  }

  #[test]
  fn test_case_and_whitespace_duplicates_are_dropped() {
    let records = vec![item("1", "Glass"), item("1", "glass ")];
    assert_eq!(dedup_records(records), vec![item("1", "Glass")]);
  }

  #[test]
  fn test_first_occurrence_wins_and_order_is_kept() {
    let records = vec![
      item("2", "Paper"),
      item("1", "Glass"),
      item("2", " PAPER"),
      item("3", "Metal"),
      item("1", "GLASS"),
    ];

    assert_eq!(
      dedup_records(records),
      vec![item("2", "Paper"), item("1", "Glass"), item("3", "Metal")]
    );
  }

  #[test]
  fn test_same_id_different_name_is_kept() {
    let records = vec![item("1", "Glass"), item("1", "Plastic")];
    assert_eq!(dedup_records(records.clone()), records);
  }

  #[test]
  fn test_same_name_different_id_is_kept() {
    let records = vec![item("1", "Glass"), item("2", "Glass")];
    assert_eq!(dedup_records(records.clone()), records);
  }

  #[test]
  fn test_empty_input() {
    assert!(dedup_records(Vec::<Item>::new()).is_empty());
  }
}
