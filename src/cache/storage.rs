//! Cache storage trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::{PortalError, Result};

/// A stored payload and when it was fetched.
#[derive(Debug, Clone)]
pub struct CachedEntry {
  pub payload: Value,
  pub fetched_at: DateTime<Utc>,
}

/// Trait for cache storage backends.
pub trait CacheStorage: Send + Sync {
  /// Get the entry stored under `key`, fresh or not.
  fn get(&self, key: &str) -> Result<Option<CachedEntry>>;

  /// Store or replace the entry under `key`.
  fn put(&self, key: &str, entry: CachedEntry) -> Result<()>;

  /// Number of stored entries.
  fn len(&self) -> Result<usize>;
}

/// Storage implementation that doesn't cache anything.
/// Used when caching is disabled - all operations are no-ops.
pub struct NoopStorage;

impl CacheStorage for NoopStorage {
  fn get(&self, _key: &str) -> Result<Option<CachedEntry>> {
    Ok(None) // Always miss
  }

  fn put(&self, _key: &str, _entry: CachedEntry) -> Result<()> {
    Ok(()) // Discard
  }

  fn len(&self) -> Result<usize> {
    Ok(0)
  }
}

/// Process-lifetime storage. Entries are replaced when refreshed and never
/// evicted otherwise.
#[derive(Default)]
pub struct MemoryStorage {
  entries: Mutex<HashMap<String, CachedEntry>>,
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }
}

impl CacheStorage for MemoryStorage {
  fn get(&self, key: &str) -> Result<Option<CachedEntry>> {
    let entries = self
      .entries
      .lock()
      .map_err(|e| PortalError::Storage(format!("Lock poisoned: {}", e)))?;
    Ok(entries.get(key).cloned())
  }

  fn put(&self, key: &str, entry: CachedEntry) -> Result<()> {
    let mut entries = self
      .entries
      .lock()
      .map_err(|e| PortalError::Storage(format!("Lock poisoned: {}", e)))?;
    entries.insert(key.to_string(), entry);
    Ok(())
  }

  fn len(&self) -> Result<usize> {
    let entries = self
      .entries
      .lock()
      .map_err(|e| PortalError::Storage(format!("Lock poisoned: {}", e)))?;
    Ok(entries.len())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_memory_storage_replaces_entries() {
    let storage = MemoryStorage::new();
    assert!(storage.get("k").unwrap().is_none());

    let first = CachedEntry {
      payload: json!([1]),
      fetched_at: Utc::now(),
    };
    storage.put("k", first).unwrap();

    let second = CachedEntry {
      payload: json!([2]),
      fetched_at: Utc::now(),
    };
    storage.put("k", second).unwrap();

    assert_eq!(storage.len().unwrap(), 1);
    assert_eq!(storage.get("k").unwrap().unwrap().payload, json!([2]));
  }

  #[test]
  fn test_noop_storage_always_misses() {
    let storage = NoopStorage;
    let entry = CachedEntry {
      payload: json!({}),
      fetched_at: Utc::now(),
    };
    storage.put("k", entry).unwrap();
    assert!(storage.get("k").unwrap().is_none());
    assert_eq!(storage.len().unwrap(), 0);
  }
}
