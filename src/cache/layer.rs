//! Cache layer that memoizes network fetches for a freshness window.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::error::Result;

use super::storage::{CacheStorage, CachedEntry, MemoryStorage, NoopStorage};
use super::traits::{CacheResult, QueryKey};

/// Default freshness window for cached responses, in seconds (5 minutes).
pub const FRESHNESS_SECS: i64 = 5 * 60;

/// Cache layer that manages caching logic and network fetching.
///
/// Concurrent fetches of the same key are not coalesced; each miss issues
/// its own network call and the last one to finish wins the slot.
pub struct CacheLayer {
  storage: Arc<dyn CacheStorage>,
  /// How long before cached data is considered stale
  stale_time: Duration,
}

impl CacheLayer {
  /// Create a new cache layer with the given storage backend.
  pub fn new(storage: Arc<dyn CacheStorage>) -> Self {
    Self {
      storage,
      stale_time: Duration::seconds(FRESHNESS_SECS),
    }
  }

  pub fn in_memory() -> Self {
    Self::new(Arc::new(MemoryStorage::new()))
  }

  /// A layer that never serves from cache.
  pub fn disabled() -> Self {
    Self::new(Arc::new(NoopStorage))
  }

  /// Set the stale time for cached data.
  pub fn with_stale_time(mut self, stale_time: Duration) -> Self {
    self.stale_time = stale_time;
    self
  }

  /// Check if cached data is stale based on when it was fetched.
  fn is_stale(&self, fetched_at: DateTime<Utc>) -> bool {
    Utc::now() - fetched_at >= self.stale_time
  }

  /// Fetch with a cache-first strategy.
  ///
  /// 1. Check cache - if fresh, return immediately
  /// 2. If stale/missing, fetch from network
  /// 3. On network failure, propagate the error and leave the cache untouched
  /// 4. Update cache with new data
  pub async fn fetch<K, T, F, Fut>(&self, key: &K, fetcher: F) -> Result<CacheResult<T>>
  where
    K: QueryKey + ?Sized,
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
  {
    let cache_key = key.cache_key();

    if let Some(cached) = self.storage.get(&cache_key)? {
      if !self.is_stale(cached.fetched_at) {
        match serde_json::from_value::<T>(cached.payload) {
          Ok(data) => {
            debug!(key = %key.description(), "Cache hit");
            return Ok(CacheResult::from_cache(data, cached.fetched_at));
          }
          Err(e) => {
            warn!(key = %key.description(), error = %e, "Discarding unreadable cache entry")
          }
        }
      } else {
        debug!(key = %key.description(), "Cache entry is stale");
      }
    } else {
      debug!(key = %key.description(), "Cache miss");
    }

    let data = fetcher().await?;
    let fetched_at = Utc::now();
    self.storage.put(
      &cache_key,
      CachedEntry {
        payload: serde_json::to_value(&data)?,
        fetched_at,
      },
    )?;
    debug!(key = %key.description(), entries = self.storage.len()?, "Cached fresh response");

    Ok(CacheResult::from_network(data, fetched_at))
  }
}

impl Clone for CacheLayer {
  fn clone(&self) -> Self {
    Self {
      storage: Arc::clone(&self.storage),
      stale_time: self.stale_time,
    }
  }
}
