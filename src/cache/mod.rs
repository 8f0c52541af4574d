//! In-process response cache.
//!
//! This module provides an API-agnostic memoization layer that:
//! - Keys payloads by a logical resource name
//! - Serves entries younger than the freshness window without touching the network
//! - Refetches stale or missing entries and never caches failures

mod layer;
mod storage;
mod traits;

pub use layer::{CacheLayer, FRESHNESS_SECS};
pub use traits::QueryKey;
