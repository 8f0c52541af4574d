//! Waste sorting client with transparent caching and de-duplication.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::cache::{CacheLayer, QueryKey};
use crate::dedup::{dedup_records, Record};
use crate::error::Result;
use crate::session::Session;

use super::cache::ResourceKey;
use super::client::ApiClient;
use super::payload::{list_or_default, record_or_none};
use super::types::{DisposalGuideline, RecyclingCenter, WasteCategory};

/// API client used by the pages.
///
/// List endpoints are memoized and de-duplicated. Single-record lookups always
/// go to the network and are returned as-is.
#[derive(Clone)]
pub struct WasteClient {
  inner: ApiClient,
  cache: CacheLayer,
}

impl WasteClient {
  pub fn new(inner: ApiClient, cache: CacheLayer) -> Self {
    Self { inner, cache }
  }

  pub fn api(&self) -> &ApiClient {
    &self.inner
  }

  pub fn session(&self) -> &Session {
    self.inner.session()
  }

  /// Fetch a list resource through the cache, then drop duplicates.
  async fn fetch_list<T>(&self, key: ResourceKey) -> Result<Vec<T>>
  where
    T: DeserializeOwned + Record,
  {
    let result = self
      .cache
      .fetch(&key, || async { self.inner.get(&key.segments()).await })
      .await?;
    debug!(
      resource = %key.description(),
      cached = result.is_cached(),
      fetched_at = %result.fetched_at,
      "Loaded list"
    );

    let records: Vec<T> = list_or_default(result.data, &key.cache_key());
    Ok(dedup_records(records))
  }

  /// Fetch a single record, uncached.
  async fn fetch_record<T: DeserializeOwned>(
    &self,
    collection: &str,
    id: &str,
  ) -> Result<Option<T>> {
    let payload = self.inner.get(&[collection, id]).await?;
    Ok(record_or_none(payload, collection))
  }

  /// Get all waste categories.
  pub async fn waste_categories(&self) -> Result<Vec<WasteCategory>> {
    self.fetch_list(ResourceKey::WasteCategories).await
  }

  /// Get a single waste category.
  pub async fn waste_category(&self, id: &str) -> Result<Option<WasteCategory>> {
    self.fetch_record("waste-categories", id).await
  }

  /// Get all disposal guidelines.
  pub async fn disposal_guidelines(&self) -> Result<Vec<DisposalGuideline>> {
    self.fetch_list(ResourceKey::DisposalGuidelines).await
  }

  /// Get a single disposal guideline.
  pub async fn disposal_guideline(&self, id: &str) -> Result<Option<DisposalGuideline>> {
    self.fetch_record("disposal-guidelines", id).await
  }

  /// Get all recycling centers.
  pub async fn recycling_centers(&self) -> Result<Vec<RecyclingCenter>> {
    self.fetch_list(ResourceKey::RecyclingCenters).await
  }

  /// Get a single recycling center.
  pub async fn recycling_center(&self, id: &str) -> Result<Option<RecyclingCenter>> {
    self.fetch_record("recycling-centers", id).await
  }

  /// Get recycling centers that accept a waste category.
  pub async fn recycling_centers_for_category(
    &self,
    category_id: &str,
  ) -> Result<Vec<RecyclingCenter>> {
    self
      .fetch_list(ResourceKey::CentersForCategory {
        category_id: category_id.to_string(),
      })
      .await
  }
}
