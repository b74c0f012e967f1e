//! Per-collection cache with wholesale invalidation
//!
//! Each collection is cached as one JSON array under `epi:collection:<name>`.
//! A mutation drops the collection's key together with the keys of every
//! collection that embeds its names. Cache failures are logged and never
//! fail the request: reads fall through to the database.

use std::{future::Future, sync::Arc};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Equipment,
    Personnel,
    Verifications,
    Requests,
    Alerts,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Equipment => "equipment",
            Collection::Personnel => "personnel",
            Collection::Verifications => "verifications",
            Collection::Requests => "requests",
            Collection::Alerts => "alerts",
        }
    }

    pub fn key(&self) -> String {
        format!("epi:collection:{}", self.name())
    }

    /// This collection plus the ones whose cached rows embed its data
    pub fn with_dependents(&self) -> Vec<Collection> {
        match self {
            // holder names, equipment counts, and alert links nulled on delete
            Collection::Personnel | Collection::Equipment => vec![
                Collection::Equipment,
                Collection::Personnel,
                Collection::Verifications,
                Collection::Requests,
                Collection::Alerts,
            ],
            Collection::Verifications => vec![Collection::Verifications],
            Collection::Requests => vec![Collection::Requests],
            Collection::Alerts => vec![Collection::Alerts],
        }
    }
}

/// Key/value store backing the collection cache
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionCache: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Option<String>>;
    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> AppResult<()>;
    async fn delete(&self, keys: Vec<String>) -> AppResult<()>;
}

/// Used when caching is disabled
pub struct NoCache;

#[async_trait]
impl CollectionCache for NoCache {
    async fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: String, _ttl_seconds: u64) -> AppResult<()> {
        Ok(())
    }

    async fn delete(&self, _keys: Vec<String>) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Clone)]
pub struct CacheHandle {
    inner: Arc<dyn CollectionCache>,
    ttl_seconds: u64,
}

impl CacheHandle {
    pub fn new(inner: Arc<dyn CollectionCache>, ttl_seconds: u64) -> Self {
        Self { inner, ttl_seconds }
    }

    pub fn disabled() -> Self {
        Self::new(Arc::new(NoCache), 0)
    }

    /// Return the cached collection, or load it and fill the cache
    pub async fn fetch<T, F, Fut>(&self, collection: Collection, load: F) -> AppResult<Vec<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<Vec<T>>>,
    {
        let key = collection.key();

        match self.inner.get(&key).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<T>>(&raw) {
                Ok(rows) => {
                    tracing::debug!("Cache hit for {} ({} rows)", key, rows.len());
                    return Ok(rows);
                }
                Err(e) => tracing::warn!("Discarding unreadable cache entry {}: {}", key, e),
            },
            Ok(None) => tracing::debug!("Cache miss for {}", key),
            Err(e) => tracing::warn!("Cache read failed for {}: {}", key, e),
        }

        let rows = load().await?;

        match serde_json::to_string(&rows) {
            Ok(raw) => {
                if let Err(e) = self.inner.set(&key, raw, self.ttl_seconds).await {
                    tracing::warn!("Cache write failed for {}: {}", key, e);
                }
            }
            Err(e) => tracing::warn!("Could not serialize {} for caching: {}", key, e),
        }

        Ok(rows)
    }

    /// Drop a collection and its dependents
    pub async fn invalidate(&self, collection: Collection) {
        let keys: Vec<String> = collection
            .with_dependents()
            .iter()
            .map(Collection::key)
            .collect();
        if let Err(e) = self.inner.delete(keys).await {
            tracing::warn!("Cache invalidation failed for {}: {}", collection.name(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_hit_skips_loader() {
        let mut mock = MockCollectionCache::new();
        mock.expect_get()
            .with(eq("epi:collection:personnel"))
            .times(1)
            .returning(|_| Ok(Some("[1,2,3]".to_string())));
        mock.expect_set().never();

        let cache = CacheHandle::new(Arc::new(mock), 60);
        let rows: Vec<i32> = cache
            .fetch(Collection::Personnel, || async {
                Err(AppError::Internal("loader must not run on a cache hit".to_string()))
            })
            .await
            .unwrap();
        assert_eq!(rows, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_miss_loads_and_stores() {
        let mut mock = MockCollectionCache::new();
        mock.expect_get().times(1).returning(|_| Ok(None));
        mock.expect_set()
            .withf(|key, value, ttl| key == "epi:collection:equipment" && value == "[7]" && *ttl == 300)
            .times(1)
            .returning(|_, _, _| Ok(()));

        let cache = CacheHandle::new(Arc::new(mock), 300);
        let rows: Vec<i32> = cache
            .fetch(Collection::Equipment, || async { Ok(vec![7]) })
            .await
            .unwrap();
        assert_eq!(rows, vec![7]);
    }

    #[tokio::test]
    async fn test_cache_errors_fall_back_to_loader() {
        let mut mock = MockCollectionCache::new();
        mock.expect_get()
            .returning(|_| Err(AppError::Cache("connection refused".to_string())));
        mock.expect_set()
            .returning(|_, _, _| Err(AppError::Cache("connection refused".to_string())));

        let cache = CacheHandle::new(Arc::new(mock), 60);
        let rows: Vec<i32> = cache
            .fetch(Collection::Alerts, || async { Ok(vec![1]) })
            .await
            .unwrap();
        assert_eq!(rows, vec![1]);
    }

    #[tokio::test]
    async fn test_unreadable_entry_is_reloaded() {
        let mut mock = MockCollectionCache::new();
        mock.expect_get().returning(|_| Ok(Some("not json".to_string())));
        mock.expect_set().times(1).returning(|_, _, _| Ok(()));

        let cache = CacheHandle::new(Arc::new(mock), 60);
        let rows: Vec<i32> = cache
            .fetch(Collection::Requests, || async { Ok(vec![4, 5]) })
            .await
            .unwrap();
        assert_eq!(rows, vec![4, 5]);
    }

    #[tokio::test]
    async fn test_loader_error_is_returned() {
        let mut mock = MockCollectionCache::new();
        mock.expect_get().returning(|_| Ok(None));
        mock.expect_set().never();

        let cache = CacheHandle::new(Arc::new(mock), 60);
        let result: AppResult<Vec<i32>> = cache
            .fetch(Collection::Verifications, || async {
                Err(AppError::Internal("boom".to_string()))
            })
            .await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_personnel_mutation_drops_dependents() {
        let mut mock = MockCollectionCache::new();
        mock.expect_delete()
            .withf(|keys| {
                keys.len() == 5
                    && keys.contains(&"epi:collection:personnel".to_string())
                    && keys.contains(&"epi:collection:equipment".to_string())
                    && keys.contains(&"epi:collection:verifications".to_string())
                    && keys.contains(&"epi:collection:requests".to_string())
                    && keys.contains(&"epi:collection:alerts".to_string())
            })
            .times(1)
            .returning(|_| Ok(()));

        CacheHandle::new(Arc::new(mock), 60)
            .invalidate(Collection::Personnel)
            .await;
    }

    #[tokio::test]
    async fn test_alert_mutation_drops_only_alerts() {
        let mut mock = MockCollectionCache::new();
        mock.expect_delete()
            .with(eq(vec!["epi:collection:alerts".to_string()]))
            .times(1)
            .returning(|_| Ok(()));

        CacheHandle::new(Arc::new(mock), 60)
            .invalidate(Collection::Alerts)
            .await;
    }
}
