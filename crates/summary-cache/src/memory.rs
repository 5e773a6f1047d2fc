//! In-memory cache implementation.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::time::Duration;
use summary_core::{DateKey, Result, Summary, SummaryCache};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Cache entry with timestamp for TTL-based invalidation.
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    cached_at: chrono::DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    fn is_stale(&self, ttl: Duration) -> bool {
        let age = Utc::now().signed_duration_since(self.cached_at);
        age > chrono::TimeDelta::from_std(ttl).unwrap_or(chrono::TimeDelta::MAX)
    }

    fn is_live(&self, ttl: Option<Duration>) -> bool {
        ttl.is_none_or(|ttl| !self.is_stale(ttl))
    }
}

/// Process-lifetime cache of daily summaries.
///
/// Summaries live in a `RwLock`-protected `HashMap` and are lost when the cache
/// is dropped. Without a TTL the key set only grows. With a TTL, expired entries
/// read as misses and may be replaced by the next `put`.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    summaries: RwLock<HashMap<DateKey, CacheEntry<Summary>>>,
    ttl: Option<Duration>,
}

impl InMemoryCache {
    /// Create a new empty cache whose entries never expire.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty cache whose entries expire `ttl` after being written.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            summaries: RwLock::default(),
            ttl: Some(ttl),
        }
    }

    /// The configured time-to-live, if any.
    #[must_use]
    pub const fn ttl(&self) -> Option<Duration> {
        self.ttl
    }
}

#[async_trait]
impl SummaryCache for InMemoryCache {
    #[instrument(skip(self), fields(date = %date))]
    async fn get(&self, date: &DateKey) -> Result<Option<Summary>> {
        let cache = self.summaries.read().await;
        match cache.get(date).filter(|entry| entry.is_live(self.ttl)) {
            Some(entry) => {
                debug!("Cache hit for summary");
                Ok(Some(entry.data.clone()))
            }
            None => {
                debug!("Cache miss for summary");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, summary), fields(date = %date))]
    async fn put(&self, date: &DateKey, summary: &Summary) -> Result<bool> {
        let mut cache = self.summaries.write().await;
        if cache.get(date).is_some_and(|entry| entry.is_live(self.ttl)) {
            debug!("Summary already cached, keeping first value");
            return Ok(false);
        }

        cache.insert(*date, CacheEntry::new(summary.clone()));
        debug!("Cached summary");
        Ok(true)
    }

    async fn len(&self) -> Result<usize> {
        let cache = self.summaries.read().await;
        Ok(cache.values().filter(|entry| entry.is_live(self.ttl)).count())
    }

    #[instrument(skip(self))]
    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize> {
        let mut cache = self.summaries.write().await;
        let before = cache.len();
        cache.retain(|_, entry| !entry.is_stale(ttl));
        let removed = before - cache.len();

        if removed > 0 {
            debug!("Invalidated {} stale cache entries", removed);
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn summary(total: f64) -> Summary {
        Summary {
            total,
            purchases_by_method: BTreeMap::from([("visa".to_string(), 1)]),
            non_purchasers: 0,
            highest_purchase: total,
        }
    }

    #[tokio::test]
    async fn test_memory_cache_get_put() {
        let cache = InMemoryCache::new();
        let date = DateKey::from_ymd(2019, 12, 1).unwrap();

        // Initially no data
        assert!(cache.get(&date).await.unwrap().is_none());
        assert!(cache.is_empty().await.unwrap());

        assert!(cache.put(&date, &summary(10.0)).await.unwrap());

        let cached = cache.get(&date).await.unwrap();
        assert_eq!(cached, Some(summary(10.0)));
        assert_eq!(cache.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_memory_cache_is_write_once() {
        let cache = InMemoryCache::new();
        let date = DateKey::from_ymd(2019, 12, 1).unwrap();

        assert!(cache.put(&date, &summary(10.0)).await.unwrap());
        assert!(!cache.put(&date, &summary(99.0)).await.unwrap());

        assert_eq!(cache.get(&date).await.unwrap(), Some(summary(10.0)));
    }

    #[tokio::test]
    async fn test_memory_cache_keys_are_per_day() {
        let cache = InMemoryCache::new();
        let first = DateKey::from_ymd(2019, 12, 1).unwrap();
        let second = DateKey::from_ymd(2019, 12, 2).unwrap();

        cache.put(&first, &summary(1.0)).await.unwrap();
        assert!(cache.get(&second).await.unwrap().is_none());

        cache.put(&second, &summary(2.0)).await.unwrap();
        assert_eq!(cache.len().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_memory_cache_ttl_expires_entries() {
        let cache = InMemoryCache::with_ttl(Duration::ZERO);
        let date = DateKey::from_ymd(2019, 12, 1).unwrap();

        cache.put(&date, &summary(10.0)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;

        assert!(cache.get(&date).await.unwrap().is_none());
        // An expired entry can be replaced.
        assert!(cache.put(&date, &summary(20.0)).await.unwrap());
    }

    #[tokio::test]
    async fn test_invalidate_stale() {
        let cache = InMemoryCache::new();
        let date = DateKey::from_ymd(2019, 12, 1).unwrap();
        cache.put(&date, &summary(10.0)).await.unwrap();

        let removed = cache.invalidate_stale(Duration::from_secs(3600)).await.unwrap();
        assert_eq!(removed, 0);

        tokio::time::sleep(Duration::from_millis(5)).await;
        let removed = cache.invalidate_stale(Duration::ZERO).await.unwrap();
        assert_eq!(removed, 1);
        assert!(cache.get(&date).await.unwrap().is_none());
    }
}
