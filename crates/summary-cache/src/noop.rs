//! No-op cache implementation.

use async_trait::async_trait;
use std::time::Duration;
use summary_core::{DateKey, Result, Summary, SummaryCache};
use tracing::trace;

/// A no-op cache that doesn't store anything.
///
/// `get` always returns `Ok(None)` and `put` never populates an entry, so every
/// request reaches the record source. Useful for disabling caching or testing
/// code paths without cache hits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl NoopCache {
    /// Create a new no-op cache.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SummaryCache for NoopCache {
    async fn get(&self, _date: &DateKey) -> Result<Option<Summary>> {
        trace!("NoopCache: get called, returning None");
        Ok(None)
    }

    async fn put(&self, _date: &DateKey, _summary: &Summary) -> Result<bool> {
        trace!("NoopCache: put called, doing nothing");
        Ok(false)
    }

    async fn len(&self) -> Result<usize> {
        Ok(0)
    }

    async fn invalidate_stale(&self, _ttl: Duration) -> Result<usize> {
        trace!("NoopCache: invalidate_stale called, returning 0");
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_cache_never_stores() {
        let cache = NoopCache::new();
        let date = DateKey::from_ymd(2019, 12, 1).unwrap();

        assert!(!cache.put(&date, &Summary::default()).await.unwrap());
        assert!(cache.get(&date).await.unwrap().is_none());
        assert!(cache.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn test_noop_cache_management() {
        let cache = NoopCache::new();
        let removed = cache
            .invalidate_stale(Duration::from_secs(3600))
            .await
            .unwrap();
        assert_eq!(removed, 0);
    }
}
