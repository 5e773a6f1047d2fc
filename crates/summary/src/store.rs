//! Summary store: per-day cache in front of a record source.

use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{debug, warn};

use summary_cache::InMemoryCache;
use summary_core::{
    DateKey, RecordSource, Result, Summary, SummaryCache, SummaryError, combine, reduce,
};

/// Maps days and day ranges to summaries, computing each day at most once per
/// cache entry.
///
/// A lookup first consults the cache. On a miss the day's records are fetched
/// from the [`RecordSource`], reduced, and the result is cached before being
/// returned. Concurrent misses for the same day are not de-duplicated: each one
/// fetches, and the cache keeps the first summary written.
///
/// Cloning a store is cheap and every clone shares the same cache.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use summary::{RemoteSource, SummaryStore};
///
/// let store = SummaryStore::new(Arc::new(RemoteSource::new()?));
///
/// let day = store.get_by_date(2019, 12, 1).await?;
/// let week = store.get_by_range(2019, 12, 1, 7).await?;
/// ```
#[derive(Clone)]
pub struct SummaryStore {
    source: Arc<dyn RecordSource>,
    cache: Arc<dyn SummaryCache>,
}

impl std::fmt::Debug for SummaryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryStore")
            .field("source", &self.source.name())
            .field("cache", &"configured")
            .finish()
    }
}

impl SummaryStore {
    /// Create a store over `source` with an empty, never-expiring in-memory cache.
    #[must_use]
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self::with_cache(source, Arc::new(InMemoryCache::new()))
    }

    /// Create a store over `source` backed by the given cache.
    #[must_use]
    pub fn with_cache(source: Arc<dyn RecordSource>, cache: Arc<dyn SummaryCache>) -> Self {
        debug!(source = source.name(), "Creating summary store");
        Self { source, cache }
    }

    /// Create a store over the purchases HTTP API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    #[cfg(feature = "remote")]
    pub fn with_remote(base_url: &str, timeout: std::time::Duration) -> Result<Self> {
        let source = summary_remote::RemoteSource::with_base_url(base_url, timeout)?;
        Ok(Self::new(Arc::new(source)))
    }

    /// The cache backing this store.
    #[must_use]
    pub fn cache(&self) -> &Arc<dyn SummaryCache> {
        &self.cache
    }

    /// Summary of one day.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::InvalidArgument`] if the components do not name a
    /// real date, otherwise any error from [`SummaryStore::get`].
    pub async fn get_by_date(&self, year: i32, month: u32, day: u32) -> Result<Summary> {
        self.get(DateKey::from_ymd(year, month, day)?).await
    }

    /// Combined summary of `days` consecutive days starting at the given date.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::InvalidArgument`] if `days` is not positive or
    /// the date is not real, otherwise any error from [`SummaryStore::get_range`].
    pub async fn get_by_range(&self, year: i32, month: u32, day: u32, days: i64) -> Result<Summary> {
        let days = checked_days(days)?;
        let start = DateKey::from_ymd(year, month, day)?;
        self.collect_range(start, days).await
    }

    /// Summary of the day identified by `date`.
    ///
    /// A cached summary is returned without touching the source. A cache lookup
    /// failure is treated as a miss, and a failure to store the computed summary
    /// is logged without failing the request.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::Fetch`] if the source fails and
    /// [`SummaryError::Validation`] if the records break the data contract.
    pub async fn get(&self, date: DateKey) -> Result<Summary> {
        match self.cache.get(&date).await {
            Ok(Some(cached)) => {
                debug!(date = %date, "Cache hit for summary");
                return Ok(cached);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(date = %date, error = %e, "Cache lookup failed, fetching");
            }
        }

        debug!(source = self.source.name(), date = %date, "Fetching records");
        let records = self.source.fetch_records(&date).await?;
        let summary = reduce(&records)?;

        if let Err(e) = self.cache.put(&date, &summary).await {
            warn!(date = %date, error = %e, "Failed to cache summary");
        }

        Ok(summary)
    }

    /// Combined summary of `days` consecutive days starting at `start`.
    ///
    /// Every day is resolved by [`SummaryStore::get`] in its own task, so slow
    /// fetches overlap. The first failing day fails the whole range. Days still
    /// in flight at that point are left to finish and populate the cache.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::InvalidArgument`] if `days` is not positive or
    /// the range runs past the last representable date, otherwise the first
    /// error reported by any day.
    pub async fn get_range(&self, start: DateKey, days: i64) -> Result<Summary> {
        let days = checked_days(days)?;
        self.collect_range(start, days).await
    }

    async fn collect_range(&self, start: DateKey, days: u32) -> Result<Summary> {
        let dates = start.range(days)?;
        debug!(start = %start, days, "Fetching summary range");

        // Dropping a JoinHandle detaches its task, so siblings of a failed day keep running.
        let handles = dates.into_iter().map(|date| {
            let store = self.clone();
            tokio::spawn(async move { store.get(date).await })
        });

        let summaries = try_join_all(handles.map(|handle| async move {
            handle
                .await
                .unwrap_or_else(|e| Err(SummaryError::Other(format!("Summary task failed: {e}"))))
        }))
        .await?;

        Ok(combine(&summaries))
    }
}

fn checked_days(days: i64) -> Result<u32> {
    if days <= 0 {
        return Err(SummaryError::invalid_argument("days", days));
    }
    u32::try_from(days).map_err(|_| SummaryError::invalid_argument("days", days))
}
