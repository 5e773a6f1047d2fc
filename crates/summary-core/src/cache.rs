//! Cache trait for storing computed daily summaries.
//!
//! This module defines the [`SummaryCache`] trait that provides a unified
//! interface for remembering the [`Summary`] of each day already computed.

use async_trait::async_trait;
use std::time::Duration;

use crate::{dates::DateKey, error::Result, types::Summary};

/// Trait for caching per-day summaries.
///
/// Entries are write-once: a `put` for a key that already holds a live entry
/// leaves the stored value untouched.
#[async_trait]
pub trait SummaryCache: Send + Sync {
    /// Retrieves the cached summary for a day.
    ///
    /// Returns `Ok(Some(summary))` if cached, `Ok(None)` if not cached.
    async fn get(&self, date: &DateKey) -> Result<Option<Summary>>;

    /// Stores the summary for a day unless one is already cached.
    ///
    /// Returns `true` if this call populated the entry.
    async fn put(&self, date: &DateKey, summary: &Summary) -> Result<bool>;

    /// Number of live entries.
    async fn len(&self) -> Result<usize>;

    /// Returns true if no live entries are cached.
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Removes cache entries older than the specified TTL.
    ///
    /// Returns the number of entries invalidated.
    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize>;
}
