//! Source trait for fetching a day's purchase records.
//!
//! [`RecordSource`] is the only capability the summary store needs from the
//! outside world. Implementations decide transport, timeouts and retries.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{dates::DateKey, error::Result, types::PurchaseRecord};

/// Provider of per-day purchase records.
///
/// Implementations should report failures as
/// [`SummaryError::Fetch`](crate::error::SummaryError::Fetch).
#[async_trait]
pub trait RecordSource: Send + Sync + Debug {
    /// Returns the name of this source (e.g., "Purchases API").
    fn name(&self) -> &str;

    /// Fetches every record reported for `date`.
    async fn fetch_records(&self, date: &DateKey) -> Result<Vec<PurchaseRecord>>;
}
