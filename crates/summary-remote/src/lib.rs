#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/resumen/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! HTTP record source for the purchases API.
//!
//! This crate provides [`RemoteSource`], an implementation of the
//! [`RecordSource`] trait from `summary-core` that downloads one day of
//! customer visits per request.
//!
//! # Example
//!
//! ```no_run
//! use summary_core::{DateKey, RecordSource};
//! use summary_remote::RemoteSource;
//!
//! # async fn example() -> summary_core::Result<()> {
//! let source = RemoteSource::new()?;
//! let date = DateKey::from_ymd(2019, 12, 1)?;
//!
//! let records = source.fetch_records(&date).await?;
//! println!("Fetched {} visits", records.len());
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use summary_core::{DateKey, PurchaseRecord, RecordSource, Result, SummaryError};
use tracing::debug;

/// Default purchases API base URL.
pub const DEFAULT_BASE_URL: &str = "https://apirecruit-gjvkhl2c6a-uc.a.run.app";

/// Default HTTP timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Record source backed by the purchases HTTP API.
///
/// Implements [`RecordSource`] by calling `GET {base_url}/compras/{date}`.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteSource {
    /// Create a source for the default API with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::Other`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Create a source for `base_url` whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::Other`] if the HTTP client cannot be built.
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SummaryError::Other(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self::with_client(client, base_url))
    }

    /// Create a source using the provided HTTP client for all requests.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// The API base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the purchases URL for a day.
    fn build_url(&self, date: &DateKey) -> String {
        format!("{}/compras/{}", self.base_url.trim_end_matches('/'), date)
    }
}

#[async_trait]
impl RecordSource for RemoteSource {
    fn name(&self) -> &str {
        "Purchases API"
    }

    async fn fetch_records(&self, date: &DateKey) -> Result<Vec<PurchaseRecord>> {
        let url = self.build_url(date);
        debug!("Fetching purchases: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SummaryError::Fetch(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SummaryError::Fetch(format!(
                "Rate limited by {} for {}",
                self.name(),
                date
            )));
        }

        if !response.status().is_success() {
            return Err(SummaryError::Fetch(format!(
                "HTTP {} for {}",
                response.status(),
                date
            )));
        }

        let visits: Vec<CustomerVisit> = response
            .json()
            .await
            .map_err(|e| SummaryError::Fetch(format!("Invalid payload for {date}: {e}")))?;

        debug!(count = visits.len(), "Fetched purchases for {}", date);
        Ok(visits.into_iter().map(CustomerVisit::into_record).collect())
    }
}

// ============================================================================
// Purchases API Response Types
// ============================================================================

/// One customer visit as returned by the purchases API.
#[derive(Debug, Deserialize)]
struct CustomerVisit {
    compro: bool,
    monto: Option<f64>,
    tdc: Option<String>,
}

impl CustomerVisit {
    fn into_record(self) -> PurchaseRecord {
        PurchaseRecord {
            purchased: self.compro,
            amount: self.monto.unwrap_or_default(),
            payment_method: self.tdc.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let source = RemoteSource::with_base_url("http://localhost:9000/", DEFAULT_TIMEOUT).unwrap();
        let date = DateKey::from_ymd(2019, 12, 1).unwrap();

        assert_eq!(source.build_url(&date), "http://localhost:9000/compras/2019-12-01");
    }

    #[test]
    fn test_source_info() {
        let source = RemoteSource::new().unwrap();
        assert_eq!(source.name(), "Purchases API");
        assert_eq!(source.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_visit_payload_mapping() {
        let body = r#"[
            {"clientId": 1, "nombre": "Ana", "compro": true, "tdc": "visa gold", "monto": 120.5, "date": "2019-12-01"},
            {"clientId": 2, "nombre": "Luis", "compro": false, "date": "2019-12-01"},
            {"clientId": 3, "nombre": "Eva", "compro": false, "tdc": null, "monto": null}
        ]"#;
        let visits: Vec<CustomerVisit> = serde_json::from_str(body).unwrap();
        let records: Vec<PurchaseRecord> = visits.into_iter().map(CustomerVisit::into_record).collect();

        assert_eq!(records[0], PurchaseRecord::purchase(120.5, "visa gold"));
        assert_eq!(records[1], PurchaseRecord::no_purchase());
        assert_eq!(records[2], PurchaseRecord::no_purchase());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_error() {
        let source =
            RemoteSource::with_base_url("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let date = DateKey::from_ymd(2019, 12, 1).unwrap();

        let err = source.fetch_records(&date).await.unwrap_err();
        assert!(matches!(err, SummaryError::Fetch(_)));
    }
}
