#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/resumen/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for daily purchase summaries.
//!
//! This crate provides the foundational pieces shared by every other crate:
//!
//! - [`PurchaseRecord`](types::PurchaseRecord) and [`Summary`](types::Summary) - Data model
//! - [`reduce`](aggregate::reduce) - One day of records into a summary
//! - [`combine`](combine::combine) - Many summaries into one
//! - [`DateKey`](dates::DateKey) - Canonical day identity and range expansion
//! - [`RecordSource`](source::RecordSource) - Fetch capability abstraction
//! - [`SummaryCache`](cache::SummaryCache) - Caching abstraction

/// Reduction of records into a summary.
pub mod aggregate;
/// Cache trait for storing computed summaries.
pub mod cache;
/// Combination of partial summaries.
pub mod combine;
/// Date keys and range expansion.
pub mod dates;
/// Error types for summary operations.
pub mod error;
/// Source trait for fetching purchase records.
pub mod source;
/// Core data types (PurchaseRecord, Summary).
pub mod types;

// Re-export commonly used items at crate root
pub use aggregate::reduce;
pub use cache::SummaryCache;
pub use combine::combine;
pub use dates::DateKey;
pub use error::{Result, SummaryError};
pub use source::RecordSource;
pub use types::{PurchaseRecord, Summary};
