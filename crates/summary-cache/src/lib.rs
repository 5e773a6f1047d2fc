#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/resumen/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Caching implementations for daily purchase summaries.
//!
//! This crate provides implementations of the [`SummaryCache`] trait from `summary-core`:
//!
//! - [`InMemoryCache`] - Process-lifetime cache (default)
//! - [`NoopCache`] - No-op cache that doesn't store anything

/// In-memory cache implementation.
pub mod memory;
/// No-op cache implementation.
pub mod noop;

// Re-export the trait for convenience
pub use summary_core::SummaryCache;

// Re-export implementations
pub use memory::InMemoryCache;
pub use noop::NoopCache;
