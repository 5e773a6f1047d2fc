#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/resumen/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Date-keyed purchase summaries.
//!
//! This crate re-exports the core types and cache implementations, and provides
//! the [`SummaryStore`] that ties a record source to a per-day cache.
//!
//! # Features
//!
//! - `remote` - HTTP record source for the purchases API (default)
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use summary::{RemoteSource, SummaryStore};
//!
//! #[tokio::main]
//! async fn main() -> summary::Result<()> {
//!     let store = SummaryStore::new(Arc::new(RemoteSource::new()?));
//!
//!     let summary = store.get_by_range(2019, 12, 1, 5).await?;
//!     println!("{:?}", summary);
//!
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use summary_core::*;

// Cache implementations
pub use summary_cache::{InMemoryCache, NoopCache};

// Sources
#[cfg(feature = "remote")]
pub use summary_remote::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, RemoteSource};

mod store;
pub use store::SummaryStore;
