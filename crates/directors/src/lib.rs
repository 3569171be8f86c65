//! # Directors Crate
//!
//! Aggregates movie counts per director across every page of the catalog
//! and returns the directors above a threshold.
//!
//! ## Components
//!
//! - **retry**: `RetryPolicy` and the generic `retry_with_backoff` wrapper
//! - **tally**: `DirectorTally`, the per-call count map
//! - **aggregator**: `DirectorAggregator`, the pagination loop
//! - **error**: `AggregationError`
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog_client::{CatalogClientConfig, MovieCatalogClient};
//! use directors::DirectorAggregator;
//!
//! let client = MovieCatalogClient::new(CatalogClientConfig::default())?;
//! let aggregator = DirectorAggregator::new(client);
//!
//! for director in aggregator.get_directors(3).await? {
//!     println!("{director}");
//! }
//! ```

pub mod aggregator;
pub mod error;
pub mod retry;
pub mod tally;

pub use aggregator::DirectorAggregator;
pub use error::{AggregationError, Result};
pub use retry::{RetryExhausted, RetryPolicy, fetch_with_retry, retry_with_backoff};
pub use tally::DirectorTally;
