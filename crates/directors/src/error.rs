//! Error types for the directors crate.

use catalog_client::{FetchError, PageNumber};
use thiserror::Error;

use crate::retry::RetryExhausted;

/// Failure of a whole aggregation run.
///
/// There is no partial result: once any page exhausts its retries the run
/// is abandoned.
#[derive(Error, Debug)]
pub enum AggregationError {
    /// A page could not be fetched within the retry budget
    #[error("Failed to fetch directors: page {page} {source}")]
    PageFetch {
        page: PageNumber,
        #[source]
        source: RetryExhausted<FetchError>,
    },
}

impl AggregationError {
    /// The fetch error from the final attempt that ended the run.
    pub fn fetch_error(&self) -> &FetchError {
        match self {
            Self::PageFetch { source, .. } => source.last_error(),
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, AggregationError>;
