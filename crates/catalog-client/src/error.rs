//! Error types for fetching catalog pages.

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::PageNumber;

/// A single failed attempt to fetch one catalog page.
///
/// Every variant carries the page number so the failure can be reported
/// without extra context from the caller.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request never produced a response (connect, timeout, body read)
    #[error("Request for page {page} failed: {source}")]
    Transport {
        page: PageNumber,
        #[source]
        source: reqwest::Error,
    },

    /// The catalog answered with a non-success status
    #[error("Catalog returned {status} for page {page}")]
    Status { page: PageNumber, status: StatusCode },

    /// The body was not a page in the expected shape
    #[error("Failed to decode page {page}: {source}")]
    Decode {
        page: PageNumber,
        #[source]
        source: serde_json::Error,
    },

    /// Any other upstream failure, described by message
    #[error("{message}")]
    Upstream { page: PageNumber, message: String },
}

impl FetchError {
    pub fn upstream(page: PageNumber, message: impl Into<String>) -> Self {
        Self::Upstream {
            page,
            message: message.into(),
        }
    }

    /// The page whose fetch failed.
    pub fn page(&self) -> PageNumber {
        match self {
            Self::Transport { page, .. }
            | Self::Status { page, .. }
            | Self::Decode { page, .. }
            | Self::Upstream { page, .. } => *page,
        }
    }
}

/// Convenience type alias for fetch results
pub type Result<T> = std::result::Result<T, FetchError>;
