//! # Catalog Client Crate
//!
//! Fetches pages from the remote movie catalog's paginated search endpoint.
//!
//! ## Main Components
//!
//! - **types**: Wire types (`MoviePage`, `MovieRecord`)
//! - **client**: The `PageFetcher` trait and the reqwest-backed `MovieCatalogClient`
//! - **error**: `FetchError`, one failed attempt for one page
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog_client::{CatalogClientConfig, MovieCatalogClient, PageFetcher};
//!
//! let client = MovieCatalogClient::new(CatalogClientConfig::default())?;
//! let page = client.fetch(1).await?;
//!
//! println!("page 1 of {}", page.total_pages);
//! ```
//!
//! The client never retries. Retrying and pagination live in the
//! `directors` crate, which only depends on the `PageFetcher` trait.

pub mod client;
pub mod error;
pub mod types;

pub use client::{CatalogClientConfig, DEFAULT_CATALOG_URL, MovieCatalogClient, PageFetcher};
pub use error::{FetchError, Result};
pub use types::{MoviePage, MovieRecord, PageNumber, TotalPages};
