//! HTTP-backed page fetcher for the movie catalog.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};

use crate::error::{FetchError, Result};
use crate::types::{MoviePage, PageNumber};

/// Catalog queried when no base URL is configured.
pub const DEFAULT_CATALOG_URL: &str = "https://wiremock.dev.eroninternational.com/api/movies";

/// Anything that can fetch one catalog page by number.
///
/// Implementations must not retry on their own; retrying is the caller's
/// concern. `Send + Sync` lets one fetcher serve concurrent aggregations.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch page `page` (1-based).
    async fn fetch(&self, page: PageNumber) -> Result<MoviePage>;
}

#[async_trait]
impl<T> PageFetcher for Arc<T>
where
    T: PageFetcher + ?Sized,
{
    async fn fetch(&self, page: PageNumber) -> Result<MoviePage> {
        (**self).fetch(page).await
    }
}

/// Settings for [`MovieCatalogClient`].
#[derive(Debug, Clone)]
pub struct CatalogClientConfig {
    /// Base address; requests go to `<base_url>/search?page=<n>`
    pub base_url: String,
    /// Whole-request timeout, applied per attempt
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for CatalogClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CATALOG_URL.to_string(),
            timeout: Duration::from_secs(10),
            user_agent: concat!("reel-directors/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl CatalogClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for the catalog's paginated search endpoint.
///
/// Cheap to clone: the underlying `reqwest::Client` shares its connection
/// pool between clones.
#[derive(Debug, Clone)]
pub struct MovieCatalogClient {
    client: Client,
    search_url: String,
}

impl MovieCatalogClient {
    /// Build a client from the given configuration.
    ///
    /// Fails only if the TLS backend or HTTP client cannot be initialised.
    pub fn new(config: CatalogClientConfig) -> std::result::Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()?;

        let search_url = format!("{}/search", config.base_url.trim_end_matches('/'));
        debug!("Catalog client targeting {}", search_url);

        Ok(Self { client, search_url })
    }

    /// The endpoint pages are requested from (without the page query).
    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    fn page_url(&self, page: PageNumber) -> String {
        format!("{}?page={}", self.search_url, page)
    }
}

#[async_trait]
impl PageFetcher for MovieCatalogClient {
    async fn fetch(&self, page: PageNumber) -> Result<MoviePage> {
        let url = self.page_url(page);
        debug!(page, url = %url, "Requesting catalog page");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Transport { page, source })?;

        let status = response.status();
        if !status.is_success() {
            error!(page, %status, "Catalog returned an error status");
            return Err(FetchError::Status { page, status });
        }

        // Read the body first so a malformed body surfaces as a decode
        // failure rather than a transport failure.
        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Transport { page, source })?;

        serde_json::from_str(&body).map_err(|source| {
            error!(page, error = %source, "Catalog page did not match the expected shape");
            FetchError::Decode { page, source }
        })
    }
}
