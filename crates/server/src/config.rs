//! Command-line and environment configuration.
//!
//! Every flag can also be set through the environment variable named next to
//! it, which is how the server is usually configured when deployed.

use std::net::SocketAddr;
use std::time::Duration;

use clap::{Args, Parser};

use catalog_client::{CatalogClientConfig, DEFAULT_CATALOG_URL};
use directors::RetryPolicy;

/// Where the catalog lives and how long to wait for it.
#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// Base URL of the movie catalog; pages are read from `<url>/search?page=N`
    #[arg(long, env = "CATALOG_BASE_URL", default_value = DEFAULT_CATALOG_URL)]
    pub catalog_url: String,

    /// Timeout for a single page request, in seconds
    #[arg(long, env = "CATALOG_TIMEOUT_SECS", default_value_t = 10)]
    pub request_timeout_secs: u64,
}

impl CatalogArgs {
    pub fn client_config(&self) -> CatalogClientConfig {
        CatalogClientConfig::default()
            .with_base_url(self.catalog_url.clone())
            .with_timeout(Duration::from_secs(self.request_timeout_secs))
    }
}

/// Per-page retry schedule.
#[derive(Args, Debug, Clone)]
pub struct RetryArgs {
    /// Total attempts per page, including the first
    #[arg(long, env = "RETRY_MAX_ATTEMPTS", default_value_t = 3)]
    pub max_attempts: u32,

    /// Delay before the second attempt, in milliseconds
    #[arg(long, env = "RETRY_INITIAL_BACKOFF_MS", default_value_t = 1000)]
    pub initial_backoff_ms: u64,

    /// Factor applied to the delay for each further attempt
    #[arg(long, env = "RETRY_BACKOFF_MULTIPLIER", default_value_t = 2)]
    pub backoff_multiplier: u32,
}

impl RetryArgs {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.initial_backoff_ms),
        )
        .with_multiplier(self.backoff_multiplier)
    }
}

/// Directors API server
#[derive(Parser, Debug, Clone)]
#[command(name = "directors-server")]
#[command(about = "HTTP API listing directors with more movies than a threshold", long_about = None)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "DIRECTORS_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    #[command(flatten)]
    pub retry: RetryArgs,
}
