//! Server crate for the directors API.
//!
//! This crate wires the catalog client and the aggregator behind an HTTP
//! endpoint and holds the shared configuration flags.

pub mod api;
pub mod config;

pub use api::{AppState, ApiError, DirectorsResponse, ErrorBody, router, serve};
pub use config::{CatalogArgs, RetryArgs, ServerConfig};

use anyhow::{Context, Result};
use catalog_client::MovieCatalogClient;
use directors::DirectorAggregator;
use tracing::debug;

/// Build an aggregator over the real catalog from parsed flags.
pub fn build_aggregator(
    catalog: &CatalogArgs,
    retry: &RetryArgs,
) -> Result<DirectorAggregator<MovieCatalogClient>> {
    let client = MovieCatalogClient::new(catalog.client_config())
        .context("Failed to build catalog HTTP client")?;
    let aggregator = DirectorAggregator::new(client).with_retry_policy(retry.policy());
    debug!(policy = ?aggregator.retry_policy(), "Built director aggregator");
    Ok(aggregator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_build_aggregator_applies_retry_flags() {
        let config = ServerConfig::try_parse_from([
            "directors-server",
            "--max-attempts",
            "5",
            "--catalog-url",
            "http://127.0.0.1:9/api/movies",
        ])
        .unwrap();

        let aggregator = build_aggregator(&config.catalog, &config.retry).unwrap();

        assert_eq!(aggregator.retry_policy().attempts(), 5);
    }
}
