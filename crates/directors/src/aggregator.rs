//! # Director Aggregator
//!
//! Walks the catalog page by page and reports the directors with more movies
//! than a threshold:
//! 1. Start from an empty tally at page 1
//! 2. Fetch the page (with retries)
//! 3. Stop early if the page has no item list
//! 4. Fold the page's directors into the tally
//! 5. Continue while `page < total_pages`, re-reading `total_pages` from
//!    every response
//! 6. Select directors above the threshold, sorted
//!
//! Pages are fetched strictly in order, one at a time. All run state is local
//! to a call, so concurrent calls on the same aggregator are independent.

use std::time::Instant;

use tracing::{debug, info, warn};

use catalog_client::{PageFetcher, PageNumber};

use crate::error::{AggregationError, Result};
use crate::retry::{RetryPolicy, fetch_with_retry};
use crate::tally::DirectorTally;

/// Drives pagination and aggregation over a [`PageFetcher`].
#[derive(Debug, Clone)]
pub struct DirectorAggregator<F> {
    fetcher: F,
    retry_policy: RetryPolicy,
}

impl<F: PageFetcher> DirectorAggregator<F> {
    /// Create an aggregator with the default retry policy
    /// (3 attempts, 1s initial backoff, doubling).
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            retry_policy: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Directors with strictly more than `threshold` movies across the
    /// catalog, in ascending order.
    ///
    /// Returns an empty list when nobody qualifies. Fails if any page still
    /// fails after its retries.
    pub async fn get_directors(&self, threshold: i64) -> Result<Vec<String>> {
        let start_time = Instant::now();
        info!("Fetching directors with a threshold of {} movies", threshold);

        let tally = self.collect_tally().await?;
        let directors = tally.directors_above(threshold);

        info!(
            "Found {} of {} directors above threshold {} in {:.2?}",
            directors.len(),
            tally.len(),
            threshold,
            start_time.elapsed()
        );
        Ok(directors)
    }

    /// Fetch every page and fold it into a fresh tally.
    pub async fn collect_tally(&self) -> Result<DirectorTally> {
        let mut tally = DirectorTally::new();
        let mut page: PageNumber = 1;

        loop {
            let movie_page = fetch_with_retry(&self.fetcher, &self.retry_policy, page)
                .await
                .map_err(|source| AggregationError::PageFetch { page, source })?;

            let Some(movies) = movie_page.data else {
                warn!(page, "No data found on page, stopping");
                break;
            };

            tally.record_page(&movies);
            debug!(
                page,
                total_pages = movie_page.total_pages,
                movies = movies.len(),
                directors = tally.len(),
                "Folded page into tally"
            );

            // The latest reported total wins, even if it disagrees with
            // earlier pages. A total below 1 ends traversal here.
            if i64::from(page) >= movie_page.total_pages {
                break;
            }
            page += 1;
        }

        Ok(tally)
    }
}
