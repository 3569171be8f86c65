//! Retry with exponential backoff.
//!
//! The policy is explicit data rather than framework configuration, so the
//! attempt cap and delay schedule can be read and tested directly.
//!
//! With the default policy a page gets three attempts:
//!
//! | attempt | delay before it |
//! |---------|-----------------|
//! | 1       | none            |
//! | 2       | 1s              |
//! | 3       | 2s              |
//!
//! Every error is retried the same way. The wrapper has no notion of
//! retryable vs. fatal causes, so a malformed page is retried just like a
//! dropped connection.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, error, warn};

use catalog_client::{FetchError, MoviePage, PageFetcher, PageNumber};

/// Attempt cap and backoff schedule for one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. 0 is treated as 1.
    pub max_attempts: u32,
    /// Delay before the second attempt
    pub initial_delay: Duration,
    /// Factor applied to the delay for every further attempt
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            multiplier: 2,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            ..Self::default()
        }
    }

    pub fn with_multiplier(mut self, multiplier: u32) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// A single attempt, no retries.
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Effective attempt cap.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay to wait before `attempt` (1-based). The first attempt never waits.
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }
        let factor = self.multiplier.saturating_pow(attempt - 2);
        self.initial_delay.saturating_mul(factor)
    }
}

/// Every attempt failed. Holds the error from the final attempt, untouched.
#[derive(Error, Debug)]
#[error("gave up after {attempts} attempt(s): {last_error}")]
pub struct RetryExhausted<E> {
    pub attempts: u32,
    #[source]
    pub last_error: E,
}

impl<E> RetryExhausted<E> {
    pub fn last_error(&self) -> &E {
        &self.last_error
    }

    pub fn into_last_error(self) -> E {
        self.last_error
    }
}

/// Run `operation` until it succeeds or the policy's attempt cap is hit.
///
/// `operation` receives the 1-based attempt number. Between attempts the
/// current task sleeps for [`RetryPolicy::delay_before`]; other tasks keep
/// running.
pub async fn retry_with_backoff<T, E, F, Fut>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, RetryExhausted<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = policy.attempts();
    let mut attempt = 1;

    loop {
        match operation(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(attempt, "Succeeded after retrying");
                }
                return Ok(value);
            }
            Err(err) if attempt >= max_attempts => {
                error!(attempt, error = %err, "Giving up after final attempt");
                return Err(RetryExhausted {
                    attempts: attempt,
                    last_error: err,
                });
            }
            Err(err) => {
                let delay = policy.delay_before(attempt + 1);
                warn!(
                    attempt,
                    max_attempts,
                    backoff_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "Attempt failed, retrying"
                );
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

/// Fetch one page, retrying the same page number per `policy`.
pub async fn fetch_with_retry<F>(
    fetcher: &F,
    policy: &RetryPolicy,
    page: PageNumber,
) -> Result<MoviePage, RetryExhausted<FetchError>>
where
    F: PageFetcher + ?Sized,
{
    retry_with_backoff(policy, |attempt| {
        debug!(page, attempt, "Fetching page");
        fetcher.fetch(page)
    })
    .await
}
