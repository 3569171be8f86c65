//! Per-invocation movie counts keyed by director.

use std::collections::HashMap;

use catalog_client::MovieRecord;

/// Movie count per director for one aggregation run.
///
/// A tally is created empty at the start of every run and dropped at the end;
/// it is never shared between runs.
#[derive(Debug, Default, Clone)]
pub struct DirectorTally {
    counts: HashMap<String, u64>,
}

impl DirectorTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one movie for its director. The empty string is a valid key.
    pub fn record(&mut self, movie: &MovieRecord) {
        *self.counts.entry(movie.director.clone()).or_insert(0) += 1;
    }

    /// Count every movie on a page.
    pub fn record_page(&mut self, movies: &[MovieRecord]) {
        for movie in movies {
            self.record(movie);
        }
    }

    /// Movies counted for `director` so far (0 if never seen).
    pub fn count(&self, director: &str) -> u64 {
        self.counts.get(director).copied().unwrap_or(0)
    }

    /// Number of distinct directors seen.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Every `(director, count)` pair, in no particular order.
    pub fn counts(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts
            .iter()
            .map(|(director, count)| (director.as_str(), *count))
    }

    /// Directors with strictly more than `threshold` movies, in ascending
    /// ordinal order.
    ///
    /// Any negative threshold selects every director seen.
    pub fn directors_above(&self, threshold: i64) -> Vec<String> {
        let mut directors: Vec<String> = self
            .counts
            .iter()
            .filter(|&(_, &count)| exceeds(count, threshold))
            .map(|(director, _)| director.clone())
            .collect();

        // Map keys are unique, so no dedup is needed after sorting
        directors.sort_unstable();
        directors
    }
}

fn exceeds(count: u64, threshold: i64) -> bool {
    match u64::try_from(threshold) {
        Ok(threshold) => count > threshold,
        Err(_) => true,
    }
}
