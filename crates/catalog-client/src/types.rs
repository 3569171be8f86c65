//! Wire types for the movie catalog's paginated search endpoint.
//!
//! A page on the wire looks like:
//!
//! ```json
//! {
//!   "page": 1,
//!   "per_page": 10,
//!   "total": 26,
//!   "total_pages": 3,
//!   "data": [{ "Title": "Midnight in Paris", "Director": "Woody Allen" }]
//! }
//! ```
//!
//! Only `data[].Director` and `total_pages` are decoded. Every other field is
//! ignored so upstream additions never break decoding.

use serde::{Deserialize, Deserializer};

/// Page numbers start at 1.
pub type PageNumber = u32;

/// Page count as reported upstream. Signed because the catalog may send
/// zero, negative or `null` values; anything below 1 ends traversal.
pub type TotalPages = i64;

// =============================================================================
// MovieRecord
// =============================================================================

/// A single movie entry from the catalog.
///
/// The director is the only field the aggregation consumes. A missing or
/// `null` `Director` decodes to the empty string, which is still a valid
/// tally key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MovieRecord {
    #[serde(rename = "Director", default, deserialize_with = "null_as_empty")]
    pub director: String,
}

impl MovieRecord {
    pub fn new(director: impl Into<String>) -> Self {
        Self {
            director: director.into(),
        }
    }
}

// =============================================================================
// MoviePage
// =============================================================================

/// One server-returned batch of movies plus the total page count known at
/// fetch time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MoviePage {
    /// `None` when the upstream sent no decodable item list at all.
    ///
    /// This is different from `Some(vec![])`: an absent list means "no data",
    /// an empty list is a well-formed page that happens to have no movies.
    #[serde(default)]
    pub data: Option<Vec<MovieRecord>>,

    /// Total page count as reported by this response. Absent or `null`
    /// decodes to 0.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_pages: TotalPages,
}

impl MoviePage {
    /// Build a page with the given movies.
    pub fn new(data: Vec<MovieRecord>, total_pages: TotalPages) -> Self {
        Self {
            data: Some(data),
            total_pages,
        }
    }

    /// Build a page that carries no item list.
    pub fn without_data(total_pages: TotalPages) -> Self {
        Self {
            data: None,
            total_pages,
        }
    }

    /// Convenience for building pages from director names.
    pub fn from_directors<I, S>(directors: I, total_pages: TotalPages) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(directors.into_iter().map(MovieRecord::new).collect(), total_pages)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    null_as_default(deserializer)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
