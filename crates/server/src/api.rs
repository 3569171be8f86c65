//! HTTP boundary for the directors query.
//!
//! `GET /api/directors?threshold=N` returns `{"directors": [...]}`.
//! Bad input maps to 400 and any aggregation failure maps to a generic 500;
//! the underlying cause is logged but never sent to the client.

use std::future::Future;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use catalog_client::PageFetcher;
use directors::{AggregationError, DirectorAggregator};

/// Aggregator shared by every request. The fetcher is type-erased so the
/// router does not care which catalog backs it.
pub type SharedAggregator = Arc<DirectorAggregator<Arc<dyn PageFetcher>>>;

#[derive(Clone)]
pub struct AppState {
    aggregator: SharedAggregator,
}

impl AppState {
    pub fn new(aggregator: SharedAggregator) -> Self {
        Self { aggregator }
    }

    /// Wrap any fetcher into shared state.
    pub fn from_fetcher(
        fetcher: impl PageFetcher + 'static,
        retry_policy: directors::RetryPolicy,
    ) -> Self {
        let fetcher: Arc<dyn PageFetcher> = Arc::new(fetcher);
        Self::new(Arc::new(
            DirectorAggregator::new(fetcher).with_retry_policy(retry_policy),
        ))
    }
}

#[derive(Debug, Deserialize)]
pub struct DirectorsQuery {
    pub threshold: i64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectorsResponse {
    pub directors: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
    pub status: u16,
}

/// Errors surfaced by the HTTP layer
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing, non-numeric, or negative threshold
    #[error("Invalid request parameters")]
    InvalidParameters,

    #[error(transparent)]
    Aggregation(#[from] AggregationError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidParameters => {
                (StatusCode::BAD_REQUEST, "Invalid request parameters")
            }
            ApiError::Aggregation(err) => {
                error!(error = %err, "Directors request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred",
                )
            }
        };

        let body = ErrorBody {
            message: message.to_string(),
            status: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/directors", get(get_directors))
        .route("/health", get(health))
        .with_state(state)
}

/// Serve the router on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Directors API listening on http://{}", addr);
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn get_directors(
    State(state): State<AppState>,
    query: Result<Query<DirectorsQuery>, QueryRejection>,
) -> Result<Json<DirectorsResponse>, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        debug!(%rejection, "Rejected directors query");
        ApiError::InvalidParameters
    })?;

    if query.threshold < 0 {
        debug!(threshold = query.threshold, "Rejected negative threshold");
        return Err(ApiError::InvalidParameters);
    }

    let directors = state.aggregator.get_directors(query.threshold).await?;
    Ok(Json(DirectorsResponse { directors }))
}

async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use catalog_client::FetchError;
    use directors::RetryExhausted;

    async fn body_of(response: Response) -> ErrorBody {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_invalid_parameters_is_bad_request() {
        let response = ApiError::InvalidParameters.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_of(response).await,
            ErrorBody {
                message: "Invalid request parameters".to_string(),
                status: 400,
            }
        );
    }

    #[tokio::test]
    async fn test_aggregation_failure_hides_cause() {
        let err = ApiError::from(AggregationError::PageFetch {
            page: 2,
            source: RetryExhausted {
                attempts: 3,
                last_error: FetchError::upstream(2, "secret upstream detail"),
            },
        });

        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(response).await;
        assert_eq!(body.message, "An unexpected error occurred");
        assert_eq!(body.status, 500);
    }
}
