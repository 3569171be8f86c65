//! Integration tests for MovieCatalogClient against a fake catalog.

use std::collections::HashMap;
use std::time::Duration;

use axum::{
    Router,
    extract::Query,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tokio::net::TcpListener;

use catalog_client::{CatalogClientConfig, FetchError, MovieCatalogClient, PageFetcher};

/// Fake catalog: page 1 is well-formed, page 2 is a server error,
/// page 3 is not JSON, page 4 has no data list.
async fn fake_search(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    match params.get("page").map(String::as_str) {
        Some("1") => (
            StatusCode::OK,
            r#"{"page":1,"per_page":10,"total":3,"total_pages":4,
                "data":[{"Title":"Up","Director":"Pete Docter"},
                        {"Title":"Inside Out","Director":"Pete Docter"},
                        {"Title":"Heat","Director":"Michael Mann"}]}"#,
        )
            .into_response(),
        Some("2") => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        Some("3") => (StatusCode::OK, "<html>not json</html>").into_response(),
        Some("4") => (StatusCode::OK, r#"{"page":4,"total_pages":4}"#).into_response(),
        _ => (StatusCode::NOT_FOUND, "no such page").into_response(),
    }
}

async fn start_fake_catalog() -> (String, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake catalog");
    let addr = listener.local_addr().expect("Failed to get local address");

    let app = Router::new().route("/api/movies/search", get(fake_search));
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Fake catalog failed");
    });

    (format!("http://{}/api/movies", addr), handle)
}

fn client_for(base_url: &str) -> MovieCatalogClient {
    MovieCatalogClient::new(
        CatalogClientConfig::default()
            .with_base_url(base_url)
            .with_timeout(Duration::from_secs(5)),
    )
    .expect("Failed to build client")
}

#[tokio::test]
async fn test_fetch_decodes_page() {
    let (base_url, handle) = start_fake_catalog().await;
    let client = client_for(&base_url);

    let page = client.fetch(1).await.expect("page 1 should decode");

    assert_eq!(page.total_pages, 4);
    let directors: Vec<_> = page
        .data
        .unwrap()
        .into_iter()
        .map(|m| m.director)
        .collect();
    assert_eq!(directors, vec!["Pete Docter", "Pete Docter", "Michael Mann"]);

    handle.abort();
}

#[tokio::test]
async fn test_fetch_reports_error_status() {
    let (base_url, handle) = start_fake_catalog().await;
    let client = client_for(&base_url);

    let err = client.fetch(2).await.unwrap_err();

    match err {
        FetchError::Status { page, status } => {
            assert_eq!(page, 2);
            assert_eq!(status.as_u16(), 500);
        }
        other => panic!("expected status error, got {other:?}"),
    }

    handle.abort();
}

#[tokio::test]
async fn test_fetch_reports_decode_failure() {
    let (base_url, handle) = start_fake_catalog().await;
    let client = client_for(&base_url);

    let err = client.fetch(3).await.unwrap_err();

    assert!(matches!(err, FetchError::Decode { page: 3, .. }), "got {err:?}");

    handle.abort();
}

#[tokio::test]
async fn test_fetch_page_without_data() {
    let (base_url, handle) = start_fake_catalog().await;
    let client = client_for(&base_url);

    let page = client.fetch(4).await.expect("page 4 should decode");

    assert!(page.data.is_none());
    assert_eq!(page.total_pages, 4);

    handle.abort();
}

#[tokio::test]
async fn test_fetch_reports_transport_failure() {
    // Bind then drop so nothing is listening on the port.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{}/api/movies", addr));
    let err = client.fetch(1).await.unwrap_err();

    assert!(matches!(err, FetchError::Transport { page: 1, .. }), "got {err:?}");
}
