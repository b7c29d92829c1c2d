//! NasaClient against a local stand-in for the NeoWs feed endpoint.

use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
use chrono::{NaiveDate, Utc};
use cosmic_watch::{
    clients::{FeedSource, NasaClient},
    NeoError,
};
use serde_json::{json, Value};
use std::collections::HashMap;

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/neo/rest/v1/feed", addr)
}

async fn echo_query(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({
        "element_count": 0,
        "query": params,
        "near_earth_objects": {}
    }))
}

#[tokio::test]
async fn sends_api_key_and_date_window() {
    let url = serve(Router::new().route("/neo/rest/v1/feed", get(echo_query))).await;
    let client = NasaClient::new(url, "TEST_KEY", 7).unwrap();

    let before = Utc::now().date_naive();
    let payload = client.fetch_feed().await.unwrap();
    let after = Utc::now().date_naive();

    let query = &payload["query"];
    assert_eq!(query["api_key"], "TEST_KEY");

    let start: NaiveDate = query["start_date"].as_str().unwrap().parse().unwrap();
    let end: NaiveDate = query["end_date"].as_str().unwrap().parse().unwrap();
    // The fetch may straddle midnight UTC
    assert!(before <= start && start <= after);
    assert_eq!((end - start).num_days(), 7);
}

#[tokio::test]
async fn explicit_window_is_passed_through() {
    let url = serve(Router::new().route("/neo/rest/v1/feed", get(echo_query))).await;
    let client = NasaClient::new(url, "TEST_KEY", 7).unwrap();

    let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    let payload = client.fetch_neo_feed(start, end).await.unwrap();

    assert_eq!(payload["query"]["start_date"], "2024-06-01");
    assert_eq!(payload["query"]["end_date"], "2024-06-03");
}

#[tokio::test]
async fn error_status_is_an_upstream_error() {
    let app = Router::new().route(
        "/neo/rest/v1/feed",
        get(|| async { (StatusCode::TOO_MANY_REQUESTS, "OVER_RATE_LIMIT") }),
    );
    let url = serve(app).await;
    let client = NasaClient::new(url, "TEST_KEY", 7).unwrap();

    let err = client.fetch_feed().await.unwrap_err();
    assert!(matches!(err, NeoError::UpstreamStatus { status: 429 }));
}

#[tokio::test]
async fn non_json_body_is_an_upstream_error() {
    let app = Router::new().route("/neo/rest/v1/feed", get(|| async { "<html>maintenance</html>" }));
    let url = serve(app).await;
    let client = NasaClient::new(url, "TEST_KEY", 7).unwrap();

    let err = client.fetch_feed().await.unwrap_err();
    assert!(matches!(err, NeoError::Upstream(_)));
}

#[tokio::test]
async fn unreachable_host_is_an_upstream_error() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = NasaClient::new(format!("http://{}/feed", addr), "TEST_KEY", 7).unwrap();

    let err = client.fetch_feed().await.unwrap_err();
    assert!(matches!(err, NeoError::Upstream(_)));
}
