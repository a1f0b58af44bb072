//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use storefront_api::bootstrap::{self, Application};
use storefront_api::config::AppConfig;
use storefront_test_support::FixedClock;

/// Build the full application with deterministic time and a single channel
/// partition, so event ordering in tests is exact.
pub fn build_test_application() -> Application {
    let config = AppConfig {
        partitions: 1,
        ..AppConfig::default()
    };
    let clock = Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ));
    bootstrap::build(&config, clock)
}

async fn read_json(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    // 202 responses carry no body.
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };
    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    read_json(app.oneshot(request).await.unwrap()).await
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    read_json(app.oneshot(request).await.unwrap()).await
}

/// Send a DELETE request and return the response.
pub async fn delete_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    read_json(app.oneshot(request).await.unwrap()).await
}

/// Polls `uri` until `predicate` holds for the response body, failing the
/// test if downstream processing has not settled within the budget.
pub async fn get_json_until(
    app: &Router,
    uri: &str,
    predicate: impl Fn(&serde_json::Value) -> bool,
) -> serde_json::Value {
    for _ in 0..200 {
        let (status, json) = get_json(app.clone(), uri).await;
        if status == StatusCode::OK && predicate(&json) {
            return json;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("response at {uri} did not reach the expected state in time");
}
