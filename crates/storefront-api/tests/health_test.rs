//! Integration test for the health endpoint.

mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_health_check_returns_ok() {
    let application = common::build_test_application();

    let (status, json) = common::get_json(application.router, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}
