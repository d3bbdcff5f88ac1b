//! Integration tests for health endpoints.

mod common;

use axum::http::StatusCode;

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_health() {
    let app = common::TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body.pointer("/data/status").and_then(|v| v.as_str()),
        Some("ok")
    );
    assert!(response.body.pointer("/data/version").is_some());
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_health_detailed() {
    let app = common::TestApp::new().await;

    let response = app.request("GET", "/api/health/detailed", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body.pointer("/data/database").and_then(|v| v.as_str()),
        Some("connected")
    );
}
