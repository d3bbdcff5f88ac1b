//! Integration tests for admin user management.

mod common;

use axum::http::StatusCode;

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_list_users_admin_only() {
    let app = common::TestApp::new().await;
    app.create_test_user("Admin", "boss@example.com", "password123", "admin")
        .await;
    app.create_test_user("Plain", "plain2@example.com", "password123", "standard")
        .await;

    let admin_token = app.login("boss@example.com", "password123").await;
    let response = app
        .request("GET", "/api/users", None, Some(&admin_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response
            .body
            .pointer("/data/total_items")
            .and_then(|v| v.as_i64()),
        Some(2)
    );

    let plain_token = app.login("plain2@example.com", "password123").await;
    let response = app
        .request("GET", "/api/users", None, Some(&plain_token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_promote_then_demote_user() {
    let app = common::TestApp::new().await;
    app.create_test_user("Admin", "boss2@example.com", "password123", "admin")
        .await;
    let target = app
        .create_test_user("Target", "target@example.com", "password123", "standard")
        .await;
    let token = app.login("boss2@example.com", "password123").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/users/{}/role", target),
            Some(serde_json::json!({ "role": "admin" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(
        response.body.pointer("/data/role").and_then(|v| v.as_str()),
        Some("admin")
    );
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_admin_cannot_demote_self() {
    let app = common::TestApp::new().await;
    let admin_id = app
        .create_test_user("Admin", "solo@example.com", "password123", "admin")
        .await;
    let token = app.login("solo@example.com", "password123").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/users/{}/role", admin_id),
            Some(serde_json::json!({ "role": "standard" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_delete_user_without_history_is_hard() {
    let app = common::TestApp::new().await;
    app.create_test_user("Admin", "del@example.com", "password123", "admin")
        .await;
    let target = app
        .create_test_user("Fresh", "fresh@example.com", "password123", "standard")
        .await;
    let token = app.login("del@example.com", "password123").await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/users/{}", target),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(
        response
            .body
            .pointer("/data/outcome")
            .and_then(|v| v.as_str()),
        Some("deleted")
    );

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = $1")
        .bind(target)
        .fetch_one(&app.db_pool)
        .await
        .expect("Failed to count users");
    assert_eq!(rows, 0);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_delete_user_with_history_deactivates() {
    let app = common::TestApp::new().await;
    let admin_id = app
        .create_test_user("Admin", "del2@example.com", "password123", "admin")
        .await;
    let target = app
        .create_test_user("Veteran", "vet@example.com", "password123", "standard")
        .await;
    let event_id = app.create_test_event("History Event", admin_id).await;
    let token = app.login("del2@example.com", "password123").await;

    app.request(
        "POST",
        "/api/attendance/mark",
        Some(serde_json::json!({
            "user_id": target,
            "event_id": event_id,
            "status": "present",
        })),
        Some(&token),
    )
    .await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/users/{}", target),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(
        response
            .body
            .pointer("/data/outcome")
            .and_then(|v| v.as_str()),
        Some("deactivated")
    );

    let active: bool = sqlx::query_scalar("SELECT is_active FROM users WHERE id = $1")
        .bind(target)
        .fetch_one(&app.db_pool)
        .await
        .expect("User row should survive");
    assert!(!active);
}
