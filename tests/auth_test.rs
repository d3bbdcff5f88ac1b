//! Integration tests for registration and authentication flow.

mod common;

use axum::http::StatusCode;

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_register_success() {
    let app = common::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "name": "Asha Verma",
                "email": "asha@example.com",
                "password": "password123",
                "trade": "Electronics",
                "department": "Training",
                "roll_no": "EL-2024-001",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert!(response.body.pointer("/data/token").is_some());
    assert_eq!(
        response
            .body
            .pointer("/data/user/email")
            .and_then(|v| v.as_str()),
        Some("asha@example.com")
    );
    // New registrations never come back as admins.
    assert_eq!(
        response
            .body
            .pointer("/data/user/role")
            .and_then(|v| v.as_str()),
        Some("standard")
    );
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_register_duplicate_email() {
    let app = common::TestApp::new().await;
    app.create_test_user("Dup User", "dup@example.com", "password123", "standard")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "name": "Dup Again",
                "email": "DUP@example.com",
                "password": "password123",
                "trade": "Fitter",
                "roll_no": "FT-2024-999",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body.get("error").and_then(|v| v.as_str()),
        Some("DUPLICATE_KEY")
    );
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_register_short_password() {
    let app = common::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "name": "Short Pass",
                "email": "short@example.com",
                "password": "abc",
                "trade": "Welder",
                "roll_no": "WD-2024-002",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_login_success() {
    let app = common::TestApp::new().await;
    app.create_test_user("Login User", "login@example.com", "password123", "standard")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "login@example.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert!(response.body.pointer("/data/token").is_some());
    assert!(response.body.pointer("/data/expires_at").is_some());
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_login_wrong_password() {
    let app = common::TestApp::new().await;
    app.create_test_user("Wrong Pass", "wrong@example.com", "password123", "standard")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "wrong@example.com",
                "password": "not-the-password",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.body.get("error").and_then(|v| v.as_str()),
        Some("INVALID_CREDENTIALS")
    );
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_login_unknown_email() {
    let app = common::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "nobody@example.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_profile_authenticated() {
    let app = common::TestApp::new().await;
    app.create_test_user("Me User", "me@example.com", "password123", "standard")
        .await;
    let token = app.login("me@example.com", "password123").await;

    let response = app
        .request("GET", "/api/auth/profile", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response
            .body
            .pointer("/data/email")
            .and_then(|v| v.as_str()),
        Some("me@example.com")
    );
    // The password hash must never leave the server.
    assert!(response.body.pointer("/data/password_hash").is_none());
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_profile_unauthenticated() {
    let app = common::TestApp::new().await;

    let response = app.request("GET", "/api/auth/profile", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_deactivated_user_token_rejected() {
    let app = common::TestApp::new().await;
    let id = app
        .create_test_user("Gone User", "gone@example.com", "password123", "standard")
        .await;
    let token = app.login("gone@example.com", "password123").await;

    sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
        .bind(id)
        .execute(&app.db_pool)
        .await
        .expect("Failed to deactivate user");

    let response = app
        .request("GET", "/api/auth/profile", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_change_password_flow() {
    let app = common::TestApp::new().await;
    app.create_test_user("Rotate", "rotate@example.com", "password123", "standard")
        .await;
    let token = app.login("rotate@example.com", "password123").await;

    let response = app
        .request(
            "PUT",
            "/api/auth/change-password",
            Some(serde_json::json!({
                "current_password": "password123",
                "new_password": "password456",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    // Old password no longer works; new one does.
    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "rotate@example.com",
                "password": "password123",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    app.login("rotate@example.com", "password456").await;
}
