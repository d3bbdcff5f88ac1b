//! Integration tests for attendance marking, reports, and statistics.

mod common;

use axum::http::StatusCode;

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_mark_attendance() {
    let app = common::TestApp::new().await;
    let admin_id = app
        .create_test_user("Admin", "marker@example.com", "password123", "admin")
        .await;
    let user_id = app
        .create_test_user("Student", "student@example.com", "password123", "standard")
        .await;
    let event_id = app.create_test_event("Morning Assembly", admin_id).await;
    let token = app.login("marker@example.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/attendance/mark",
            Some(serde_json::json!({
                "user_id": user_id,
                "event_id": event_id,
                "status": "present",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(
        response
            .body
            .pointer("/data/status")
            .and_then(|v| v.as_str()),
        Some("present")
    );

    let count: i64 =
        sqlx::query_scalar("SELECT attendee_count FROM events WHERE id = $1")
            .bind(event_id)
            .fetch_one(&app.db_pool)
            .await
            .expect("Failed to read attendee count");
    assert_eq!(count, 1);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_remark_updates_instead_of_duplicating() {
    let app = common::TestApp::new().await;
    let admin_id = app
        .create_test_user("Admin", "remark@example.com", "password123", "admin")
        .await;
    let user_id = app
        .create_test_user("Student", "student2@example.com", "password123", "standard")
        .await;
    let event_id = app.create_test_event("Workshop", admin_id).await;
    let token = app.login("remark@example.com", "password123").await;

    for status in ["present", "absent"] {
        let response = app
            .request(
                "POST",
                "/api/attendance/mark",
                Some(serde_json::json!({
                    "user_id": user_id,
                    "event_id": event_id,
                    "status": status,
                })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    }

    let rows: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM attendance WHERE user_id = $1 AND event_id = $2",
    )
    .bind(user_id)
    .bind(event_id)
    .fetch_one(&app.db_pool)
    .await
    .expect("Failed to count attendance rows");
    assert_eq!(rows, 1);

    // Flipping to absent drops the event's present count back to zero.
    let count: i64 =
        sqlx::query_scalar("SELECT attendee_count FROM events WHERE id = $1")
            .bind(event_id)
            .fetch_one(&app.db_pool)
            .await
            .expect("Failed to read attendee count");
    assert_eq!(count, 0);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_mark_forbidden_for_standard_user() {
    let app = common::TestApp::new().await;
    let admin_id = app
        .create_test_user("Admin", "owner@example.com", "password123", "admin")
        .await;
    let user_id = app
        .create_test_user("Student", "student3@example.com", "password123", "standard")
        .await;
    let event_id = app.create_test_event("Seminar", admin_id).await;
    let token = app.login("student3@example.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/attendance/mark",
            Some(serde_json::json!({
                "user_id": user_id,
                "event_id": event_id,
                "status": "present",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_own_history_visible_others_forbidden() {
    let app = common::TestApp::new().await;
    app.create_test_user("Admin", "hist@example.com", "password123", "admin")
        .await;
    let a = app
        .create_test_user("User A", "a@example.com", "password123", "standard")
        .await;
    let b = app
        .create_test_user("User B", "b@example.com", "password123", "standard")
        .await;
    let token_a = app.login("a@example.com", "password123").await;

    let response = app
        .request(
            "GET",
            &format!("/api/attendance/user/{}", a),
            None,
            Some(&token_a),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "GET",
            &format!("/api/attendance/user/{}", b),
            None,
            Some(&token_a),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_stats_overview() {
    let app = common::TestApp::new().await;
    let admin_id = app
        .create_test_user("Admin", "stats@example.com", "password123", "admin")
        .await;
    let user_id = app
        .create_test_user("Student", "student4@example.com", "password123", "standard")
        .await;
    let event_id = app.create_test_event("Stats Event", admin_id).await;
    let token = app.login("stats@example.com", "password123").await;

    app.request(
        "POST",
        "/api/attendance/mark",
        Some(serde_json::json!({
            "user_id": user_id,
            "event_id": event_id,
            "status": "present",
        })),
        Some(&token),
    )
    .await;

    let response = app
        .request("GET", "/api/attendance/stats", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(
        response
            .body
            .pointer("/data/overall/present")
            .and_then(|v| v.as_i64()),
        Some(1)
    );
    assert_eq!(
        response
            .body
            .pointer("/data/today/present")
            .and_then(|v| v.as_i64()),
        Some(1)
    );
    // Seven trend points, newest day inclusive.
    assert_eq!(
        response
            .body
            .pointer("/data/trend")
            .and_then(|v| v.as_array())
            .map(|a| a.len()),
        Some(7)
    );
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_report_pdf_download() {
    let app = common::TestApp::new().await;
    app.create_test_user("Admin", "pdf@example.com", "password123", "admin")
        .await;
    let token = app.login("pdf@example.com", "password123").await;

    let body_str = {
        // Raw request so we can inspect headers and the binary body.
        use axum::body::Body;
        use axum::http::Request;
        use tower::ServiceExt;

        let req = Request::builder()
            .method("GET")
            .uri("/api/attendance/report/pdf")
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .expect("Failed to build request");

        let response = app
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok()),
            Some("application/pdf")
        );

        axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body")
    };

    assert!(body_str.starts_with(b"%PDF"));
}
