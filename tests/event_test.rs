//! Integration tests for event scheduling and notices.

mod common;

use axum::http::StatusCode;

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_create_event_as_admin() {
    let app = common::TestApp::new().await;
    app.create_test_user("Admin", "admin@example.com", "password123", "admin")
        .await;
    let token = app.login("admin@example.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/events",
            Some(serde_json::json!({
                "title": "Annual Tech Fest",
                "description": "All trades welcome",
                "kind": "event",
                "event_date": "2026-09-15",
                "event_time": "10:30:00",
                "location": "Main Auditorium",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(
        response
            .body
            .pointer("/data/title")
            .and_then(|v| v.as_str()),
        Some("Annual Tech Fest")
    );
    assert_eq!(
        response
            .body
            .pointer("/data/attendee_count")
            .and_then(|v| v.as_i64()),
        Some(0)
    );
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_create_event_forbidden_for_standard_user() {
    let app = common::TestApp::new().await;
    app.create_test_user("Plain", "plain@example.com", "password123", "standard")
        .await;
    let token = app.login("plain@example.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/events",
            Some(serde_json::json!({
                "title": "Sneaky Meeting",
                "kind": "meeting",
                "event_date": "2026-09-15",
                "event_time": "10:30:00",
                "location": "Room 4",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_list_events_excludes_soft_deleted() {
    let app = common::TestApp::new().await;
    let admin_id = app
        .create_test_user("Admin", "admin2@example.com", "password123", "admin")
        .await;
    let token = app.login("admin2@example.com", "password123").await;

    let kept = app.create_test_event("Kept Event", admin_id).await;
    let dropped = app.create_test_event("Dropped Event", admin_id).await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/events/{}", dropped),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let response = app.request("GET", "/api/events", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);

    let items = response
        .body
        .pointer("/data/items")
        .and_then(|v| v.as_array())
        .expect("No items in list response");
    let ids: Vec<&str> = items
        .iter()
        .filter_map(|e| e.get("id").and_then(|v| v.as_str()))
        .collect();
    assert!(ids.contains(&kept.to_string().as_str()));
    assert!(!ids.contains(&dropped.to_string().as_str()));

    // Soft-deleted events stay reachable by ID so history keeps its context.
    let response = app
        .request(
            "GET",
            &format!("/api/events/{}", dropped),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_get_event_not_found() {
    let app = common::TestApp::new().await;
    app.create_test_user("Admin", "admin3@example.com", "password123", "admin")
        .await;
    let token = app.login("admin3@example.com", "password123").await;

    let response = app
        .request(
            "GET",
            "/api/events/00000000-0000-0000-0000-000000000000",
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_list_events_search_matches_description() {
    let app = common::TestApp::new().await;
    app.create_test_user("Admin", "admin6@example.com", "password123", "admin")
        .await;
    let token = app.login("admin6@example.com", "password123").await;

    for (title, description) in [
        ("Tech Fest", "All trades welcome at the main campus"),
        ("Aptitude Round", "Written screening for final years"),
    ] {
        let response = app
            .request(
                "POST",
                "/api/events",
                Some(serde_json::json!({
                    "title": title,
                    "description": description,
                    "kind": "event",
                    "event_date": "2026-09-20",
                    "event_time": "09:00:00",
                    "location": "Hall B",
                })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    }

    // "welcome" appears only in the first event's description.
    let response = app
        .request("GET", "/api/events?search=welcome", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response
            .body
            .pointer("/data/total_items")
            .and_then(|v| v.as_u64()),
        Some(1)
    );
    assert_eq!(
        response
            .body
            .pointer("/data/items/0/title")
            .and_then(|v| v.as_str()),
        Some("Tech Fest")
    );
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_update_event_clears_description_with_explicit_null() {
    let app = common::TestApp::new().await;
    app.create_test_user("Admin", "admin7@example.com", "password123", "admin")
        .await;
    let token = app.login("admin7@example.com", "password123").await;

    let created = app
        .request(
            "POST",
            "/api/events",
            Some(serde_json::json!({
                "title": "HR Talk",
                "description": "Resume tips",
                "kind": "meeting",
                "event_date": "2026-10-01",
                "event_time": "14:00:00",
                "location": "Seminar Room",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{:?}", created.body);
    let event_id = created
        .body
        .pointer("/data/id")
        .and_then(|v| v.as_str())
        .expect("No event id")
        .to_string();

    // A body without the field leaves the description alone.
    let updated = app
        .request(
            "PUT",
            &format!("/api/events/{event_id}"),
            Some(serde_json::json!({ "title": "HR Talk (updated)" })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK, "{:?}", updated.body);
    assert_eq!(
        updated
            .body
            .pointer("/data/description")
            .and_then(|v| v.as_str()),
        Some("Resume tips")
    );

    // An explicit null clears it.
    let cleared = app
        .request(
            "PUT",
            &format!("/api/events/{event_id}"),
            Some(serde_json::json!({ "description": null })),
            Some(&token),
        )
        .await;
    assert_eq!(cleared.status, StatusCode::OK, "{:?}", cleared.body);
    assert!(
        cleared
            .body
            .pointer("/data/description")
            .map(|v| v.is_null())
            .unwrap_or(false),
        "{:?}",
        cleared.body
    );
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_notices_today() {
    let app = common::TestApp::new().await;
    let admin_id = app
        .create_test_user("Admin", "admin4@example.com", "password123", "admin")
        .await;
    let token = app.login("admin4@example.com", "password123").await;

    app.create_test_event("Today Drive", admin_id).await;

    let response = app
        .request("GET", "/api/notices/today", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let items = response
        .body
        .get("data")
        .and_then(|v| v.as_array())
        .expect("No data array in notices response");
    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0].get("title").and_then(|v| v.as_str()),
        Some("Today Drive")
    );
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_notices_by_unknown_kind() {
    let app = common::TestApp::new().await;
    app.create_test_user("Admin", "admin5@example.com", "password123", "admin")
        .await;
    let token = app.login("admin5@example.com", "password123").await;

    let response = app
        .request("GET", "/api/notices/type/party", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
