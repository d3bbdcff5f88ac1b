//! Route definitions for the RollCall HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The router
//! receives `AppState` and passes it to all handlers via Axum's `State`
//! extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(event_routes())
        .merge(attendance_routes())
        .merge(qr_routes())
        .merge(notice_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);
    let max_body = state.config.server.max_body_bytes;

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth and self-service endpoints.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/profile", get(handlers::auth::get_profile))
        .route("/auth/profile", put(handlers::auth::update_profile))
        .route(
            "/auth/change-password",
            put(handlers::auth::change_password),
        )
}

/// Admin user management endpoints.
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::user::list_users))
        .route("/users/{id}", get(handlers::user::get_user))
        .route("/users/{id}", put(handlers::user::update_user))
        .route("/users/{id}/role", put(handlers::user::set_role))
        .route("/users/{id}/status", put(handlers::user::set_status))
        .route("/users/{id}", delete(handlers::user::delete_user))
}

/// Event scheduling endpoints.
fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(handlers::event::create_event))
        .route("/events", get(handlers::event::list_events))
        .route("/events/upcoming", get(handlers::event::upcoming_events))
        .route("/events/active", get(handlers::event::active_events))
        .route("/events/{id}", get(handlers::event::get_event))
        .route("/events/{id}", put(handlers::event::update_event))
        .route("/events/{id}", delete(handlers::event::delete_event))
}

/// Attendance marking, listings, reports, and statistics.
fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/attendance/mark", post(handlers::attendance::mark_attendance))
        .route(
            "/attendance/user/{id}",
            get(handlers::attendance::list_for_user),
        )
        .route(
            "/attendance/event/{id}",
            get(handlers::attendance::list_for_event),
        )
        .route("/attendance/report", get(handlers::attendance::report))
        .route(
            "/attendance/report/pdf",
            get(handlers::attendance::report_pdf),
        )
        .route("/attendance/stats", get(handlers::attendance::stats))
        .route(
            "/attendance/user-stats/{id}",
            get(handlers::attendance::user_stats),
        )
        .route(
            "/attendance/event-stats/{id}",
            get(handlers::attendance::event_stats),
        )
}

/// QR generation, scanning, and validation.
fn qr_routes() -> Router<AppState> {
    Router::new()
        .route("/qr/generate/{id}", get(handlers::qr::generate))
        .route("/qr/user/{id}", get(handlers::qr::get_user_code))
        .route("/qr/regenerate/{id}", post(handlers::qr::regenerate))
        .route("/qr/scan", post(handlers::qr::scan))
        .route("/qr/validate", post(handlers::qr::validate_code))
}

/// Public notice board views.
fn notice_routes() -> Router<AppState> {
    Router::new()
        .route("/notices", get(handlers::notice::list_notices))
        .route("/notices/type/{kind}", get(handlers::notice::notices_by_kind))
        .route("/notices/today", get(handlers::notice::notices_today))
        .route("/notices/weekly", get(handlers::notice::notices_weekly))
        .route(
            "/notices/next-week",
            get(handlers::notice::notices_next_week),
        )
        .route(
            "/notices/next-month",
            get(handlers::notice::notices_next_month),
        )
}

/// Health endpoints.
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
