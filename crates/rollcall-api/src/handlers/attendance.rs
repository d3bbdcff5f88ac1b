//! Attendance marking, listing, report, and statistics handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use rollcall_core::types::pagination::PageResponse;
use rollcall_entity::attendance::{Attendance, AttendanceRecord};
use rollcall_service::stats::{EventStats, StatsOverview, UserStats};

use crate::dto::request::{AttendanceQuery, MarkAttendanceRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /api/attendance/mark
pub async fn mark_attendance(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<MarkAttendanceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Attendance>>), ApiError> {
    let row = state
        .attendance_service
        .mark(&auth, req.user_id, req.event_id, req.status)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(row))))
}

/// GET /api/attendance/user/{id}
pub async fn list_for_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(query): Query<AttendanceQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<AttendanceRecord>>>, ApiError> {
    let page = state
        .attendance_service
        .list_for_user(&auth, id, query.into_filter(), pagination.into_page_request())
        .await?;

    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/attendance/event/{id}
pub async fn list_for_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(query): Query<AttendanceQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<AttendanceRecord>>>, ApiError> {
    let page = state
        .attendance_service
        .list_for_event(&auth, id, query.into_filter(), pagination.into_page_request())
        .await?;

    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/attendance/report
pub async fn report(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<AttendanceQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<AttendanceRecord>>>, ApiError> {
    let page = state
        .attendance_service
        .report(&auth, query.into_filter(), pagination.into_page_request())
        .await?;

    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/attendance/report/pdf
pub async fn report_pdf(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<AttendanceQuery>,
) -> Result<Response, ApiError> {
    let filters_line = query.describe();
    let rows = state
        .attendance_service
        .report_rows(&auth, query.into_filter())
        .await?;

    let bytes = state.report_renderer.render(&rows, &filters_line)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"attendance-report.pdf\"".to_string(),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// GET /api/attendance/stats
pub async fn stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<StatsOverview>>, ApiError> {
    let overview = state.stats_service.overview(&auth).await?;
    Ok(Json(ApiResponse::ok(overview)))
}

/// GET /api/attendance/user-stats/{id}
pub async fn user_stats(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserStats>>, ApiError> {
    let stats = state.stats_service.user_stats(&auth, id).await?;
    Ok(Json(ApiResponse::ok(stats)))
}

/// GET /api/attendance/event-stats/{id}
pub async fn event_stats(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<EventStats>>, ApiError> {
    let stats = state.stats_service.event_stats(&auth, id).await?;
    Ok(Json(ApiResponse::ok(stats)))
}
