//! Public notice board handlers. No authentication required.

use axum::Json;
use axum::extract::{Path, Query, State};

use rollcall_core::error::AppError;
use rollcall_core::types::pagination::PageResponse;
use rollcall_entity::event::{Event, EventKind};

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::PaginationParams;
use crate::state::AppState;

/// GET /api/notices
pub async fn list_notices(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Event>>>, ApiError> {
    let page = state
        .notice_service
        .list(pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/notices/type/{kind}
pub async fn notices_by_kind(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Event>>>, ApiError> {
    let kind: EventKind = kind.parse().map_err(AppError::from)?;
    let page = state
        .notice_service
        .list_by_kind(kind, pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/notices/today
pub async fn notices_today(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Event>>>, ApiError> {
    Ok(Json(ApiResponse::ok(state.notice_service.today().await?)))
}

/// GET /api/notices/weekly
pub async fn notices_weekly(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Event>>>, ApiError> {
    Ok(Json(ApiResponse::ok(
        state.notice_service.this_week().await?,
    )))
}

/// GET /api/notices/next-week
pub async fn notices_next_week(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Event>>>, ApiError> {
    Ok(Json(ApiResponse::ok(
        state.notice_service.next_week().await?,
    )))
}

/// GET /api/notices/next-month
pub async fn notices_next_month(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Event>>>, ApiError> {
    Ok(Json(ApiResponse::ok(
        state.notice_service.next_month().await?,
    )))
}
