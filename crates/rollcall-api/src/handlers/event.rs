//! Event scheduling handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use rollcall_core::types::pagination::PageResponse;
use rollcall_entity::event::{Event, UpdateEvent};
use rollcall_service::event::service::CreateEventRequest as SvcCreateEvent;

use crate::dto::request::{CreateEventRequest, EventListQuery, UpdateEventRequest, validate};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// Listing cap for the unpaginated upcoming/active views.
const WINDOW_LIMIT: i64 = 100;

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Event>>), ApiError> {
    validate(&req)?;

    let event = state
        .event_service
        .create(
            &auth,
            SvcCreateEvent {
                title: req.title,
                description: req.description,
                kind: req.kind,
                event_date: req.event_date,
                event_time: req.event_time,
                location: req.location,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(event))))
}

/// GET /api/events
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Event>>>, ApiError> {
    let page = state
        .event_service
        .list(query.into_filter(), pagination.into_page_request())
        .await?;

    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/events/upcoming
pub async fn upcoming_events(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Event>>>, ApiError> {
    let events = state.event_service.upcoming(WINDOW_LIMIT).await?;
    Ok(Json(ApiResponse::ok(events)))
}

/// GET /api/events/active
pub async fn active_events(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Event>>>, ApiError> {
    let events = state.event_service.active_window().await?;
    Ok(Json(ApiResponse::ok(events)))
}

/// GET /api/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Event>>, ApiError> {
    let event = state.event_service.get(id).await?;
    Ok(Json(ApiResponse::ok(event)))
}

/// PUT /api/events/{id}
pub async fn update_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateEventRequest>,
) -> Result<Json<ApiResponse<Event>>, ApiError> {
    let event = state
        .event_service
        .update(
            &auth,
            id,
            UpdateEvent {
                title: req.title,
                description: req.description,
                kind: req.kind,
                event_date: req.event_date,
                event_time: req.event_time,
                location: req.location,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(event)))
}

/// DELETE /api/events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.event_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Event deleted"))))
}
