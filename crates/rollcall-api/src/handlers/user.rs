//! Admin user management handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use rollcall_core::types::pagination::PageResponse;
use rollcall_entity::user::UpdateUser;
use rollcall_service::user::DeleteOutcome;

use crate::dto::request::{SetRoleRequest, SetStatusRequest, UpdateProfileRequest, UserListQuery};
use crate::dto::response::{ApiResponse, DeleteUserResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<UserListQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<UserResponse>>>, ApiError> {
    let page = state
        .user_admin_service
        .list(&auth, query.into_filter(), pagination.into_page_request())
        .await?;

    Ok(Json(ApiResponse::ok(page.map(UserResponse::from))))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.user_admin_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state
        .user_admin_service
        .update(
            &auth,
            id,
            UpdateUser {
                name: req.name,
                trade: req.trade,
                department: req.department,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/users/{id}/role
pub async fn set_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<SetRoleRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.user_admin_service.set_role(&auth, id, req.role).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/users/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<SetStatusRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state
        .user_admin_service
        .set_active(&auth, id, req.is_active)
        .await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeleteUserResponse>>, ApiError> {
    let outcome = state.user_admin_service.delete(&auth, id).await?;

    let response = match outcome {
        DeleteOutcome::Deleted => DeleteUserResponse {
            outcome: "deleted".to_string(),
            message: "User permanently deleted".to_string(),
        },
        DeleteOutcome::Deactivated => DeleteUserResponse {
            outcome: "deactivated".to_string(),
            message: "User has attendance history and was deactivated instead".to_string(),
        },
    };

    Ok(Json(ApiResponse::ok(response)))
}
