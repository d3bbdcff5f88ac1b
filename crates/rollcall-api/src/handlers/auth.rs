//! Authentication and self-service handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use rollcall_entity::user::UpdateUser;
use rollcall_service::user::service::RegisterRequest as SvcRegister;

use crate::dto::request::{
    ChangePasswordRequest, LoginRequest, RegisterRequest, UpdateProfileRequest, validate,
};
use crate::dto::response::{ApiResponse, AuthResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), ApiError> {
    validate(&req)?;

    let outcome = state
        .user_service
        .register(SvcRegister {
            name: req.name,
            email: req.email,
            password: req.password,
            trade: req.trade,
            department: req.department,
            roll_no: req.roll_no,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(AuthResponse {
            token: outcome.token.token,
            expires_at: outcome.token.expires_at,
            user: outcome.user.into(),
        })),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    validate(&req)?;

    let outcome = state.user_service.login(&req.email, &req.password).await?;

    Ok(Json(ApiResponse::ok(AuthResponse {
        token: outcome.token.token,
        expires_at: outcome.token.expires_at,
        user: outcome.user.into(),
    })))
}

/// GET /api/auth/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.user_service.get_profile(&auth).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/auth/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state
        .user_service
        .update_profile(
            &auth,
            UpdateUser {
                name: req.name,
                trade: req.trade,
                department: req.department,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    validate(&req)?;

    state
        .user_service
        .change_password(&auth, &req.current_password, &req.new_password)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Password changed successfully",
    ))))
}
