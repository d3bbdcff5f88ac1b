//! QR code handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use rollcall_service::qr::{QrValidation, ScanOutcome, UserQrCode};

use crate::dto::request::{ScanRequest, ValidateQrRequest, validate};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/qr/generate/{id}
pub async fn generate(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserQrCode>>, ApiError> {
    let code = state.qr_service.generate(&auth, id).await?;
    Ok(Json(ApiResponse::ok(code)))
}

/// GET /api/qr/user/{id}
pub async fn get_user_code(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserQrCode>>, ApiError> {
    let code = state.qr_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(code)))
}

/// POST /api/qr/regenerate/{id}
pub async fn regenerate(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserQrCode>>, ApiError> {
    let code = state.qr_service.regenerate(&auth, id).await?;
    Ok(Json(ApiResponse::ok(code)))
}

/// POST /api/qr/scan
pub async fn scan(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ScanRequest>,
) -> Result<Json<ApiResponse<ScanOutcome>>, ApiError> {
    validate(&req)?;
    let outcome = state.qr_service.scan(&auth, &req.qr_data, req.event_id).await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

/// POST /api/qr/validate
pub async fn validate_code(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(req): Json<ValidateQrRequest>,
) -> Result<Json<ApiResponse<QrValidation>>, ApiError> {
    validate(&req)?;
    let validation = state.qr_service.validate(&req.qr_data).await?;
    Ok(Json(ApiResponse::ok(validation)))
}
