//! Personal QR code lifecycle and the scan path.
//!
//! Each user carries one QR code whose payload is a JSON blob identifying
//! them. The rendered PNG is stored on the user row as a base64 data URL
//! so clients can embed it directly in an `<img>` tag.

use std::io::Cursor;
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::{ImageFormat, Luma};
use qrcode::QrCode;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use rollcall_core::error::AppError;
use rollcall_core::result::AppResult;
use rollcall_database::repositories::UserRepository;
use rollcall_entity::attendance::{Attendance, AttendanceStatus};
use rollcall_entity::qr::QrPayload;
use rollcall_entity::user::User;

use crate::attendance::AttendanceService;
use crate::context::RequestContext;

/// Rendered QR pixel size lower bound.
const QR_MIN_DIMENSIONS: u32 = 256;

/// A user's QR code as served to clients.
#[derive(Debug, Clone, Serialize)]
pub struct UserQrCode {
    /// The user this code belongs to.
    pub user_id: Uuid,
    /// The JSON payload embedded in the code.
    pub payload: String,
    /// PNG rendering as a base64 data URL.
    pub image: String,
}

/// Result of validating a scanned payload without marking anything.
#[derive(Debug, Clone, Serialize)]
pub struct QrValidation {
    /// The resolved user's ID.
    pub user_id: Uuid,
    /// The resolved user's name.
    pub name: String,
    /// The resolved user's roll number.
    pub roll_no: String,
}

/// Result of a scan: the validated identity plus the attendance row.
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    /// The identity the code resolved to.
    pub user: QrValidation,
    /// The upserted attendance row.
    pub attendance: Attendance,
}

/// Manages personal QR codes and processes scans.
#[derive(Debug, Clone)]
pub struct QrService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Attendance service, for the scan-to-mark path.
    attendance: Arc<AttendanceService>,
}

impl QrService {
    /// Creates a new QR service.
    pub fn new(user_repo: Arc<UserRepository>, attendance: Arc<AttendanceService>) -> Self {
        Self {
            user_repo,
            attendance,
        }
    }

    /// Generates (or regenerates) a user's QR code with a fresh timestamp
    /// and persists both payload and rendering on the user row.
    pub async fn generate(&self, ctx: &RequestContext, user_id: Uuid) -> AppResult<UserQrCode> {
        ctx.require_self_or_admin(user_id)?;

        let user = self.resolve_user(user_id).await?;
        let payload = QrPayload::new(user.id, &user.roll_no).encode()?;
        let image = render_png_data_url(&payload)?;

        self.user_repo.update_qr(user_id, &payload, &image).await?;
        info!(user_id = %user_id, "QR code generated");

        Ok(UserQrCode {
            user_id,
            payload,
            image,
        })
    }

    /// Fetches a user's stored QR code, generating it on first access.
    pub async fn get(&self, ctx: &RequestContext, user_id: Uuid) -> AppResult<UserQrCode> {
        ctx.require_self_or_admin(user_id)?;

        let user = self.resolve_user(user_id).await?;
        match (user.qr_payload, user.qr_image) {
            (Some(payload), Some(image)) => Ok(UserQrCode {
                user_id,
                payload,
                image,
            }),
            _ => self.generate(ctx, user_id).await,
        }
    }

    /// Admin re-issue of a user's code. The old payload stops matching the
    /// stored one, but scans only check identity fields, so codes printed
    /// earlier keep working until the user record changes.
    pub async fn regenerate(&self, ctx: &RequestContext, user_id: Uuid) -> AppResult<UserQrCode> {
        ctx.require_admin()?;
        self.generate(ctx, user_id).await
    }

    /// Validates a scanned payload: well-formed, known user, active
    /// account, and a roll number that still matches the user record.
    pub async fn validate(&self, raw_payload: &str) -> AppResult<QrValidation> {
        let payload = QrPayload::parse(raw_payload)?;

        let user = self.resolve_user(payload.user_id).await?;
        if !user.is_active {
            return Err(AppError::validation("User account is deactivated"));
        }
        if user.roll_no != payload.roll_no {
            return Err(AppError::validation(
                "QR code is stale: roll number does not match",
            ));
        }

        Ok(QrValidation {
            user_id: user.id,
            name: user.name,
            roll_no: user.roll_no,
        })
    }

    /// Scan path: validate the payload, then mark the user present for the
    /// given event with the caller as verifier.
    pub async fn scan(
        &self,
        ctx: &RequestContext,
        raw_payload: &str,
        event_id: Uuid,
    ) -> AppResult<ScanOutcome> {
        ctx.require_admin()?;

        let user = self.validate(raw_payload).await?;
        let attendance = self
            .attendance
            .mark(ctx, user.user_id, event_id, AttendanceStatus::Present)
            .await?;

        Ok(ScanOutcome { user, attendance })
    }

    async fn resolve_user(&self, user_id: Uuid) -> AppResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}

/// Render a payload string into a PNG QR image, returned as a base64
/// data URL.
fn render_png_data_url(payload: &str) -> AppResult<String> {
    let code = QrCode::new(payload.as_bytes())
        .map_err(|e| AppError::internal(format!("QR encoding failed: {e}")))?;

    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(QR_MIN_DIMENSIONS, QR_MIN_DIMENSIONS)
        .build();

    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| AppError::internal(format!("QR rendering failed: {e}")))?;

    Ok(format!("data:image/png;base64,{}", BASE64.encode(&png)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_produces_png_data_url() {
        let payload = QrPayload::new(Uuid::new_v4(), "R42").encode().unwrap();
        let url = render_png_data_url(&payload).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));

        let encoded = url.trim_start_matches("data:image/png;base64,");
        let bytes = BASE64.decode(encoded).unwrap();
        // PNG magic bytes.
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }
}
