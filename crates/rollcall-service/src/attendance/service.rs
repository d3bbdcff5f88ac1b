//! Attendance marking and joined listings.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use rollcall_core::error::AppError;
use rollcall_core::result::AppResult;
use rollcall_core::types::pagination::{PageRequest, PageResponse};
use rollcall_database::repositories::{
    AttendanceFilter, AttendanceRepository, EventRepository, UserRepository,
};
use rollcall_entity::attendance::{
    Attendance, AttendanceRecord, AttendanceStatus, MarkAttendance, VerifierSnapshot,
};
use rollcall_entity::user::User;

use crate::context::RequestContext;

/// Cap on rows pulled for a single report render.
const REPORT_ROW_LIMIT: i64 = 5_000;

/// Handles attendance marking and record queries.
#[derive(Debug, Clone)]
pub struct AttendanceService {
    /// Attendance repository.
    attendance_repo: Arc<AttendanceRepository>,
    /// User repository, for referent checks.
    user_repo: Arc<UserRepository>,
    /// Event repository, for referent checks.
    event_repo: Arc<EventRepository>,
}

impl AttendanceService {
    /// Creates a new attendance service.
    pub fn new(
        attendance_repo: Arc<AttendanceRepository>,
        user_repo: Arc<UserRepository>,
        event_repo: Arc<EventRepository>,
    ) -> Self {
        Self {
            attendance_repo,
            user_repo,
            event_repo,
        }
    }

    /// Marks a user's status for an event on behalf of the calling admin.
    ///
    /// Upsert semantics: re-marking the same pair overwrites the previous
    /// status and verifier snapshot. The verifier identity is whatever the
    /// caller's context says right now; later edits to the caller's
    /// account do not rewrite history.
    pub async fn mark(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        event_id: Uuid,
        status: AttendanceStatus,
    ) -> AppResult<Attendance> {
        ctx.require_admin()?;

        let user = self.resolve_user(user_id).await?;
        if !user.is_active {
            return Err(AppError::validation(
                "Cannot mark attendance for a deactivated user",
            ));
        }

        let event = self
            .event_repo
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))?;
        if !event.is_active {
            return Err(AppError::not_found("Event not found"));
        }

        let row = self
            .attendance_repo
            .mark(&MarkAttendance {
                user_id,
                event_id,
                status,
                verifier: VerifierSnapshot {
                    id: ctx.user_id,
                    name: ctx.name.clone(),
                    email: ctx.email.clone(),
                },
            })
            .await?;

        info!(
            user_id = %user_id,
            event_id = %event_id,
            status = %status,
            verified_by = %ctx.user_id,
            "Attendance marked"
        );

        Ok(row)
    }

    /// One user's records, visible to the account owner or an admin.
    pub async fn list_for_user(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        mut filter: AttendanceFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<AttendanceRecord>> {
        ctx.require_self_or_admin(user_id)?;
        self.resolve_user(user_id).await?;

        filter.user_id = Some(user_id);
        self.attendance_repo.list(&filter, &page).await
    }

    /// One event's records, admin only.
    pub async fn list_for_event(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
        mut filter: AttendanceFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<AttendanceRecord>> {
        ctx.require_admin()?;

        self.event_repo
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))?;

        filter.event_id = Some(event_id);
        self.attendance_repo.list(&filter, &page).await
    }

    /// Global joined listing with every report filter, admin only.
    pub async fn report(
        &self,
        ctx: &RequestContext,
        filter: AttendanceFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<AttendanceRecord>> {
        ctx.require_admin()?;
        self.attendance_repo.list(&filter, &page).await
    }

    /// Unpaginated rows for PDF rendering, capped, admin only.
    pub async fn report_rows(
        &self,
        ctx: &RequestContext,
        filter: AttendanceFilter,
    ) -> AppResult<Vec<AttendanceRecord>> {
        ctx.require_admin()?;
        self.attendance_repo
            .list_for_report(&filter, REPORT_ROW_LIMIT)
            .await
    }

    async fn resolve_user(&self, user_id: Uuid) -> AppResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
