//! Admin-only user management operations.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use rollcall_core::error::AppError;
use rollcall_core::result::AppResult;
use rollcall_core::types::pagination::{PageRequest, PageResponse};
use rollcall_database::repositories::{
    AttendanceRepository, UserListFilter, UserRepository,
};
use rollcall_entity::user::{UpdateUser, User, UserRole};

use crate::context::RequestContext;

/// What a delete request actually did to the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    /// No attendance history existed; the row was removed.
    Deleted,
    /// Attendance history exists; the account was deactivated instead so
    /// historical records keep resolving.
    Deactivated,
}

/// Handles admin management of user accounts.
#[derive(Debug, Clone)]
pub struct UserAdminService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Attendance repository, for the delete guard.
    attendance_repo: Arc<AttendanceRepository>,
}

impl UserAdminService {
    /// Creates a new admin user service.
    pub fn new(user_repo: Arc<UserRepository>, attendance_repo: Arc<AttendanceRepository>) -> Self {
        Self {
            user_repo,
            attendance_repo,
        }
    }

    /// Lists users with filters and pagination.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: UserListFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<User>> {
        ctx.require_admin()?;
        self.user_repo.list(&filter, &page).await
    }

    /// Fetches a single user, visible to the account owner or an admin.
    pub async fn get(&self, ctx: &RequestContext, user_id: Uuid) -> AppResult<User> {
        ctx.require_self_or_admin(user_id)?;
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates another user's profile fields.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        data: UpdateUser,
    ) -> AppResult<User> {
        ctx.require_self_or_admin(user_id)?;
        self.user_repo.update(user_id, &data).await
    }

    /// Changes a user's role.
    pub async fn set_role(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        role: UserRole,
    ) -> AppResult<User> {
        ctx.require_admin()?;

        if ctx.user_id == user_id && role != UserRole::Admin {
            return Err(AppError::validation("Admins cannot demote themselves"));
        }

        let user = self.user_repo.update_role(user_id, role).await?;
        info!(user_id = %user_id, role = %role, "Role changed");
        Ok(user)
    }

    /// Activates or deactivates an account.
    pub async fn set_active(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        is_active: bool,
    ) -> AppResult<User> {
        ctx.require_admin()?;

        if ctx.user_id == user_id && !is_active {
            return Err(AppError::validation("Admins cannot deactivate themselves"));
        }

        let user = self.user_repo.set_active(user_id, is_active).await?;
        info!(user_id = %user_id, is_active, "Active flag changed");
        Ok(user)
    }

    /// Deletes an account.
    ///
    /// Accounts with attendance history are deactivated rather than
    /// removed, so verifier and attendee references keep resolving.
    pub async fn delete(&self, ctx: &RequestContext, user_id: Uuid) -> AppResult<DeleteOutcome> {
        ctx.require_admin()?;

        if ctx.user_id == user_id {
            return Err(AppError::validation("Admins cannot delete themselves"));
        }

        // Existence check first so a missing user is NotFound, not a no-op.
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let history = self.attendance_repo.count_for_user(user_id).await?;
        if history > 0 {
            self.user_repo.set_active(user_id, false).await?;
            info!(user_id = %user_id, history, "User deactivated (has attendance history)");
            return Ok(DeleteOutcome::Deactivated);
        }

        self.user_repo.delete(user_id).await?;
        info!(user_id = %user_id, "User deleted");
        Ok(DeleteOutcome::Deleted)
    }
}
