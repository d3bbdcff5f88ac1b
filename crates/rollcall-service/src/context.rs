//! Request context carrying the authenticated caller.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rollcall_core::error::AppError;
use rollcall_core::result::AppResult;
use rollcall_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Extracted by middleware and passed into service methods so that every
/// operation knows *who* is acting. The name and email are also the
/// verifier snapshot captured when this caller marks attendance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's role at the time the token was issued.
    pub role: UserRole,
    /// Display name (convenience field from JWT claims).
    pub name: String,
    /// Email (convenience field from JWT claims).
    pub email: String,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, role: UserRole, name: String, email: String) -> Self {
        Self {
            user_id,
            role,
            name,
            email,
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Errors with `Forbidden` unless the caller is an admin.
    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden("Admin access required"))
        }
    }

    /// Errors with `Forbidden` unless the caller is `target` or an admin.
    pub fn require_self_or_admin(&self, target: Uuid) -> AppResult<()> {
        if self.user_id == target || self.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden("Access restricted to the account owner"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(role: UserRole) -> RequestContext {
        RequestContext::new(
            Uuid::new_v4(),
            role,
            "Test User".to_string(),
            "test@example.com".to_string(),
        )
    }

    #[test]
    fn test_require_admin() {
        assert!(ctx(UserRole::Admin).require_admin().is_ok());
        assert!(ctx(UserRole::Standard).require_admin().is_err());
    }

    #[test]
    fn test_require_self_or_admin() {
        let standard = ctx(UserRole::Standard);
        assert!(standard.require_self_or_admin(standard.user_id).is_ok());
        assert!(standard.require_self_or_admin(Uuid::new_v4()).is_err());
        assert!(ctx(UserRole::Admin).require_self_or_admin(Uuid::new_v4()).is_ok());
    }
}
