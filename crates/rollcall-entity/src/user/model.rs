//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered user (student or admin) in the RollCall system.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Unique email address (login identity).
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Trade label (academic specialization).
    pub trade: String,
    /// Department label. Defaults to the trade label when unset at creation.
    pub department: String,
    /// Unique roll/registration number.
    pub roll_no: String,
    /// User role.
    pub role: UserRole,
    /// Active flag. A soft-deleted user has this set to false.
    pub is_active: bool,
    /// Cached QR payload (serialized JSON), if generated.
    pub qr_payload: Option<String>,
    /// Rendered QR image as a base64 PNG data URL, if generated.
    pub qr_image: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Check if the user can log in right now.
    pub fn can_login(&self) -> bool {
        self.is_active
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Trade label.
    pub trade: String,
    /// Department label. Falls back to the trade label when `None`.
    pub department: Option<String>,
    /// Roll/registration number.
    pub roll_no: String,
    /// Assigned role.
    pub role: UserRole,
}

impl CreateUser {
    /// Resolve the effective department for persistence.
    pub fn effective_department(&self) -> &str {
        match &self.department {
            Some(d) if !d.trim().is_empty() => d,
            _ => &self.trade,
        }
    }
}

/// Data for updating an existing user's profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New display name.
    pub name: Option<String>,
    /// New trade label.
    pub trade: Option<String>,
    /// New department label.
    pub department: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_create() -> CreateUser {
        CreateUser {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$fake".to_string(),
            trade: "Electronics".to_string(),
            department: None,
            roll_no: "R100".to_string(),
            role: UserRole::Standard,
        }
    }

    #[test]
    fn test_department_defaults_to_trade() {
        let data = sample_create();
        assert_eq!(data.effective_department(), "Electronics");
    }

    #[test]
    fn test_department_blank_defaults_to_trade() {
        let mut data = sample_create();
        data.department = Some("  ".to_string());
        assert_eq!(data.effective_department(), "Electronics");
    }

    #[test]
    fn test_department_explicit() {
        let mut data = sample_create();
        data.department = Some("ECE".to_string());
        assert_eq!(data.effective_department(), "ECE");
    }
}
