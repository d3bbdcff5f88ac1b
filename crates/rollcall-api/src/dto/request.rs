//! Request DTOs with validation, including query-string filter sets.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use rollcall_core::error::AppError;
use rollcall_core::result::AppResult;
use rollcall_database::repositories::{AttendanceFilter, EventListFilter, UserListFilter};
use rollcall_entity::attendance::AttendanceStatus;
use rollcall_entity::event::EventKind;
use rollcall_entity::user::UserRole;

/// Run `validator` checks and convert failures into a field-listing
/// validation error.
pub fn validate(req: &impl Validate) -> AppResult<()> {
    req.validate().map_err(|errors| {
        let fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|k| k.to_string())
            .collect();
        AppError::validation_fields("Request validation failed", fields)
    })
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    /// Email address.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Trade label.
    #[validate(length(min = 1, max = 100, message = "Trade is required"))]
    pub trade: String,
    /// Department label; defaults to trade when omitted.
    pub department: Option<String>,
    /// Roll/registration number.
    #[validate(length(min = 1, max = 50, message = "Roll number is required"))]
    pub roll_no: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Update own profile request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// New display name.
    pub name: Option<String>,
    /// New trade label.
    pub trade: Option<String>,
    /// New department label.
    pub department: Option<String>,
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1))]
    pub current_password: String,
    /// New password.
    #[validate(length(min = 8))]
    pub new_password: String,
}

/// Admin role change request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetRoleRequest {
    /// The new role.
    pub role: UserRole,
}

/// Admin active-flag change request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetStatusRequest {
    /// The new active flag.
    pub is_active: bool,
}

/// Event creation request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEventRequest {
    /// Event title.
    #[validate(length(min = 1, max = 300, message = "Title is required"))]
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Event kind.
    pub kind: EventKind,
    /// Calendar date (YYYY-MM-DD).
    pub event_date: NaiveDate,
    /// Start time (HH:MM or HH:MM:SS).
    pub event_time: chrono::NaiveTime,
    /// Venue or location label.
    #[validate(length(min = 1, max = 300, message = "Location is required"))]
    pub location: String,
}

/// Event update request body. All fields optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    /// New title.
    pub title: Option<String>,
    /// New description. Omit to keep the current one; send an explicit
    /// `null` to clear it.
    #[serde(default, deserialize_with = "explicit_null")]
    pub description: Option<Option<String>>,
    /// New kind.
    pub kind: Option<EventKind>,
    /// New date.
    pub event_date: Option<NaiveDate>,
    /// New time.
    pub event_time: Option<chrono::NaiveTime>,
    /// New location.
    pub location: Option<String>,
}

/// Attendance mark request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkAttendanceRequest {
    /// The user being marked.
    pub user_id: Uuid,
    /// The event being marked against.
    pub event_id: Uuid,
    /// Present or absent.
    pub status: AttendanceStatus,
}

/// QR scan request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScanRequest {
    /// The decoded QR payload JSON.
    #[validate(length(min = 1, message = "QR payload is required"))]
    pub qr_data: String,
    /// The event to mark against.
    pub event_id: Uuid,
}

/// QR validate request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ValidateQrRequest {
    /// The decoded QR payload JSON.
    #[validate(length(min = 1, message = "QR payload is required"))]
    pub qr_data: String,
}

/// Query filters for the admin user listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserListQuery {
    /// Restrict to a role.
    pub role: Option<UserRole>,
    /// Restrict to a trade.
    pub trade: Option<String>,
    /// Restrict to a department.
    pub department: Option<String>,
    /// Restrict to active/inactive accounts.
    pub is_active: Option<bool>,
    /// Free-text search.
    pub search: Option<String>,
}

impl UserListQuery {
    /// Convert into the repository filter.
    pub fn into_filter(self) -> UserListFilter {
        UserListFilter {
            role: self.role,
            trade: none_if_blank(self.trade),
            department: none_if_blank(self.department),
            is_active: self.is_active,
            search: none_if_blank(self.search),
        }
    }
}

/// Query filters for event listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventListQuery {
    /// Restrict to a kind.
    pub kind: Option<EventKind>,
    /// Earliest scheduled date (inclusive).
    pub from: Option<NaiveDate>,
    /// Latest scheduled date (inclusive).
    pub to: Option<NaiveDate>,
    /// Free-text search over title, description, and location.
    pub search: Option<String>,
}

impl EventListQuery {
    /// Convert into the repository filter.
    pub fn into_filter(self) -> EventListFilter {
        EventListFilter {
            kind: self.kind,
            from: self.from,
            to: self.to,
            search: none_if_blank(self.search),
            include_inactive: false,
        }
    }
}

/// Query filters for attendance listings and reports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttendanceQuery {
    /// Restrict to a status.
    pub status: Option<AttendanceStatus>,
    /// Restrict to an event kind.
    pub kind: Option<EventKind>,
    /// Restrict to an attendee trade.
    pub trade: Option<String>,
    /// Earliest event date (inclusive).
    pub from: Option<NaiveDate>,
    /// Latest event date (inclusive).
    pub to: Option<NaiveDate>,
    /// Free-text search over attendee name and roll number.
    pub search: Option<String>,
}

impl AttendanceQuery {
    /// Convert into the repository filter.
    pub fn into_filter(self) -> AttendanceFilter {
        AttendanceFilter {
            user_id: None,
            event_id: None,
            status: self.status,
            kind: self.kind,
            trade: none_if_blank(self.trade),
            from: self.from,
            to: self.to,
            search: none_if_blank(self.search),
        }
    }

    /// Human-readable description of the active filters for report
    /// headers, e.g. `Status: present | Kind: event`.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(status) = self.status {
            parts.push(format!("Status: {status}"));
        }
        if let Some(kind) = self.kind {
            parts.push(format!("Kind: {kind}"));
        }
        if let Some(trade) = &self.trade {
            parts.push(format!("Trade: {trade}"));
        }
        match (self.from, self.to) {
            (Some(from), Some(to)) => parts.push(format!("Dates: {from} to {to}")),
            (Some(from), None) => parts.push(format!("Dates: from {from}")),
            (None, Some(to)) => parts.push(format!("Dates: until {to}")),
            (None, None) => {}
        }
        if let Some(search) = &self.search {
            parts.push(format!("Search: \"{search}\""));
        }
        if parts.is_empty() {
            "All records".to_string()
        } else {
            parts.join(" | ")
        }
    }
}

fn none_if_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Deserializes a field so that an absent key stays `None` while a present
/// key, even a JSON `null`, becomes `Some(...)`. Used with
/// `#[serde(default)]` to tell "not sent" apart from "clear this value".
fn explicit_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_empty_filters() {
        assert_eq!(AttendanceQuery::default().describe(), "All records");
    }

    #[test]
    fn test_describe_combined_filters() {
        let query = AttendanceQuery {
            status: Some(AttendanceStatus::Present),
            kind: Some(EventKind::Meeting),
            ..Default::default()
        };
        assert_eq!(query.describe(), "Status: present | Kind: meeting");
    }

    #[test]
    fn test_update_event_description_absent_vs_null() {
        let absent: UpdateEventRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.description, None);

        let cleared: UpdateEventRequest =
            serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(cleared.description, Some(None));

        let set: UpdateEventRequest =
            serde_json::from_str(r#"{"description": "Bring ID cards"}"#).unwrap();
        assert_eq!(set.description, Some(Some("Bring ID cards".to_string())));
    }

    #[test]
    fn test_blank_search_dropped() {
        let query = UserListQuery {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(query.into_filter().search.is_none());
    }

    #[test]
    fn test_register_request_validation() {
        let req = RegisterRequest {
            name: "A".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            trade: "CS".to_string(),
            department: None,
            roll_no: "R1".to_string(),
        };
        assert!(validate(&req).is_err());
    }
}
