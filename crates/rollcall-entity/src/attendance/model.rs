//! Attendance entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::event::EventKind;

use super::status::AttendanceStatus;

/// One attendance row per (user, event) pair, enforced by a uniqueness
/// constraint. Re-marking the same pair updates this row in place.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Attendance {
    /// Unique row identifier.
    pub id: Uuid,
    /// The attending user.
    pub user_id: Uuid,
    /// The event attended.
    pub event_id: Uuid,
    /// Recorded status.
    pub status: AttendanceStatus,
    /// The admin who verified this record (ID of the most recent verifier).
    pub verified_by: Uuid,
    /// Verifier name snapshot, captured at mark time. Immutable history:
    /// it reflects who verified at that time, regardless of later renames
    /// or deactivation of the admin account.
    pub verifier_name: String,
    /// Verifier email snapshot, captured at mark time.
    pub verifier_email: String,
    /// When the pair was first recorded.
    pub created_at: DateTime<Utc>,
    /// When the record was last re-marked.
    pub updated_at: DateTime<Utc>,
}

/// An immutable copy of the verifying admin's identity at mark time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifierSnapshot {
    /// Verifying admin's user ID.
    pub id: Uuid,
    /// Verifying admin's name at the moment of marking.
    pub name: String,
    /// Verifying admin's email at the moment of marking.
    pub email: String,
}

/// Data for an attendance mark (create-or-update keyed by user + event).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkAttendance {
    /// The user to mark.
    pub user_id: Uuid,
    /// The event to mark against.
    pub event_id: Uuid,
    /// The status to record.
    pub status: AttendanceStatus,
    /// Snapshot of the verifying admin.
    pub verifier: VerifierSnapshot,
}

/// An attendance row joined with its resolved user and event, as used by
/// per-event listings and the global report.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AttendanceRecord {
    /// Attendance row identifier.
    pub id: Uuid,
    /// The attending user.
    pub user_id: Uuid,
    /// Resolved user name.
    pub user_name: String,
    /// Resolved roll number.
    pub roll_no: String,
    /// Resolved trade label.
    pub trade: String,
    /// The event attended.
    pub event_id: Uuid,
    /// Resolved event title.
    pub event_title: String,
    /// Resolved event date.
    pub event_date: NaiveDate,
    /// Resolved event kind.
    pub event_kind: EventKind,
    /// Recorded status.
    pub status: AttendanceStatus,
    /// Verifier name snapshot.
    pub verifier_name: String,
    /// When the record was last marked.
    pub updated_at: DateTime<Utc>,
}
