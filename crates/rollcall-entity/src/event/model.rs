//! Event entity model.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::EventKind;

/// A schedulable occurrence that attendance is tracked against.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    /// Unique event identifier.
    pub id: Uuid,
    /// Event title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Whether this is an event or a meeting.
    pub kind: EventKind,
    /// Calendar date in the canonical (UTC) operating timezone.
    pub event_date: NaiveDate,
    /// Scheduled start time.
    pub event_time: NaiveTime,
    /// Venue or location label.
    pub location: String,
    /// Derived cache: count of `present` attendance rows for this event.
    /// Recomputed inside the same transaction as every attendance write;
    /// never set directly by clients.
    pub attendee_count: i64,
    /// The admin who created this event.
    pub created_by: Uuid,
    /// Active flag. A soft-deleted event has this set to false.
    pub is_active: bool,
    /// When the event was created.
    pub created_at: DateTime<Utc>,
    /// When the event was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEvent {
    /// Event title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Event kind.
    pub kind: EventKind,
    /// Calendar date.
    pub event_date: NaiveDate,
    /// Start time.
    pub event_time: NaiveTime,
    /// Venue or location label.
    pub location: String,
    /// The creating admin's user ID.
    pub created_by: Uuid,
}

/// Data for updating an existing event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEvent {
    /// New title.
    pub title: Option<String>,
    /// New description. `None` leaves the current value untouched;
    /// `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// New kind.
    pub kind: Option<EventKind>,
    /// New date.
    pub event_date: Option<NaiveDate>,
    /// New time.
    pub event_time: Option<NaiveTime>,
    /// New location.
    pub location: Option<String>,
}
