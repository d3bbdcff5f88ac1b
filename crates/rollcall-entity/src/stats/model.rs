//! Aggregation result models.
//!
//! Every result upholds `total == present + absent`; there are no other
//! status values. An empty underlying result set yields all-zero counts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Present/absent/total counts for one filter predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StatusCounts {
    /// Count of `present` rows.
    pub present: i64,
    /// Count of `absent` rows.
    pub absent: i64,
    /// Total rows matching the filter.
    pub total: i64,
}

impl StatusCounts {
    /// Build counts from the two status buckets.
    pub fn new(present: i64, absent: i64) -> Self {
        Self {
            present,
            absent,
            total: present + absent,
        }
    }

    /// Attendance rate as an integer percentage: `round(present / total * 100)`.
    ///
    /// A zero total yields 0, never a division error.
    pub fn rate(&self) -> i64 {
        if self.total == 0 {
            return 0;
        }
        ((self.present as f64 / self.total as f64) * 100.0).round() as i64
    }
}

/// Counts grouped by a joined dimension (event kind or trade).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BreakdownRow {
    /// The dimension value (e.g. "event", "meeting", or a trade label).
    pub label: String,
    /// Count of `present` rows in this group.
    pub present: i64,
    /// Count of `absent` rows in this group.
    pub absent: i64,
    /// Total rows in this group.
    pub total: i64,
}

/// One event in the top-N-by-total-attendance leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TopEvent {
    /// Event identifier.
    pub event_id: Uuid,
    /// Event title.
    pub title: String,
    /// Event date.
    pub event_date: NaiveDate,
    /// Count of `present` rows.
    pub present: i64,
    /// Total attendance rows.
    pub total: i64,
}

/// One user in the top-N-by-present-count leaderboard for a single event.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TopUser {
    /// User identifier.
    pub user_id: Uuid,
    /// User name.
    pub name: String,
    /// Roll number.
    pub roll_no: String,
    /// Count of `present` rows.
    pub present: i64,
}

/// One day's bucket in the 7-day trend series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    /// The calendar day of this bucket.
    pub date: NaiveDate,
    /// Counts for records created on that day.
    #[serde(flatten)]
    pub counts: StatusCounts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_sum() {
        let counts = StatusCounts::new(3, 2);
        assert_eq!(counts.total, counts.present + counts.absent);
    }

    #[test]
    fn test_rate_rounding() {
        assert_eq!(StatusCounts::new(1, 2).rate(), 33);
        assert_eq!(StatusCounts::new(2, 1).rate(), 67);
        assert_eq!(StatusCounts::new(1, 1).rate(), 50);
        assert_eq!(StatusCounts::new(5, 0).rate(), 100);
    }

    #[test]
    fn test_zero_total_rate_is_zero() {
        assert_eq!(StatusCounts::default().rate(), 0);
    }
}
