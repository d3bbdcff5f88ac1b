//! Aggregation queries over attendance rows.
//!
//! Counts are computed with `COUNT(*) FILTER` so every query returns the
//! present/absent/total triple in a single round trip. Empty result sets
//! come back as zero rows, never as errors.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use rollcall_core::error::{AppError, ErrorKind};
use rollcall_core::result::AppResult;
use rollcall_entity::attendance::AttendanceStatus;
use rollcall_entity::stats::{BreakdownRow, StatusCounts, TopEvent, TopUser};

/// Repository for read-only aggregation queries.
#[derive(Debug, Clone)]
pub struct StatsRepository {
    pool: PgPool,
}

impl StatsRepository {
    /// Create a new stats repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Overall counts, optionally restricted to rows created inside
    /// `[from, to)`.
    pub async fn counts_between(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> AppResult<StatusCounts> {
        sqlx::query_as::<_, StatusCounts>(
            "SELECT COUNT(*) FILTER (WHERE status = $1) AS present, \
                    COUNT(*) FILTER (WHERE status = $2) AS absent, \
                    COUNT(*) AS total \
             FROM attendance \
             WHERE ($3::timestamptz IS NULL OR created_at >= $3) \
               AND ($4::timestamptz IS NULL OR created_at < $4)",
        )
        .bind(AttendanceStatus::Present)
        .bind(AttendanceStatus::Absent)
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to aggregate counts", e))
    }

    /// Counts for a single user across all events.
    pub async fn counts_for_user(&self, user_id: Uuid) -> AppResult<StatusCounts> {
        sqlx::query_as::<_, StatusCounts>(
            "SELECT COUNT(*) FILTER (WHERE status = $2) AS present, \
                    COUNT(*) FILTER (WHERE status = $3) AS absent, \
                    COUNT(*) AS total \
             FROM attendance WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(AttendanceStatus::Present)
        .bind(AttendanceStatus::Absent)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to aggregate user counts", e)
        })
    }

    /// Counts for a single event across all users.
    pub async fn counts_for_event(&self, event_id: Uuid) -> AppResult<StatusCounts> {
        sqlx::query_as::<_, StatusCounts>(
            "SELECT COUNT(*) FILTER (WHERE status = $2) AS present, \
                    COUNT(*) FILTER (WHERE status = $3) AS absent, \
                    COUNT(*) AS total \
             FROM attendance WHERE event_id = $1",
        )
        .bind(event_id)
        .bind(AttendanceStatus::Present)
        .bind(AttendanceStatus::Absent)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to aggregate event counts", e)
        })
    }

    /// Counts grouped by event kind. Kinds with no rows are absent from
    /// the result; callers fill zeros.
    pub async fn breakdown_by_kind(&self) -> AppResult<Vec<BreakdownRow>> {
        sqlx::query_as::<_, BreakdownRow>(
            "SELECT e.kind::text AS label, \
                    COUNT(*) FILTER (WHERE a.status = $1) AS present, \
                    COUNT(*) FILTER (WHERE a.status = $2) AS absent, \
                    COUNT(*) AS total \
             FROM attendance a JOIN events e ON e.id = a.event_id \
             GROUP BY e.kind ORDER BY e.kind",
        )
        .bind(AttendanceStatus::Present)
        .bind(AttendanceStatus::Absent)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to break down by kind", e)
        })
    }

    /// Counts grouped by attendee trade, largest group first.
    pub async fn breakdown_by_trade(&self) -> AppResult<Vec<BreakdownRow>> {
        sqlx::query_as::<_, BreakdownRow>(
            "SELECT u.trade AS label, \
                    COUNT(*) FILTER (WHERE a.status = $1) AS present, \
                    COUNT(*) FILTER (WHERE a.status = $2) AS absent, \
                    COUNT(*) AS total \
             FROM attendance a JOIN users u ON u.id = a.user_id \
             GROUP BY u.trade ORDER BY total DESC, label ASC",
        )
        .bind(AttendanceStatus::Present)
        .bind(AttendanceStatus::Absent)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to break down by trade", e)
        })
    }

    /// Events ranked by total attendance rows.
    pub async fn top_events(&self, limit: i64) -> AppResult<Vec<TopEvent>> {
        sqlx::query_as::<_, TopEvent>(
            "SELECT e.id AS event_id, e.title, e.event_date, \
                    COUNT(*) FILTER (WHERE a.status = $1) AS present, \
                    COUNT(*) AS total \
             FROM attendance a JOIN events e ON e.id = a.event_id \
             GROUP BY e.id, e.title, e.event_date \
             ORDER BY total DESC, e.event_date DESC LIMIT $2",
        )
        .bind(AttendanceStatus::Present)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rank events", e))
    }

    /// Users marked present at an event, ranked by their all-time present
    /// count so the most regular attendees lead the list.
    pub async fn top_users_for_event(&self, event_id: Uuid, limit: i64) -> AppResult<Vec<TopUser>> {
        sqlx::query_as::<_, TopUser>(
            "SELECT u.id AS user_id, u.name, u.roll_no, \
                    (SELECT COUNT(*) FROM attendance h \
                      WHERE h.user_id = u.id AND h.status = $2) AS present \
             FROM attendance a JOIN users u ON u.id = a.user_id \
             WHERE a.event_id = $1 AND a.status = $2 \
             ORDER BY present DESC, u.name ASC LIMIT $3",
        )
        .bind(event_id)
        .bind(AttendanceStatus::Present)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rank attendees", e))
    }

    /// Per-day counts for rows created inside `[from, to)`, keyed by the
    /// UTC calendar day. Days with no rows are omitted; the service layer
    /// fills the gaps with zeros.
    pub async fn daily_counts(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<(NaiveDate, StatusCounts)>> {
        let rows = sqlx::query_as::<_, (NaiveDate, i64, i64, i64)>(
            "SELECT (created_at AT TIME ZONE 'UTC')::date AS day, \
                    COUNT(*) FILTER (WHERE status = $1) AS present, \
                    COUNT(*) FILTER (WHERE status = $2) AS absent, \
                    COUNT(*) AS total \
             FROM attendance WHERE created_at >= $3 AND created_at < $4 \
             GROUP BY day ORDER BY day",
        )
        .bind(AttendanceStatus::Present)
        .bind(AttendanceStatus::Absent)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to aggregate daily counts", e)
        })?;

        Ok(rows
            .into_iter()
            .map(|(day, present, absent, total)| {
                (
                    day,
                    StatusCounts {
                        present,
                        absent,
                        total,
                    },
                )
            })
            .collect())
    }
}
