//! Attendance repository implementation.
//!
//! Marking attendance is transactional: the row upsert and the recount of
//! the owning event's `attendee_count` commit together, so the cached
//! counter can never drift from the rows it summarizes.

use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use rollcall_core::error::{AppError, ErrorKind};
use rollcall_core::result::AppResult;
use rollcall_core::types::pagination::{PageRequest, PageResponse};
use rollcall_entity::attendance::{
    Attendance, AttendanceRecord, AttendanceStatus, MarkAttendance,
};
use rollcall_entity::event::EventKind;

/// Filters for joined attendance listings. All fields combine with AND.
#[derive(Debug, Clone, Default)]
pub struct AttendanceFilter {
    pub user_id: Option<Uuid>,
    pub event_id: Option<Uuid>,
    pub status: Option<AttendanceStatus>,
    pub kind: Option<EventKind>,
    pub trade: Option<String>,
    /// Earliest event date (inclusive).
    pub from: Option<NaiveDate>,
    /// Latest event date (inclusive).
    pub to: Option<NaiveDate>,
    /// Case-insensitive substring search over attendee name and roll number.
    pub search: Option<String>,
}

const RECORD_SELECT: &str = "SELECT a.id, a.user_id, u.name AS user_name, u.roll_no, u.trade, \
            a.event_id, e.title AS event_title, e.event_date, e.kind AS event_kind, \
            a.status, a.verifier_name, a.updated_at \
     FROM attendance a \
     JOIN users u ON u.id = a.user_id \
     JOIN events e ON e.id = a.event_id";

/// Repository for attendance rows and the derived event counter.
#[derive(Debug, Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    /// Create a new attendance repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upsert an attendance row and refresh the event's present counter.
    ///
    /// Re-marking the same (user, event) pair overwrites the status and the
    /// verifier snapshot (last writer wins). Both statements run in one
    /// transaction.
    pub async fn mark(&self, data: &MarkAttendance) -> AppResult<Attendance> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let row = sqlx::query_as::<_, Attendance>(
            "INSERT INTO attendance \
                 (user_id, event_id, status, verified_by, verifier_name, verifier_email) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT ON CONSTRAINT attendance_user_event_key DO UPDATE SET \
                 status = EXCLUDED.status, \
                 verified_by = EXCLUDED.verified_by, \
                 verifier_name = EXCLUDED.verifier_name, \
                 verifier_email = EXCLUDED.verifier_email, \
                 updated_at = NOW() \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(data.event_id)
        .bind(data.status)
        .bind(data.verifier.id)
        .bind(&data.verifier.name)
        .bind(&data.verifier.email)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark attendance", e))?;

        sqlx::query(
            "UPDATE events SET attendee_count = \
                 (SELECT COUNT(*) FROM attendance WHERE event_id = $1 AND status = $2), \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(data.event_id)
        .bind(AttendanceStatus::Present)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to refresh attendee count", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit attendance", e)
        })?;

        Ok(row)
    }

    /// Fetch the attendance row for a (user, event) pair, if any.
    pub async fn find_by_pair(
        &self,
        user_id: Uuid,
        event_id: Uuid,
    ) -> AppResult<Option<Attendance>> {
        sqlx::query_as::<_, Attendance>(
            "SELECT * FROM attendance WHERE user_id = $1 AND event_id = $2",
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find attendance", e))
    }

    /// Number of attendance rows referencing a user. Drives the hard-delete
    /// guard: users with history are only deactivated.
    pub async fn count_for_user(&self, user_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attendance WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count attendance", e)
            })
    }

    /// Paginated joined listing ordered by event date, newest first.
    pub async fn list(
        &self,
        filter: &AttendanceFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AttendanceRecord>> {
        let mut count_builder = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM attendance a \
             JOIN users u ON u.id = a.user_id \
             JOIN events e ON e.id = a.event_id",
        );
        Self::push_filter(&mut count_builder, filter);

        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count attendance records", e)
            })?;

        let mut builder = QueryBuilder::<Postgres>::new(RECORD_SELECT);
        Self::push_filter(&mut builder, filter);
        builder.push(" ORDER BY e.event_date DESC, a.updated_at DESC");
        builder.push(" LIMIT ");
        builder.push_bind(page.limit() as i64);
        builder.push(" OFFSET ");
        builder.push_bind(page.offset() as i64);

        let records = builder
            .build_query_as::<AttendanceRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list attendance records", e)
            })?;

        Ok(PageResponse::new(
            records,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Unpaginated joined listing for report rendering, capped by `limit`.
    /// Ordered by event date then attendee name so report pages read stably.
    pub async fn list_for_report(
        &self,
        filter: &AttendanceFilter,
        limit: i64,
    ) -> AppResult<Vec<AttendanceRecord>> {
        let mut builder = QueryBuilder::<Postgres>::new(RECORD_SELECT);
        Self::push_filter(&mut builder, filter);
        builder.push(" ORDER BY e.event_date DESC, u.name ASC");
        builder.push(" LIMIT ");
        builder.push_bind(limit);

        builder
            .build_query_as::<AttendanceRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load report records", e)
            })
    }

    fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &AttendanceFilter) {
        builder.push(" WHERE TRUE");
        if let Some(user_id) = filter.user_id {
            builder.push(" AND a.user_id = ");
            builder.push_bind(user_id);
        }
        if let Some(event_id) = filter.event_id {
            builder.push(" AND a.event_id = ");
            builder.push_bind(event_id);
        }
        if let Some(status) = filter.status {
            builder.push(" AND a.status = ");
            builder.push_bind(status);
        }
        if let Some(kind) = filter.kind {
            builder.push(" AND e.kind = ");
            builder.push_bind(kind);
        }
        if let Some(trade) = &filter.trade {
            builder.push(" AND u.trade = ");
            builder.push_bind(trade.clone());
        }
        if let Some(from) = filter.from {
            builder.push(" AND e.event_date >= ");
            builder.push_bind(from);
        }
        if let Some(to) = filter.to {
            builder.push(" AND e.event_date <= ");
            builder.push_bind(to);
        }
        if let Some(search) = &filter.search {
            let pattern = format!("%{search}%");
            builder.push(" AND (u.name ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR u.roll_no ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }
    }
}
