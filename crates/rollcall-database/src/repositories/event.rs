//! Event repository implementation.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use rollcall_core::error::{AppError, ErrorKind};
use rollcall_core::result::AppResult;
use rollcall_core::types::pagination::{PageRequest, PageResponse};
use rollcall_entity::event::{CreateEvent, Event, EventKind, UpdateEvent};

/// Filters for the event listing query.
#[derive(Debug, Clone, Default)]
pub struct EventListFilter {
    /// Restrict to one kind (event or meeting).
    pub kind: Option<EventKind>,
    /// Earliest scheduled date (inclusive).
    pub from: Option<NaiveDate>,
    /// Latest scheduled date (inclusive).
    pub to: Option<NaiveDate>,
    /// Case-insensitive substring search over title, description, and location.
    pub search: Option<String>,
    /// Include soft-deleted events. Defaults to false.
    pub include_inactive: bool,
}

/// Repository for event CRUD and scheduling queries.
#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Create a new event repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an event by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find event", e))
    }

    /// List events with filters and pagination, newest schedule first.
    pub async fn list(
        &self,
        filter: &EventListFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Event>> {
        let mut conditions = Vec::new();
        let mut param_idx = 1u32;

        if !filter.include_inactive {
            conditions.push("is_active = TRUE".to_string());
        }
        if filter.kind.is_some() {
            conditions.push(format!("kind = ${param_idx}"));
            param_idx += 1;
        }
        if filter.from.is_some() {
            conditions.push(format!("event_date >= ${param_idx}"));
            param_idx += 1;
        }
        if filter.to.is_some() {
            conditions.push(format!("event_date <= ${param_idx}"));
            param_idx += 1;
        }
        if filter.search.is_some() {
            conditions.push(format!(
                "(title ILIKE ${param_idx} OR description ILIKE ${param_idx} \
                 OR location ILIKE ${param_idx})"
            ));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM events {where_clause}");
        let select_sql = format!(
            "SELECT * FROM events {where_clause} \
             ORDER BY event_date DESC, event_time DESC LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, Event>(&select_sql);

        if let Some(kind) = filter.kind {
            count_query = count_query.bind(kind);
            select_query = select_query.bind(kind);
        }
        if let Some(from) = filter.from {
            count_query = count_query.bind(from);
            select_query = select_query.bind(from);
        }
        if let Some(to) = filter.to {
            count_query = count_query.bind(to);
            select_query = select_query.bind(to);
        }
        if let Some(search) = &filter.search {
            let pattern = format!("%{search}%");
            count_query = count_query.bind(pattern.clone());
            select_query = select_query.bind(pattern);
        }

        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count events", e))?;

        let events = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list events", e))?;

        Ok(PageResponse::new(
            events,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Active events scheduled on or after the given date, soonest first.
    pub async fn list_upcoming(&self, today: NaiveDate, limit: i64) -> AppResult<Vec<Event>> {
        sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE is_active = TRUE AND event_date >= $1 \
             ORDER BY event_date ASC, event_time ASC LIMIT $2",
        )
        .bind(today)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list upcoming events", e))
    }

    /// Active events inside an inclusive date window.
    pub async fn list_in_window(&self, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<Event>> {
        sqlx::query_as::<_, Event>(
            "SELECT * FROM events \
             WHERE is_active = TRUE AND event_date BETWEEN $1 AND $2 \
             ORDER BY event_date ASC, event_time ASC",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list events in window", e)
        })
    }

    /// Create a new event.
    pub async fn create(&self, data: &CreateEvent) -> AppResult<Event> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (title, description, kind, event_date, event_time, location, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.kind)
        .bind(data.event_date)
        .bind(data.event_time)
        .bind(&data.location)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create event", e))
    }

    /// Update an event's mutable fields. Absent fields keep their current
    /// value; an explicit null clears the description.
    pub async fn update(&self, id: Uuid, data: &UpdateEvent) -> AppResult<Event> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET title = COALESCE($2, title), \
                               description = CASE WHEN $8 THEN $3 ELSE description END, \
                               kind = COALESCE($4, kind), \
                               event_date = COALESCE($5, event_date), \
                               event_time = COALESCE($6, event_time), \
                               location = COALESCE($7, location), \
                               updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(data.description.clone().flatten())
        .bind(data.kind)
        .bind(data.event_date)
        .bind(data.event_time)
        .bind(&data.location)
        .bind(data.description.is_some())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update event", e))?
        .ok_or_else(|| AppError::not_found(format!("Event {id} not found")))
    }

    /// Soft-delete an event. Attendance history stays intact.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<()> {
        let result =
            sqlx::query("UPDATE events SET is_active = FALSE, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to delete event", e)
                })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Event {id} not found")));
        }
        Ok(())
    }
}
