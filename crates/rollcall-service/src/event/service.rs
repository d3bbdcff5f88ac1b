//! Event scheduling operations.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use chrono::{Days, NaiveDate, NaiveTime};

use rollcall_core::error::AppError;
use rollcall_core::result::AppResult;
use rollcall_core::types::pagination::{PageRequest, PageResponse};
use rollcall_database::repositories::{EventListFilter, EventRepository};
use rollcall_entity::event::{CreateEvent, Event, EventKind, UpdateEvent};

use crate::calendar;
use crate::context::RequestContext;

/// Handles event and meeting scheduling.
#[derive(Debug, Clone)]
pub struct EventService {
    /// Event repository.
    event_repo: Arc<EventRepository>,
}

/// Data for scheduling a new event, before the creator is attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
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
}

impl EventService {
    /// Creates a new event service.
    pub fn new(event_repo: Arc<EventRepository>) -> Self {
        Self { event_repo }
    }

    /// Schedules a new event, attributed to the calling admin.
    pub async fn create(&self, ctx: &RequestContext, req: CreateEventRequest) -> AppResult<Event> {
        ctx.require_admin()?;

        if req.title.trim().is_empty() {
            return Err(AppError::validation("Title cannot be empty"));
        }
        if req.location.trim().is_empty() {
            return Err(AppError::validation("Location cannot be empty"));
        }

        let event = self
            .event_repo
            .create(&CreateEvent {
                title: req.title.trim().to_string(),
                description: req.description,
                kind: req.kind,
                event_date: req.event_date,
                event_time: req.event_time,
                location: req.location.trim().to_string(),
                created_by: ctx.user_id,
            })
            .await?;

        info!(event_id = %event.id, kind = %event.kind, "Event created");
        Ok(event)
    }

    /// Fetches a single event by ID. Soft-deleted events stay reachable
    /// by direct ID so attendance history pages can resolve them.
    pub async fn get(&self, event_id: Uuid) -> AppResult<Event> {
        self.event_repo
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))
    }

    /// Lists events with filters and pagination.
    pub async fn list(
        &self,
        filter: EventListFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<Event>> {
        self.event_repo.list(&filter, &page).await
    }

    /// Active events from today onward, soonest first.
    pub async fn upcoming(&self, limit: i64) -> AppResult<Vec<Event>> {
        self.event_repo
            .list_upcoming(calendar::today_utc(), limit)
            .await
    }

    /// Active events in the yesterday/today/tomorrow window, for scan
    /// consoles that need the events currently worth marking against.
    pub async fn active_window(&self) -> AppResult<Vec<Event>> {
        let today = calendar::today_utc();
        self.event_repo
            .list_in_window(today - Days::new(1), today + Days::new(1))
            .await
    }

    /// Updates an event. Only the creating admin or another admin may.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
        data: UpdateEvent,
    ) -> AppResult<Event> {
        let event = self.get(event_id).await?;
        self.require_creator_or_admin(ctx, &event)?;

        if let Some(title) = &data.title {
            if title.trim().is_empty() {
                return Err(AppError::validation("Title cannot be empty"));
            }
        }

        let event = self.event_repo.update(event_id, &data).await?;
        info!(event_id = %event_id, "Event updated");
        Ok(event)
    }

    /// Soft-deletes an event. Attendance history is preserved; the event
    /// disappears from listings and notices.
    pub async fn delete(&self, ctx: &RequestContext, event_id: Uuid) -> AppResult<()> {
        let event = self.get(event_id).await?;
        self.require_creator_or_admin(ctx, &event)?;

        self.event_repo.soft_delete(event_id).await?;
        info!(event_id = %event_id, "Event deleted");
        Ok(())
    }

    fn require_creator_or_admin(&self, ctx: &RequestContext, event: &Event) -> AppResult<()> {
        if ctx.is_admin() || event.created_by == ctx.user_id {
            Ok(())
        } else {
            Err(AppError::forbidden(
                "Only the event creator or an admin may modify this event",
            ))
        }
    }
}
