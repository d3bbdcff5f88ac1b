//! Public notice views over active events.
//!
//! Notices are read-only projections of the event table for unauthenticated
//! display boards. Soft-deleted events never appear here.

use std::sync::Arc;

use rollcall_core::result::AppResult;
use rollcall_core::types::pagination::{PageRequest, PageResponse};
use rollcall_database::repositories::{EventListFilter, EventRepository};
use rollcall_entity::event::{Event, EventKind};

use crate::calendar::{self, DateWindow};

/// Serves the public notice views.
#[derive(Debug, Clone)]
pub struct NoticeService {
    /// Event repository.
    event_repo: Arc<EventRepository>,
}

impl NoticeService {
    /// Creates a new notice service.
    pub fn new(event_repo: Arc<EventRepository>) -> Self {
        Self { event_repo }
    }

    /// All active events, newest scheduled date first, paginated.
    pub async fn list(&self, page: PageRequest) -> AppResult<PageResponse<Event>> {
        self.event_repo
            .list(&EventListFilter::default(), &page)
            .await
    }

    /// Active events of one kind, newest scheduled date first.
    pub async fn list_by_kind(
        &self,
        kind: EventKind,
        page: PageRequest,
    ) -> AppResult<PageResponse<Event>> {
        let filter = EventListFilter {
            kind: Some(kind),
            ..Default::default()
        };
        self.event_repo.list(&filter, &page).await
    }

    /// Events scheduled today.
    pub async fn today(&self) -> AppResult<Vec<Event>> {
        self.window(DateWindow::single(calendar::today_utc())).await
    }

    /// Events in the current Sunday-started week.
    pub async fn this_week(&self) -> AppResult<Vec<Event>> {
        self.window(DateWindow::week_of(calendar::today_utc())).await
    }

    /// Events in the following Sunday-started week.
    pub async fn next_week(&self) -> AppResult<Vec<Event>> {
        self.window(DateWindow::next_week_of(calendar::today_utc()))
            .await
    }

    /// Events in the following calendar month.
    pub async fn next_month(&self) -> AppResult<Vec<Event>> {
        self.window(DateWindow::next_month_of(calendar::today_utc()))
            .await
    }

    async fn window(&self, window: DateWindow) -> AppResult<Vec<Event>> {
        self.event_repo.list_in_window(window.from, window.to).await
    }
}
