//! Aggregation over attendance records.
//!
//! All SQL aggregation lives in the stats repository; this layer computes
//! the UTC time windows, fills gaps the GROUP BY queries leave (days and
//! kinds with no rows), and attaches rates.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Days, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

use rollcall_core::error::AppError;
use rollcall_core::result::AppResult;
use rollcall_database::repositories::{EventRepository, StatsRepository, UserRepository};
use rollcall_entity::event::EventKind;
use rollcall_entity::stats::{BreakdownRow, StatusCounts, TopEvent, TopUser, TrendPoint};

use crate::calendar::{self, DateWindow};
use crate::context::RequestContext;

/// Leaderboard length in the overview and event stats.
const TOP_N: i64 = 5;

/// Days in the trend series, today inclusive.
const TREND_DAYS: u64 = 7;

/// Counts plus their integer attendance rate.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RatedCounts {
    /// The underlying counts.
    #[serde(flatten)]
    pub counts: StatusCounts,
    /// `round(present / total * 100)`; 0 when total is 0.
    pub rate: i64,
}

impl From<StatusCounts> for RatedCounts {
    fn from(counts: StatusCounts) -> Self {
        Self {
            rate: counts.rate(),
            counts,
        }
    }
}

/// The admin statistics overview.
#[derive(Debug, Clone, Serialize)]
pub struct StatsOverview {
    /// All-time counts and rate.
    pub overall: RatedCounts,
    /// Rows created today (UTC).
    pub today: StatusCounts,
    /// Rows created in the current Sunday-started week.
    pub this_week: StatusCounts,
    /// Rows created in the current calendar month.
    pub this_month: StatusCounts,
    /// Counts grouped by event kind; both kinds always present.
    pub by_kind: Vec<BreakdownRow>,
    /// Counts grouped by attendee trade, largest first.
    pub by_trade: Vec<BreakdownRow>,
    /// Events ranked by total attendance rows.
    pub top_events: Vec<TopEvent>,
    /// Per-day series for the last seven days, today inclusive. Every day
    /// appears, zero-filled when nothing was recorded.
    pub trend: Vec<TrendPoint>,
}

/// Per-user statistics.
#[derive(Debug, Clone, Serialize)]
pub struct UserStats {
    /// The user being summarized.
    pub user_id: Uuid,
    /// Counts and rate across all events.
    #[serde(flatten)]
    pub counts: RatedCounts,
}

/// Per-event statistics.
#[derive(Debug, Clone, Serialize)]
pub struct EventStats {
    /// The event being summarized.
    pub event_id: Uuid,
    /// Counts and rate across all attendees.
    #[serde(flatten)]
    pub counts: RatedCounts,
    /// Present attendees, most regular first.
    pub top_attendees: Vec<TopUser>,
}

/// Computes attendance statistics.
#[derive(Debug, Clone)]
pub struct StatsService {
    /// Stats repository.
    stats_repo: Arc<StatsRepository>,
    /// User repository, for referent checks.
    user_repo: Arc<UserRepository>,
    /// Event repository, for referent checks.
    event_repo: Arc<EventRepository>,
}

impl StatsService {
    /// Creates a new stats service.
    pub fn new(
        stats_repo: Arc<StatsRepository>,
        user_repo: Arc<UserRepository>,
        event_repo: Arc<EventRepository>,
    ) -> Self {
        Self {
            stats_repo,
            user_repo,
            event_repo,
        }
    }

    /// The admin overview: overall, bucketed, grouped, ranked, and trended.
    pub async fn overview(&self, ctx: &RequestContext) -> AppResult<StatsOverview> {
        ctx.require_admin()?;

        let today = calendar::today_utc();

        let overall = self.stats_repo.counts_between(None, None).await?;
        let today_counts = self.bucket(DateWindow::single(today)).await?;
        let this_week = self.bucket(DateWindow::week_of(today)).await?;
        let this_month = self.bucket(DateWindow::month_of(today)).await?;

        let by_kind = fill_kind_gaps(self.stats_repo.breakdown_by_kind().await?);
        let by_trade = self.stats_repo.breakdown_by_trade().await?;
        let top_events = self.stats_repo.top_events(TOP_N).await?;
        let trend = self.trend(today).await?;

        Ok(StatsOverview {
            overall: overall.into(),
            today: today_counts,
            this_week,
            this_month,
            by_kind,
            by_trade,
            top_events,
            trend,
        })
    }

    /// One user's counts and rate, visible to the owner or an admin.
    pub async fn user_stats(&self, ctx: &RequestContext, user_id: Uuid) -> AppResult<UserStats> {
        ctx.require_self_or_admin(user_id)?;

        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let counts = self.stats_repo.counts_for_user(user_id).await?;
        Ok(UserStats {
            user_id,
            counts: counts.into(),
        })
    }

    /// One event's counts, rate, and top attendees. Admin only.
    pub async fn event_stats(&self, ctx: &RequestContext, event_id: Uuid) -> AppResult<EventStats> {
        ctx.require_admin()?;

        self.event_repo
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))?;

        let counts = self.stats_repo.counts_for_event(event_id).await?;
        let top_attendees = self.stats_repo.top_users_for_event(event_id, TOP_N).await?;

        Ok(EventStats {
            event_id,
            counts: counts.into(),
            top_attendees,
        })
    }

    async fn bucket(&self, window: DateWindow) -> AppResult<StatusCounts> {
        self.stats_repo
            .counts_between(Some(window.start_utc()), Some(window.end_utc_exclusive()))
            .await
    }

    async fn trend(&self, today: NaiveDate) -> AppResult<Vec<TrendPoint>> {
        let first = today - Days::new(TREND_DAYS - 1);
        let from = calendar::day_start_utc(first);
        let to = calendar::day_start_utc(today + Days::new(1));

        let by_day: HashMap<NaiveDate, StatusCounts> =
            self.stats_repo.daily_counts(from, to).await?.into_iter().collect();

        Ok((0..TREND_DAYS)
            .map(|offset| {
                let date = first + Days::new(offset);
                TrendPoint {
                    date,
                    counts: by_day.get(&date).copied().unwrap_or_default(),
                }
            })
            .collect())
    }
}

/// Ensure both kinds appear in the kind breakdown, zero-filled if absent.
fn fill_kind_gaps(rows: Vec<BreakdownRow>) -> Vec<BreakdownRow> {
    [EventKind::Event, EventKind::Meeting]
        .iter()
        .map(|kind| {
            rows.iter()
                .find(|r| r.label == kind.as_str())
                .cloned()
                .unwrap_or_else(|| BreakdownRow {
                    label: kind.as_str().to_string(),
                    present: 0,
                    absent: 0,
                    total: 0,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_kind_gaps_adds_missing_kinds() {
        let rows = vec![BreakdownRow {
            label: "meeting".to_string(),
            present: 4,
            absent: 1,
            total: 5,
        }];
        let filled = fill_kind_gaps(rows);
        assert_eq!(filled.len(), 2);
        assert_eq!(filled[0].label, "event");
        assert_eq!(filled[0].total, 0);
        assert_eq!(filled[1].label, "meeting");
        assert_eq!(filled[1].total, 5);
    }

    #[test]
    fn test_rated_counts_from_counts() {
        let rated: RatedCounts = StatusCounts::new(3, 1).into();
        assert_eq!(rated.rate, 75);
        assert_eq!(rated.counts.total, 4);
    }
}
