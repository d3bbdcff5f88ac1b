//! Aggregation services.

pub mod service;

pub use service::{EventStats, RatedCounts, StatsOverview, StatsService, UserStats};
