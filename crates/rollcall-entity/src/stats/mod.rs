//! Aggregation result types.

pub mod model;

pub use model::{BreakdownRow, StatusCounts, TopEvent, TopUser, TrendPoint};
