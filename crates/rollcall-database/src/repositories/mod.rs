//! Concrete repository implementations.

pub mod attendance;
pub mod event;
pub mod stats;
pub mod user;

pub use attendance::{AttendanceFilter, AttendanceRepository};
pub use event::{EventListFilter, EventRepository};
pub use stats::StatsRepository;
pub use user::{UserListFilter, UserRepository};
