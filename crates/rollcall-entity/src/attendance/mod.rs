//! Attendance domain entities.

pub mod model;
pub mod status;

pub use model::{Attendance, AttendanceRecord, MarkAttendance, VerifierSnapshot};
pub use status::AttendanceStatus;
