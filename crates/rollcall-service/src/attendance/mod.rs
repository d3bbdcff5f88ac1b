//! Attendance marking and listing services.

pub mod service;

pub use service::AttendanceService;
