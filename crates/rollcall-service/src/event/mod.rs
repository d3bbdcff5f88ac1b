//! Event services: scheduling CRUD and public notice views.

pub mod notice;
pub mod service;

pub use notice::NoticeService;
pub use service::EventService;
