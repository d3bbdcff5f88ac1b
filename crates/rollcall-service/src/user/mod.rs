//! User services: registration/login self-service and admin management.

pub mod admin;
pub mod service;

pub use admin::{DeleteOutcome, UserAdminService};
pub use service::{AuthOutcome, UserService};
