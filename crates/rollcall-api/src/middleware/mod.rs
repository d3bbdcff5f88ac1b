//! Tower/Axum middleware.

pub mod cors;
pub mod logging;
