//! HTTP request handlers, grouped by domain.

pub mod attendance;
pub mod auth;
pub mod event;
pub mod health;
pub mod notice;
pub mod qr;
pub mod user;
