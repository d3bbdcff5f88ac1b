//! # rollcall-service
//!
//! Business logic services for RollCall. Services compose repositories
//! and auth primitives behind `Arc`s; all authorization decisions that
//! depend on the caller go through a [`context::RequestContext`].

pub mod attendance;
pub mod calendar;
pub mod context;
pub mod event;
pub mod qr;
pub mod report;
pub mod stats;
pub mod user;

pub use context::RequestContext;
