//! # rollcall-core
//!
//! Core crate for RollCall. Contains configuration schemas,
//! pagination/response types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other RollCall crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
