//! # rollcall-auth
//!
//! Authentication primitives for RollCall.
//!
//! ## Modules
//!
//! - `jwt`: bearer token creation and validation
//! - `password`: Argon2id password hashing

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
