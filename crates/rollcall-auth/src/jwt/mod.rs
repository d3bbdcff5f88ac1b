//! Bearer token creation and validation.
//!
//! Tokens are stateless HS256 JWTs: there is no session store, refresh
//! flow, or revocation list. A token stays valid until its expiry.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::Claims;
pub use decoder::JwtDecoder;
pub use encoder::{IssuedToken, JwtEncoder};
