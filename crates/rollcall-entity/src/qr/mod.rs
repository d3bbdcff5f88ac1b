//! QR code value objects.

pub mod payload;

pub use payload::QrPayload;
