//! QR code generation, validation, and scan-to-mark.

pub mod service;

pub use service::{QrService, QrValidation, ScanOutcome, UserQrCode};
