//! Report rendering.

pub mod pdf;

pub use pdf::PdfReportRenderer;
