//! Event domain entities.

pub mod kind;
pub mod model;

pub use kind::EventKind;
pub use model::{CreateEvent, Event, UpdateEvent};
