//! Event kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of a schedulable occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "event_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// A placement event (drive, seminar, workshop).
    Event,
    /// An internal meeting.
    Meeting,
}

impl EventKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Meeting => "meeting",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = rollcall_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "event" => Ok(Self::Event),
            "meeting" => Ok(Self::Meeting),
            _ => Err(rollcall_core::AppError::validation(format!(
                "Invalid event kind: '{s}'. Expected one of: event, meeting"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("event".parse::<EventKind>().unwrap(), EventKind::Event);
        assert_eq!("Meeting".parse::<EventKind>().unwrap(), EventKind::Meeting);
        assert!("party".parse::<EventKind>().is_err());
    }
}
