//! The JSON payload serialized into a user's personal QR code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rollcall_core::AppError;

/// Marker value for the payload `kind` field.
pub const PAYLOAD_KIND: &str = "attendance";

/// The structured payload embedded in a user's QR code.
///
/// Serialized as JSON into the QR matrix; scanners post the decoded JSON
/// string back to the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrPayload {
    /// The user this code identifies.
    pub user_id: Uuid,
    /// The user's roll number at generation time.
    pub roll_no: String,
    /// When the code was generated. Regeneration produces a new timestamp.
    pub timestamp: DateTime<Utc>,
    /// Payload kind marker. Always [`PAYLOAD_KIND`] for attendance codes.
    pub kind: String,
}

impl QrPayload {
    /// Build a fresh payload for the given user.
    pub fn new(user_id: Uuid, roll_no: impl Into<String>) -> Self {
        Self {
            user_id,
            roll_no: roll_no.into(),
            timestamp: Utc::now(),
            kind: PAYLOAD_KIND.to_string(),
        }
    }

    /// Serialize the payload to its canonical JSON form.
    pub fn encode(&self) -> Result<String, AppError> {
        serde_json::to_string(self).map_err(AppError::from)
    }

    /// Parse a payload from the JSON string carried in a scanned code.
    ///
    /// Rejects payloads whose `kind` marker is not an attendance code.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let payload: Self = serde_json::from_str(raw)
            .map_err(|e| AppError::validation(format!("Malformed QR payload: {e}")))?;
        if payload.kind != PAYLOAD_KIND {
            return Err(AppError::validation(format!(
                "Unrecognized QR payload kind: '{}'",
                payload.kind
            )));
        }
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_parse_roundtrip() {
        let payload = QrPayload::new(Uuid::new_v4(), "R100");
        let encoded = payload.encode().unwrap();
        let parsed = QrPayload::parse(&encoded).unwrap();
        assert_eq!(parsed, payload);
    }

    #[test]
    fn test_parse_rejects_wrong_kind() {
        let mut payload = QrPayload::new(Uuid::new_v4(), "R100");
        payload.kind = "ticket".to_string();
        let encoded = serde_json::to_string(&payload).unwrap();
        assert!(QrPayload::parse(&encoded).is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(QrPayload::parse("not json at all").is_err());
        assert!(QrPayload::parse("{}").is_err());
    }
}
