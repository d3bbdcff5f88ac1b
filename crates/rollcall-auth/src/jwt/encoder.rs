//! Bearer token creation with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use rollcall_core::config::AuthConfig;
use rollcall_core::error::AppError;
use rollcall_entity::user::{User, UserRole};

use super::claims::Claims;

/// Creates signed bearer tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Token TTL in days.
    ttl_days: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("ttl_days", &self.ttl_days)
            .finish()
    }
}

/// Result of a successful token issuance.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IssuedToken {
    /// The signed bearer token string.
    pub token: String,
    /// Token expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl_days: config.token_ttl_days as i64,
        }
    }

    /// Issues a bearer token for the given user.
    pub fn issue(&self, user: &User) -> Result<IssuedToken, AppError> {
        self.issue_for(user.id, user.role, &user.name, &user.email)
    }

    /// Issues a bearer token from individual identity fields.
    pub fn issue_for(
        &self,
        user_id: Uuid,
        role: UserRole,
        name: &str,
        email: &str,
    ) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(self.ttl_days);

        let claims = Claims {
            sub: user_id,
            role,
            name: name.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::decoder::JwtDecoder;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret-at-least-32-bytes-long!".to_string(),
            token_ttl_days: 7,
            password_min_length: 8,
        }
    }

    #[test]
    fn test_issue_and_decode_round_trip() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config);

        let user_id = Uuid::new_v4();
        let issued = encoder
            .issue_for(user_id, UserRole::Standard, "Asha Rao", "asha@example.com")
            .unwrap();

        let claims = decoder.decode(&issued.token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, UserRole::Standard);
        assert_eq!(claims.email, "asha@example.com");
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config);

        let issued = encoder
            .issue_for(Uuid::new_v4(), UserRole::Admin, "A", "a@example.com")
            .unwrap();

        let mut tampered = issued.token;
        tampered.push('x');
        assert!(decoder.decode(&tampered).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let encoder = JwtEncoder::new(&test_config());
        let other = AuthConfig {
            jwt_secret: "a-completely-different-secret-value".to_string(),
            ..test_config()
        };
        let decoder = JwtDecoder::new(&other);

        let issued = encoder
            .issue_for(Uuid::new_v4(), UserRole::Standard, "A", "a@example.com")
            .unwrap();
        assert!(decoder.decode(&issued.token).is_err());
    }
}
