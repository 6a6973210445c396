use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::errors::TokenError;

/// Issuer claim stamped on every token this service mints.
pub const ISSUER: &str = "chirpy";

/// Registered JWT claims carried by an identity token.
///
/// `sub` and `iss` are optional on the wire so that a token missing them
/// is reported as an invalid subject or issuer rather than a parse error.
/// `sub` accepts any JSON value for the same reason; only a UUID string
/// is a usable subject.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject (user identifier, UUID string)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<Value>,

    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl TokenClaims {
    /// Create claims for a subject, valid for `ttl` from `issued_at`.
    ///
    /// A negative `ttl` yields claims that are already expired.
    ///
    /// # Errors
    /// * `SigningFailed` - `issued_at + ttl` is not a representable instant
    pub fn new(
        subject: Uuid,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        let expires_at = issued_at.checked_add_signed(ttl).ok_or_else(|| {
            TokenError::SigningFailed(format!("token lifetime {} overflows expiry", ttl))
        })?;

        Ok(Self {
            sub: Some(Value::String(subject.to_string())),
            iss: Some(ISSUER.to_string()),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Extract the subject as a user id.
    ///
    /// # Errors
    /// * `SubjectInvalid` - `sub` is missing, not a string, or not a UUID
    pub fn subject(&self) -> Result<Uuid, TokenError> {
        match &self.sub {
            Some(Value::String(subject)) => Uuid::parse_str(subject)
                .map_err(|e| TokenError::SubjectInvalid(e.to_string())),
            Some(other) => Err(TokenError::SubjectInvalid(format!(
                "expected a UUID string, got {}",
                other
            ))),
            None => Err(TokenError::SubjectInvalid("missing subject".to_string())),
        }
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// The expiry instant itself is already outside the validity window.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
