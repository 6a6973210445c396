use std::sync::Arc;
use std::sync::OnceLock;

use chrono::Duration;
use uuid::Uuid;

use crate::jwt::TokenError;
use crate::jwt::TokenIssuer;
use crate::password::Credential;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds the process-wide signing secret (via its `TokenIssuer`) and the
/// token lifetime. Immutable after construction; share it behind an `Arc`.
#[derive(Clone)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_ttl: Duration,
    decoy_credential: Arc<OnceLock<Credential>>,
}

/// Password behind the decoy credential verified for unknown accounts.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `token_secret` - Secret key for token signing
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(token_secret: &[u8], token_ttl: Duration) -> Self {
        Self::with_hasher(PasswordHasher::new(), token_secret, token_ttl)
    }

    /// Create an authenticator around a pre-configured password hasher.
    pub fn with_hasher(
        password_hasher: PasswordHasher,
        token_secret: &[u8],
        token_ttl: Duration,
    ) -> Self {
        Self {
            password_hasher,
            token_issuer: TokenIssuer::new(token_secret),
            token_ttl,
            decoy_credential: Arc::new(OnceLock::new()),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<Credential, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password and issue a token for `subject`.
    ///
    /// A wrong password and an unreadable stored credential both come back
    /// as `InvalidCredentials`, so callers cannot tell them apart. The
    /// underlying reason is only logged.
    ///
    /// # Returns
    /// Signed token for `subject`
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match or credential is malformed
    /// * `TokenError` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        credential: &Credential,
        subject: Uuid,
    ) -> Result<String, AuthenticationError> {
        match self.password_hasher.verify(password, credential) {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(subject = %subject, "Password mismatch");
                return Err(AuthenticationError::InvalidCredentials);
            }
            Err(e) => {
                tracing::warn!(subject = %subject, error = %e, "Stored credential unusable");
                return Err(AuthenticationError::InvalidCredentials);
            }
        }

        Ok(self.issue_token(subject)?)
    }

    /// Reject a login for an account that does not exist.
    ///
    /// Runs one Argon2 verification against a decoy credential hashed with
    /// this hasher's parameters, so the rejection costs as much as a wrong
    /// password for a real account. Always `InvalidCredentials`.
    pub fn reject_unknown_account(&self, password: &str) -> AuthenticationError {
        match self.decoy_credential() {
            Ok(decoy) => {
                let _ = self.password_hasher.verify(password, decoy);
            }
            Err(e) => tracing::warn!(error = %e, "Failed to prepare decoy credential"),
        }

        AuthenticationError::InvalidCredentials
    }

    /// Hash the decoy credential on first use.
    fn decoy_credential(&self) -> Result<&Credential, PasswordError> {
        if let Some(decoy) = self.decoy_credential.get() {
            return Ok(decoy);
        }

        let decoy = self.password_hasher.hash(DECOY_PASSWORD)?;
        Ok(self.decoy_credential.get_or_init(|| decoy))
    }

    /// Issue a token without password verification.
    ///
    /// # Errors
    /// * `SigningFailed` - Token generation failed
    pub fn issue_token(&self, subject: Uuid) -> Result<String, TokenError> {
        self.token_issuer.issue(subject, self.token_ttl)
    }

    /// Validate a bearer token and return its subject.
    pub fn validate_token(&self, token: &str) -> Result<Uuid, TokenError> {
        self.token_issuer.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_authenticate_success() {
        let authenticator = Authenticator::new(SECRET, Duration::hours(1));

        let password = "CorrectHorseBatteryStaple123!";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let subject = Uuid::new_v4();
        let token = authenticator
            .authenticate(password, &hash, subject)
            .expect("Authentication failed");

        let decoded = authenticator
            .validate_token(&token)
            .expect("Token validation failed");
        assert_eq!(decoded, subject);
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = Authenticator::new(SECRET, Duration::hours(1));

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("wrong_password", &hash, Uuid::new_v4());
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_malformed_credential_looks_like_wrong_password() {
        let authenticator = Authenticator::new(SECRET, Duration::hours(1));

        let result = authenticator.authenticate(
            "my_password",
            &Credential::from_stored("not-a-phc-string"),
            Uuid::new_v4(),
        );
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_reject_unknown_account_hashes_decoy_once() {
        let authenticator = Authenticator::new(SECRET, Duration::hours(1));

        let error = authenticator.reject_unknown_account("anything");
        assert!(matches!(error, AuthenticationError::InvalidCredentials));

        let decoy = authenticator
            .decoy_credential
            .get()
            .expect("decoy credential not prepared")
            .clone();
        assert!(decoy.as_str().starts_with("$argon2id$"));

        // Clones share the decoy, and later rejections reuse it
        let cloned = authenticator.clone();
        cloned.reject_unknown_account(DECOY_PASSWORD);
        assert_eq!(cloned.decoy_credential.get(), Some(&decoy));
    }

    #[test]
    fn test_issue_and_validate_token() {
        let authenticator = Authenticator::new(SECRET, Duration::minutes(15));
        let subject = Uuid::new_v4();

        let token = authenticator
            .issue_token(subject)
            .expect("Failed to issue token");

        assert_eq!(authenticator.validate_token(&token), Ok(subject));
    }

    #[test]
    fn test_negative_ttl_issues_expired_tokens() {
        let authenticator = Authenticator::new(SECRET, Duration::hours(-1));
        let token = authenticator.issue_token(Uuid::new_v4()).unwrap();

        assert_eq!(
            authenticator.validate_token(&token),
            Err(TokenError::TokenExpired)
        );
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = Authenticator::new(SECRET, Duration::hours(1));

        let result = authenticator.validate_token("invalid.token.here");
        assert!(matches!(result, Err(TokenError::MalformedToken(_))));
    }
}
