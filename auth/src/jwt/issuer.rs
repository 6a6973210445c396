use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::Error as JwtLibError;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::TokenClaims;
use super::claims::ISSUER;
use super::errors::TokenError;

/// Stateless identity token issuer.
///
/// Mints and verifies HS256 JWTs carrying a user id. Keys are derived once
/// from the signing secret; nothing here is mutated after construction.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    const ALGORITHM: Algorithm = Algorithm::HS256;

    /// Create a new token issuer with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Shared HMAC secret used for both signing and verifying
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Load it from configuration, never from code
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Self::ALGORITHM);
        validation.leeway = 0;
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a token for `subject` that expires `ttl` from now.
    ///
    /// # Returns
    /// Compact, URL-safe JWS string
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed, or `ttl` overflows the expiry
    pub fn issue(&self, subject: Uuid, ttl: Duration) -> Result<String, TokenError> {
        let claims = TokenClaims::new(subject, Utc::now(), ttl)?;

        encode(&Header::new(Self::ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Verify a token and extract its subject.
    ///
    /// The signature is checked before any claim, so a forged token is
    /// always reported as `SignatureInvalid` whatever its claims say.
    ///
    /// # Errors
    /// * `MalformedToken` - Not a three-part JWS, or undecodable header/payload
    /// * `SignatureInvalid` - Signature does not match the secret, or wrong algorithm
    /// * `TokenExpired` - Current time is at or past `exp`
    /// * `IssuerInvalid` - `iss` is missing or not this service
    /// * `SubjectInvalid` - `sub` is missing or not a UUID
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        if token.split('.').count() != 3 || token.split('.').any(str::is_empty) {
            return Err(TokenError::MalformedToken(
                "expected three dot-separated segments".to_string(),
            ));
        }

        let claims = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(classify)?
            .claims;

        if claims.is_expired(Utc::now().timestamp()) {
            return Err(TokenError::TokenExpired);
        }

        claims.subject()
    }
}

/// Issue a token for `subject` signed with `secret`.
pub fn issue_token(subject: Uuid, secret: &[u8], ttl: Duration) -> Result<String, TokenError> {
    TokenIssuer::new(secret).issue(subject, ttl)
}

/// Verify `token` against `secret` and return its subject.
pub fn verify_token(token: &str, secret: &[u8]) -> Result<Uuid, TokenError> {
    TokenIssuer::new(secret).verify(token)
}

fn classify(error: JwtLibError) -> TokenError {
    match error.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::SignatureInvalid,
        ErrorKind::ExpiredSignature => TokenError::TokenExpired,
        ErrorKind::InvalidIssuer => TokenError::IssuerInvalid,
        ErrorKind::MissingRequiredClaim(claim) if claim == "iss" => TokenError::IssuerInvalid,
        ErrorKind::MissingRequiredClaim(claim) if claim == "sub" => {
            TokenError::SubjectInvalid("missing subject".to_string())
        }
        _ => TokenError::MalformedToken(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn sign_raw(claims: &TokenClaims, secret: &[u8]) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret),
        )
        .expect("Failed to encode token")
    }

    fn valid_claims() -> TokenClaims {
        TokenClaims::new(Uuid::new_v4(), Utc::now(), Duration::hours(1)).unwrap()
    }

    #[test]
    fn test_issue_and_verify() {
        let issuer = TokenIssuer::new(SECRET);
        let subject = Uuid::new_v4();

        let token = issuer
            .issue(subject, Duration::hours(1))
            .expect("Failed to issue token");
        assert_eq!(token.split('.').count(), 3);

        let verified = issuer.verify(&token).expect("Failed to verify token");
        assert_eq!(verified, subject);
    }

    #[test]
    fn test_free_functions_match_issuer() {
        let subject = Uuid::new_v4();
        let token = issue_token(subject, SECRET, Duration::minutes(5)).unwrap();

        assert_eq!(verify_token(&token, SECRET), Ok(subject));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let token = issue_token(Uuid::new_v4(), SECRET, Duration::hours(1)).unwrap();

        let result = verify_token(&token, b"another_secret_key_at_least_32_bytes!");
        assert_eq!(result, Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn test_verify_tampered_payload() {
        let issuer = TokenIssuer::new(SECRET);
        let token = issuer.issue(Uuid::new_v4(), Duration::hours(1)).unwrap();
        let forged = issuer.issue(Uuid::new_v4(), Duration::hours(1)).unwrap();

        // Splice the payload of one token onto the signature of another
        let parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let spliced = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

        assert_eq!(issuer.verify(&spliced), Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn test_verify_expired_token() {
        let token = issue_token(Uuid::new_v4(), SECRET, Duration::hours(-1)).unwrap();

        assert_eq!(verify_token(&token, SECRET), Err(TokenError::TokenExpired));
    }

    #[test]
    fn test_expiry_instant_is_not_valid() {
        let now = Utc::now();
        let claims = TokenClaims::new(Uuid::new_v4(), now, Duration::zero()).unwrap();
        let token = sign_raw(&claims, SECRET);

        assert_eq!(verify_token(&token, SECRET), Err(TokenError::TokenExpired));
    }

    #[test]
    fn test_expired_token_with_wrong_secret_reports_signature() {
        let token = issue_token(Uuid::new_v4(), SECRET, Duration::hours(-1)).unwrap();

        let result = verify_token(&token, b"another_secret_key_at_least_32_bytes!");
        assert_eq!(result, Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn test_verify_malformed_token() {
        for garbage in ["not.a.valid.token", "", "abc", "a..b", "invalid.token.here"] {
            let result = verify_token(garbage, SECRET);
            assert!(
                matches!(result, Err(TokenError::MalformedToken(_))),
                "{:?} gave {:?}",
                garbage,
                result
            );
        }
    }

    #[test]
    fn test_verify_subject_not_uuid() {
        let mut claims = valid_claims();
        claims.sub = Some(json!("user123"));
        let token = sign_raw(&claims, SECRET);

        assert!(matches!(
            verify_token(&token, SECRET),
            Err(TokenError::SubjectInvalid(_))
        ));
    }

    #[test]
    fn test_verify_subject_not_a_string() {
        let mut claims = valid_claims();
        claims.sub = Some(json!(42));
        let token = sign_raw(&claims, SECRET);

        assert!(matches!(
            verify_token(&token, SECRET),
            Err(TokenError::SubjectInvalid(_))
        ));
    }

    #[test]
    fn test_issue_with_overflowing_ttl() {
        let result = issue_token(Uuid::new_v4(), SECRET, Duration::days(365 * 1_000_000));

        assert!(matches!(result, Err(TokenError::SigningFailed(_))));
    }

    #[test]
    fn test_verify_missing_subject() {
        let mut claims = valid_claims();
        claims.sub = None;
        let token = sign_raw(&claims, SECRET);

        assert!(matches!(
            verify_token(&token, SECRET),
            Err(TokenError::SubjectInvalid(_))
        ));
    }

    #[test]
    fn test_verify_foreign_issuer() {
        let mut claims = valid_claims();
        claims.iss = Some("someone-else".to_string());
        let token = sign_raw(&claims, SECRET);

        assert_eq!(verify_token(&token, SECRET), Err(TokenError::IssuerInvalid));
    }

    #[test]
    fn test_verify_missing_issuer() {
        let mut claims = valid_claims();
        claims.iss = None;
        let token = sign_raw(&claims, SECRET);

        assert_eq!(verify_token(&token, SECRET), Err(TokenError::IssuerInvalid));
    }

    #[test]
    fn test_verify_rejects_other_algorithm() {
        let token = encode(
            &Header::new(Algorithm::HS512),
            &valid_claims(),
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(verify_token(&token, SECRET), Err(TokenError::SignatureInvalid));
    }
}
