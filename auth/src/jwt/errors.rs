use thiserror::Error;

/// Error type for token operations.
///
/// The kinds exist for internal diagnostics. Callers must collapse all of
/// them into one "unauthorized" response before anything reaches a client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token is malformed: {0}")]
    MalformedToken(String),

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token subject is invalid: {0}")]
    SubjectInvalid(String),

    #[error("Token issuer is invalid")]
    IssuerInvalid,
}
