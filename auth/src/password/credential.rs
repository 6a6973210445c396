use std::fmt;

/// Stored one-way representation of a password.
///
/// Wraps a PHC string (`$argon2id$v=19$m=...,t=...,p=...$<salt>$<hash>`).
/// `Debug` output is redacted so credentials never end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a credential loaded from storage.
    ///
    /// No validation happens here; a malformed value surfaces as
    /// `PasswordError::VerificationFailed` when it is verified.
    pub fn from_stored(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// Get the PHC string for persistence.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
