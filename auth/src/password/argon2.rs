use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as PasswordHashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::credential::Credential;
use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Salted, memory-hard one-way hashing (Argon2id). Holds only immutable
/// cost parameters, so one instance can be shared across threads.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a new password hasher with the argon2 crate defaults
    /// (m=19456 KiB, t=2, p=1).
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Create a password hasher with explicit Argon2id cost parameters.
    ///
    /// # Arguments
    /// * `memory_kib` - Memory cost in KiB
    /// * `iterations` - Number of passes
    /// * `parallelism` - Degree of parallelism (lanes)
    ///
    /// # Errors
    /// * `HashingFailed` - Parameters are outside the ranges Argon2 accepts
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| PasswordError::HashingFailed(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext password securely.
    ///
    /// Generates a fresh random salt from the OS RNG for every call, so
    /// hashing the same password twice yields two different credentials.
    /// Password policy (emptiness, strength) is the caller's concern.
    ///
    /// # Returns
    /// Credential in PHC string format (algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<Credential, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| Credential::from_stored(hash.to_string()))
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored credential.
    ///
    /// Recomputes the hash with the salt and parameters embedded in the
    /// credential and compares the outputs in constant time.
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Credential is malformed or names an unsupported algorithm
    pub fn verify(&self, password: &str, credential: &Credential) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(credential.as_str()).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(PasswordError::VerificationFailed(e.to_string())),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "CorrectHorseBatteryStaple123!";

        let hash = hasher.hash(password).expect("Failed to hash password");
        assert!(hash.as_str().starts_with("$argon2id$v=19$"));

        assert!(hasher
            .verify(password, &hash)
            .expect("Failed to verify password"));
        assert!(!hasher
            .verify("wrong_password", &hash)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_no_false_positives_across_sample() {
        let hasher = PasswordHasher::new();
        let passwords = ["alpha", "Alpha", "alpha ", "bravo-42", "🔐パスワード"];

        for (i, original) in passwords.iter().enumerate() {
            let hash = hasher.hash(original).expect("Failed to hash password");
            for (j, candidate) in passwords.iter().enumerate() {
                let matched = hasher
                    .verify(candidate, &hash)
                    .expect("Failed to verify password");
                assert_eq!(matched, i == j, "{:?} against hash of {:?}", candidate, original);
            }
        }
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let hasher = PasswordHasher::new();
        let password = "same_password";

        let first = hasher.hash(password).expect("Failed to hash password");
        let second = hasher.hash(password).expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify(password, &first).unwrap());
        assert!(hasher.verify(password, &second).unwrap());
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = PasswordHasher::new();
        let result = hasher.verify("password", &Credential::from_stored("invalid_hash"));
        assert!(matches!(result, Err(PasswordError::VerificationFailed(_))));
    }

    #[test]
    fn test_verify_unsupported_algorithm() {
        let hasher = PasswordHasher::new();
        let credential = Credential::from_stored(
            "$scrypt$ln=15,r=8,p=1$c29tZXNhbHQ$dGhpcyBpcyBub3QgYSByZWFsIGhhc2g",
        );

        let result = hasher.verify("password", &credential);
        assert!(matches!(result, Err(PasswordError::VerificationFailed(_))));
    }

    #[test]
    fn test_custom_params_embedded_and_honoured() {
        let cheap = PasswordHasher::with_params(8 * 1024, 1, 1).expect("Invalid params");
        let hash = cheap.hash("password").expect("Failed to hash password");
        assert!(hash.as_str().contains("m=8192,t=1,p=1"));

        // A hasher with different defaults still verifies using the embedded parameters
        let default_hasher = PasswordHasher::new();
        assert!(default_hasher.verify("password", &hash).unwrap());
    }

    #[test]
    fn test_with_params_rejects_zero_iterations() {
        let result = PasswordHasher::with_params(8 * 1024, 0, 1);
        assert!(matches!(result, Err(PasswordError::HashingFailed(_))));
    }
}
