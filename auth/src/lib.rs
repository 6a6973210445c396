//! Authentication core for Chirpy
//!
//! Provides the two pieces every request handler leans on:
//! - Password hashing (Argon2id) with constant-time verification
//! - Stateless identity tokens (HS256 JWT) carrying a user id
//!
//! Nothing here performs I/O or keeps mutable state, so every type is
//! safe to share across request tasks.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let credential = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &credential).unwrap());
//! assert!(!hasher.verify("not_my_password", &credential).unwrap());
//! ```
//!
//! ## Identity Tokens
//! ```
//! use auth::TokenIssuer;
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!");
//! let user_id = Uuid::new_v4();
//! let token = issuer.issue(user_id, Duration::hours(1)).unwrap();
//! assert_eq!(issuer.verify(&token).unwrap(), user_id);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(1));
//!
//! // Register: hash password
//! let credential = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let user_id = Uuid::new_v4();
//! let token = auth.authenticate("password123", &credential, user_id).unwrap();
//!
//! // Authenticated request: validate token
//! assert_eq!(auth.validate_token(&token).unwrap(), user_id);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::issue_token;
pub use jwt::verify_token;
pub use jwt::TokenClaims;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use password::Credential;
pub use password::PasswordError;
pub use password::PasswordHasher;
