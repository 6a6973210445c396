use async_trait::async_trait;

use crate::domain::user::models::AuthenticatedSession;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user, storing a hash of the password.
    ///
    /// # Errors
    /// * `InvalidPassword` - Password is empty
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Check email and password and issue a bearer token.
    ///
    /// An unknown email and a wrong password both yield
    /// `InvalidCredentials`, so callers cannot probe for accounts.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email, wrong password, or unusable stored hash
    /// * `Token` - Token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn authenticate(&self, command: LoginCommand) -> Result<AuthenticatedSession, UserError>;

    /// Delete every user (and, through the schema, their chirps).
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete_all_users(&self) -> Result<(), UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Remove all users from storage.
    async fn delete_all(&self) -> Result<(), UserError>;
}
