use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::AuthenticatedSession;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Argon2 work runs on the blocking thread pool so that hashing never
/// stalls the async request workers.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Shared password hasher and token issuer
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        if command.password.is_empty() {
            return Err(UserError::InvalidPassword);
        }

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
                .await
                .map_err(|e| UserError::Unknown(format!("Hashing task failed: {}", e)))??;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(user).await?;
        tracing::info!(user_id = %created.id, "User registered");

        Ok(created)
    }

    async fn authenticate(&self, command: LoginCommand) -> Result<AuthenticatedSession, UserError> {
        let user = match self.repository.find_by_email(&command.email).await? {
            Some(user) => user,
            None => {
                tracing::debug!("Login attempt for unknown email");
                let authenticator = Arc::clone(&self.authenticator);
                let password = command.password;
                let rejection = tokio::task::spawn_blocking(move || {
                    authenticator.reject_unknown_account(&password)
                })
                .await
                .map_err(|e| UserError::Unknown(format!("Verification task failed: {}", e)))?;
                return Err(rejection.into());
            }
        };

        let authenticator = Arc::clone(&self.authenticator);
        let credential = user.password_hash.clone();
        let subject = user.id.0;
        let password = command.password;
        let token = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &credential, subject)
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Verification task failed: {}", e)))??;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AuthenticatedSession { user, token })
    }

    async fn delete_all_users(&self) -> Result<(), UserError> {
        self.repository.delete_all().await?;
        tracing::warn!("All users deleted");
        Ok(())
    }
}
