use async_trait::async_trait;

use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::Chirp;
use crate::domain::chirp::models::ChirpId;
use crate::domain::chirp::models::CreateChirpCommand;

/// Port for chirp domain service operations.
#[async_trait]
pub trait ChirpServicePort: Send + Sync + 'static {
    /// Post a new chirp for an authenticated author.
    ///
    /// # Errors
    /// * `AuthorNotFound` - Author no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn create_chirp(&self, command: CreateChirpCommand) -> Result<Chirp, ChirpError>;

    /// Retrieve every chirp, oldest first.
    async fn list_chirps(&self) -> Result<Vec<Chirp>, ChirpError>;

    /// Retrieve a single chirp.
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_chirp(&self, id: &ChirpId) -> Result<Chirp, ChirpError>;
}

/// Persistence operations for chirp aggregate.
#[async_trait]
pub trait ChirpRepository: Send + Sync + 'static {
    /// Persist new chirp.
    ///
    /// # Errors
    /// * `AuthorNotFound` - Referenced user does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError>;

    /// Retrieve chirp by identifier (None if not found).
    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError>;

    /// Retrieve all chirps ordered by creation time ascending.
    async fn list_all(&self) -> Result<Vec<Chirp>, ChirpError>;
}
