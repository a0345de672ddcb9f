use async_trait::async_trait;
use uuid::Uuid;

use userhub_models::users::{NewUser, User};

use crate::error::RepositoryError;

/// Persistent store of user records, keyed externally by `uuid`.
///
/// Implementations maintain `created_at`/`updated_at` and enforce uniqueness
/// of `uuid` and `email`, reporting clashes as [`RepositoryError::Conflict`].
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users ordered by creation time.
    async fn list(&self) -> Result<Vec<User>, RepositoryError>;

    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<User>, RepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError>;

    /// Writes every mutable column of `user`, matched by `uuid`, and bumps
    /// `updated_at`. Returns `None` when the row no longer exists.
    async fn update(&self, user: &User) -> Result<Option<User>, RepositoryError>;

    /// Returns whether a row was removed.
    async fn delete_by_uuid(&self, uuid: Uuid) -> Result<bool, RepositoryError>;
}
