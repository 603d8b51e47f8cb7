//! Repository port for the User aggregate.
//!
//! The domain depends on this contract; persistence adapters implement it.

use async_trait::async_trait;

use crate::email::Email;
use crate::error::DomainResult;
use crate::user::User;
use crate::user_id::UserId;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Persistence contract for users.
///
/// Adapters carry infrastructure failures as [`DomainError::Repository`]
/// and report storage-level email uniqueness violations as
/// [`DomainError::Conflict`].
///
/// [`DomainError::Repository`]: crate::DomainError::Repository
/// [`DomainError::Conflict`]: crate::DomainError::Conflict
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert or update by id; returns the persisted representation
    async fn save(&self, user: User) -> DomainResult<User>;

    /// Find a user by id
    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;

    /// Find a user by exact (normalized) email
    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>>;

    /// List every user
    async fn list_all(&self) -> DomainResult<Vec<User>>;

    /// Delete a user by id; absent ids are ignored
    async fn delete_by_id(&self, id: UserId) -> DomainResult<()>;

    /// Check whether any user holds the given email
    async fn exists_by_email(&self, email: &Email) -> DomainResult<bool>;
}
