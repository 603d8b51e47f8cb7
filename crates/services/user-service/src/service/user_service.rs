//! User service - create, read, update and delete use cases.
//!
//! SOLID (SRP): Orchestrates the `User` aggregate and the repository port.
//! Domain rules live in the value objects; uniqueness lives here and in storage.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use domain::{DomainError, DomainResult, Email, User, UserId, UserName, UserRepository};

use crate::dto::{CreateUserCommand, UpdateUserCommand, UserResponse};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User use cases for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new user; the email must not be taken
    async fn create_user(&self, command: CreateUserCommand) -> DomainResult<UserResponse>;

    /// Get user by id
    async fn get_user(&self, user_id: &str) -> DomainResult<UserResponse>;

    /// List every user
    async fn list_users(&self) -> DomainResult<Vec<UserResponse>>;

    /// Apply a partial update
    async fn update_user(&self, command: UpdateUserCommand) -> DomainResult<UserResponse>;

    /// Delete user by id
    async fn delete_user(&self, user_id: &str) -> DomainResult<()>;

    /// Mark user active
    async fn activate_user(&self, user_id: &str) -> DomainResult<UserResponse>;

    /// Mark user inactive
    async fn deactivate_user(&self, user_id: &str) -> DomainResult<UserResponse>;
}

/// Concrete implementation of UserService using the repository port.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    async fn load(&self, id: UserId) -> DomainResult<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User with id {}", id)))
    }

    async fn ensure_email_free(&self, email: &Email) -> DomainResult<()> {
        if self.repo.exists_by_email(email).await? {
            return Err(DomainError::conflict(format!("User with email '{}'", email)));
        }
        Ok(())
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, command: CreateUserCommand) -> DomainResult<UserResponse> {
        let email = Email::new(&command.email)?;
        let name = UserName::new(&command.first_name, &command.last_name)?;

        self.ensure_email_free(&email).await?;

        let saved = self.repo.save(User::create(email, name)).await?;
        info!(user_id = %saved.id(), "User created");

        Ok(UserResponse::from(saved))
    }

    async fn get_user(&self, user_id: &str) -> DomainResult<UserResponse> {
        let id = UserId::parse(user_id)?;
        debug!(user_id = %id, "Fetching user");

        self.load(id).await.map(UserResponse::from)
    }

    async fn list_users(&self) -> DomainResult<Vec<UserResponse>> {
        let users = self.repo.list_all().await?;
        debug!(count = users.len(), "Listed users");

        Ok(users.iter().map(UserResponse::from).collect())
    }

    async fn update_user(&self, command: UpdateUserCommand) -> DomainResult<UserResponse> {
        let id = UserId::parse(&command.user_id)?;
        let mut user = self.load(id).await?;

        if let Some(raw) = command.email.as_deref() {
            let email = Email::new(raw)?;
            if let Some(holder) = self.repo.find_by_email(&email).await? {
                if holder.id() != id {
                    return Err(DomainError::conflict(format!("User with email '{}'", email)));
                }
            }
            user = user.update_email(email);
        }

        match (command.first_name.as_deref(), command.last_name.as_deref()) {
            (Some(first), Some(last)) => {
                user = user.update_name(UserName::new(first, last)?);
            }
            (None, None) => {}
            _ => debug!(user_id = %id, "Ignoring partial name update"),
        }

        let saved = self.repo.save(user).await?;
        info!(user_id = %id, "User updated");

        Ok(UserResponse::from(saved))
    }

    async fn delete_user(&self, user_id: &str) -> DomainResult<()> {
        let id = UserId::parse(user_id)?;

        // Existence check first so unknown ids report NotFound
        self.load(id).await?;
        self.repo.delete_by_id(id).await?;
        info!(user_id = %id, "User deleted");

        Ok(())
    }

    async fn activate_user(&self, user_id: &str) -> DomainResult<UserResponse> {
        let id = UserId::parse(user_id)?;
        let user = self.load(id).await?;

        let saved = self.repo.save(user.activate()).await?;
        info!(user_id = %id, "User activated");

        Ok(UserResponse::from(saved))
    }

    async fn deactivate_user(&self, user_id: &str) -> DomainResult<UserResponse> {
        let id = UserId::parse(user_id)?;
        let user = self.load(id).await?;

        let saved = self.repo.save(user.deactivate()).await?;
        info!(user_id = %id, "User deactivated");

        Ok(UserResponse::from(saved))
    }
}
