//! In-memory implementation of the user repository port.
//!
//! Backs the `memory` storage mode and tests that need real repository
//! semantics without a database.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use domain::{DomainError, DomainResult, Email, User, UserId, UserRepository};

/// Thread-safe map of users keyed by id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn save(&self, user: User) -> DomainResult<User> {
        let mut users = self.users.write().await;

        // Mirrors the unique email index of the relational store
        let taken = users
            .values()
            .any(|existing| existing.id() != user.id() && existing.email() == user.email());
        if taken {
            return Err(DomainError::conflict(format!(
                "User with email '{}'",
                user.email()
            )));
        }

        users.insert(user.id(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email() == email).cloned())
    }

    async fn list_all(&self) -> DomainResult<Vec<User>> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(all)
    }

    async fn delete_by_id(&self, id: UserId) -> DomainResult<()> {
        let mut users = self.users.write().await;
        users.remove(&id);
        Ok(())
    }

    async fn exists_by_email(&self, email: &Email) -> DomainResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.email() == email))
    }
}
