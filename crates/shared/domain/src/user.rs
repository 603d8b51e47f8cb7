//! User aggregate root.

use chrono::{DateTime, Utc};

use crate::email::Email;
use crate::error::{DomainError, DomainResult};
use crate::user_id::UserId;
use crate::user_name::UserName;

/// User aggregate root.
///
/// Immutable: every state transition returns a new `User` and leaves the
/// receiver untouched. `updated_at` never moves backwards and never precedes
/// `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: Email,
    name: UserName,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user with a generated id.
    pub fn create(email: Email, name: UserName) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::generate(),
            email,
            name,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a user from persisted state.
    ///
    /// # Errors
    /// Returns a validation error if `updated_at` precedes `created_at`.
    pub fn reconstitute(
        id: UserId,
        email: Email,
        name: UserName,
        active: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if updated_at < created_at {
            return Err(DomainError::validation(format!(
                "User {} was updated before it was created",
                id
            )));
        }

        Ok(Self {
            id,
            email,
            name,
            active,
            created_at,
            updated_at,
        })
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Return a copy with the name replaced.
    pub fn update_name(&self, name: UserName) -> Self {
        Self {
            name,
            updated_at: self.next_timestamp(),
            ..self.clone()
        }
    }

    /// Return a copy with the email replaced.
    pub fn update_email(&self, email: Email) -> Self {
        Self {
            email,
            updated_at: self.next_timestamp(),
            ..self.clone()
        }
    }

    /// Return an active copy.
    pub fn activate(&self) -> Self {
        Self {
            active: true,
            updated_at: self.next_timestamp(),
            ..self.clone()
        }
    }

    /// Return an inactive copy.
    pub fn deactivate(&self) -> Self {
        Self {
            active: false,
            updated_at: self.next_timestamp(),
            ..self.clone()
        }
    }

    // Clock skew must not break updated_at >= created_at.
    fn next_timestamp(&self) -> DateTime<Utc> {
        Utc::now().max(self.updated_at)
    }
}
