//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;

/// Boxed infrastructure failure carried through the domain unchanged.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Malformed input rejected by a value object or use case
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Entity already exists (uniqueness violation)
    #[error("{0} already exists")]
    Conflict(String),

    /// Failure raised by a repository adapter (storage unavailable, etc.)
    #[error("Repository error: {0}")]
    Repository(#[source] BoxError),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>) -> Self {
        DomainError::NotFound(entity.into())
    }

    /// Create a conflict error
    pub fn conflict(entity: impl Into<String>) -> Self {
        DomainError::Conflict(entity.into())
    }

    /// Wrap an adapter failure without altering it
    pub fn repository<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        DomainError::Repository(Box::new(err))
    }

    /// Whether this is a client-side error (validation, conflict, not found)
    pub fn is_client_error(&self) -> bool {
        !matches!(self, DomainError::Repository(_))
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("connection refused")]
    struct StorageDown;

    #[test]
    fn test_conflict_message() {
        let err = DomainError::conflict("User with email 'a@b.com'");
        assert_eq!(err.to_string(), "User with email 'a@b.com' already exists");
    }

    #[test]
    fn test_repository_error_keeps_source() {
        let err = DomainError::repository(StorageDown);
        assert!(!err.is_client_error());

        let source = std::error::Error::source(&err).unwrap();
        assert!(source.downcast_ref::<StorageDown>().is_some());
    }

    #[test]
    fn test_client_errors() {
        assert!(DomainError::validation("bad").is_client_error());
        assert!(DomainError::not_found("User").is_client_error());
        assert!(DomainError::conflict("User").is_client_error());
    }
}
