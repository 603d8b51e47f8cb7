//! Email value object.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{EMAIL_PATTERN, MAX_EMAIL_LENGTH};
use crate::error::{DomainError, DomainResult};

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// Validated email address.
///
/// DDD: Value object - immutable, compared by its trimmed value.
/// Case is preserved as given; uniqueness is therefore case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validate and normalize a raw email address.
    ///
    /// # Errors
    /// Returns a validation error if the address is blank, too long,
    /// or does not look like `local@domain.tld`.
    pub fn new(raw: &str) -> DomainResult<Self> {
        let value = raw.trim();

        if value.is_empty() {
            return Err(DomainError::validation("Email cannot be blank"));
        }
        if value.chars().count() > MAX_EMAIL_LENGTH {
            return Err(DomainError::validation(format!(
                "Email cannot exceed {} characters",
                MAX_EMAIL_LENGTH
            )));
        }
        if !EMAIL_REGEX.is_match(value) {
            return Err(DomainError::validation(format!("Invalid email format: {}", value)));
        }

        Ok(Self(value.to_string()))
    }

    /// Get the normalized address.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the normalized address.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Email {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Email::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_trims_whitespace() {
        let email = Email::new(" a@b.com ").unwrap();
        assert_eq!(email.as_str(), "a@b.com");
    }

    #[test]
    fn test_email_preserves_case() {
        let email = Email::new("John.Doe@Example.COM").unwrap();
        assert_eq!(email.as_str(), "John.Doe@Example.COM");
        assert_ne!(email, Email::new("john.doe@example.com").unwrap());
    }

    #[test]
    fn test_email_equality_uses_normalized_value() {
        assert_eq!(Email::new("a@b.com").unwrap(), Email::new("  a@b.com\t").unwrap());
    }

    #[test]
    fn test_email_rejects_malformed() {
        for raw in [
            "not-an-email",
            "",
            "   ",
            "a@b",
            "@b.com",
            "a@.com",
            "a b@c.com",
            "a@b.com@c.org",
            "a@.b.com",
            "a@b.com.",
            "a@b..com",
        ] {
            assert!(
                matches!(Email::new(raw), Err(DomainError::Validation(_))),
                "expected {:?} to be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_email_accepts_subdomains() {
        assert!(Email::new("ops@mail.example.co.uk").is_ok());
    }

    #[test]
    fn test_email_rejects_too_long() {
        let raw = format!("{}@example.com", "a".repeat(MAX_EMAIL_LENGTH));
        assert!(matches!(Email::new(&raw), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_email_display() {
        let email = Email::new("user@example.org").unwrap();
        assert_eq!(email.to_string(), "user@example.org");
    }
}
