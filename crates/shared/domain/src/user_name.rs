//! User name value object.

use crate::constants::MAX_NAME_LENGTH;
use crate::error::{DomainError, DomainResult};

/// A user's first and last name.
///
/// Both parts are non-blank and at most [`MAX_NAME_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName {
    first_name: String,
    last_name: String,
}

impl UserName {
    /// Validate and build a name.
    ///
    /// # Errors
    /// Returns a validation error if either part is blank or too long.
    pub fn new(first_name: &str, last_name: &str) -> DomainResult<Self> {
        validate_part("First name", first_name)?;
        validate_part("Last name", last_name)?;

        Ok(Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// "first last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

fn validate_part(label: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{} cannot be blank", label)));
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::validation(format!(
            "{} cannot exceed {} characters",
            label, MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

impl std::fmt::Display for UserName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let name = UserName::new("John", "Doe").unwrap();
        assert_eq!(name.full_name(), "John Doe");
        assert_eq!(name.first_name(), "John");
        assert_eq!(name.last_name(), "Doe");
    }

    #[test]
    fn test_blank_parts_rejected() {
        assert!(matches!(UserName::new("", "Doe"), Err(DomainError::Validation(_))));
        assert!(matches!(UserName::new("John", "   "), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_length_limit() {
        let max = "A".repeat(MAX_NAME_LENGTH);
        assert!(UserName::new(&max, "Doe").is_ok());

        let too_long = "A".repeat(MAX_NAME_LENGTH + 1);
        assert!(matches!(UserName::new(&too_long, "Doe"), Err(DomainError::Validation(_))));
        assert!(matches!(UserName::new("John", &too_long), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let accented = "é".repeat(MAX_NAME_LENGTH);
        assert!(UserName::new(&accented, "Doe").is_ok());
    }
}
