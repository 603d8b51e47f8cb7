//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Maximum length of a first or last name, in characters
pub const MAX_NAME_LENGTH: usize = 50;

/// Maximum length of an email address, in characters
pub const MAX_EMAIL_LENGTH: usize = 255;

/// Simple email grammar: local part, "@", two or more non-empty domain labels
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$";
