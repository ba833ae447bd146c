//! Shared validation utilities
//!
//! Field-level checks used by commands before anything touches the store.

use thiserror::Error;

/// Maximum length of a video title.
pub const MAX_TITLE_LEN: usize = 100;

/// Maximum length of a video description.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Errors that can occur validating a required text field
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextValidationError {
    #[error("{field} is required and cannot be empty")]
    Required { field: &'static str },

    #[error("{field} must not exceed {max_length} characters")]
    TooLong {
        field: &'static str,
        max_length: usize,
    },
}

/// Validate a required text field
///
/// The value must be non-empty after trimming and within `max_length`
/// characters.
pub fn validate_required_text(
    value: &str,
    field: &'static str,
    max_length: usize,
) -> Result<(), TextValidationError> {
    if value.trim().is_empty() {
        return Err(TextValidationError::Required { field });
    }

    if value.chars().count() > max_length {
        return Err(TextValidationError::TooLong { field, max_length });
    }

    Ok(())
}

/// Validate an optional text field against a length cap
pub fn validate_optional_text(
    value: Option<&str>,
    field: &'static str,
    max_length: usize,
) -> Result<(), TextValidationError> {
    if let Some(value) = value {
        if value.chars().count() > max_length {
            return Err(TextValidationError::TooLong { field, max_length });
        }
    }
    Ok(())
}

/// Minimal shape check for an email address: something before and after one
/// `@`, with a dot in the domain part.
pub fn validate_email(email: &str) -> Result<(), TextValidationError> {
    let valid = email
        .split_once('@')
        .map(|(local, domain)| {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        })
        .unwrap_or(false);

    if !valid {
        return Err(TextValidationError::Required { field: "A valid email" });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_accepts_valid() {
        assert!(validate_required_text("Intro to Rust", "Title", MAX_TITLE_LEN).is_ok());
    }

    #[test]
    fn test_required_text_rejects_empty() {
        assert_eq!(
            validate_required_text("   ", "Title", MAX_TITLE_LEN),
            Err(TextValidationError::Required { field: "Title" })
        );
    }

    #[test]
    fn test_required_text_rejects_too_long() {
        let long = "x".repeat(MAX_TITLE_LEN + 1);
        assert_eq!(
            validate_required_text(&long, "Title", MAX_TITLE_LEN),
            Err(TextValidationError::TooLong {
                field: "Title",
                max_length: MAX_TITLE_LEN
            })
        );
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(None, "Description", MAX_DESCRIPTION_LEN).is_ok());
        assert!(validate_optional_text(Some("short"), "Description", MAX_DESCRIPTION_LEN).is_ok());
        let long = "x".repeat(MAX_DESCRIPTION_LEN + 1);
        assert!(validate_optional_text(Some(&long), "Description", MAX_DESCRIPTION_LEN).is_err());
    }

    #[test]
    fn test_email_shape() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ada@nodot").is_err());
    }
}
