//! # Validation Module
//!
//! Input normalization and validation for account forms.
//!
//! ## Email Identity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Display form (what the user typed, trimmed)    "  Ann@Example.COM "    │
//! │                                │                                         │
//! │                                ▼ trim                                    │
//! │  Account.email                                  "Ann@Example.COM"       │
//! │                                │                                         │
//! │                                ▼ lowercase                               │
//! │  Account.email_norm (unique key)                "ann@example.com"       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Email comparison is case-insensitive and whitespace-insensitive; password
//! comparison is exact. No format check is applied to emails because the
//! reserved admin logs in as plain `admin`.

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of an email address (RFC 5321).
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length of a first or last name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Returns the canonical form of an email: trimmed and lowercased.
///
/// ## Example
/// ```rust
/// use foodies_core::validation::normalize_email;
///
/// assert_eq!(normalize_email(" A@X.com "), "a@x.com");
/// assert_eq!(normalize_email("ADMIN"), "admin");
/// ```
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validates an email field and returns its trimmed display form.
///
/// ## Rules
/// - Must not be blank
/// - At most 254 characters after trimming
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_EMAIL_LENGTH,
        });
    }

    Ok(email.to_string())
}

/// Validates a password at registration.
///
/// The password is not trimmed: surrounding spaces are part of it. It only
/// has to contain something other than whitespace.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }
    Ok(())
}

/// Validates an optional name field and returns its trimmed form.
pub fn validate_name(field: &str, name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(name.to_string())
}
