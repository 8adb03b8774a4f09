//! # Error Types
//!
//! Domain-specific error types for foodies-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  foodies-core errors (this file)                                       │
//! │  ├── CoreError        - Account rule violations                        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  foodies-store errors (separate crate)                                 │
//! │  ├── StorageError     - Substrate failures (always absorbed)           │
//! │  └── StoreError       - What store operations return                   │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the user sees                             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → CliError → Terminal  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart operations never fail, so there is no cart variant here.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Account rule violations.
///
/// Every variant is raised before anything is mutated, so a caller that
/// receives one can assume the store is exactly as it was.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Another account already uses this normalized email.
    ///
    /// ## When This Occurs
    /// - Registering `" a@x.com "` after `"A@X.com"`
    /// - Changing a profile email to one held by a different account
    /// - Any account other than the reserved admin using `"admin"`
    #[error("An account with that email already exists: {0}")]
    DuplicateEmail(String),

    /// Login attempted for an email nobody registered.
    #[error("No account found for that email: {0}")]
    AccountNotFound(String),

    /// Login attempted with the wrong password.
    #[error("Incorrect password")]
    IncorrectPassword,

    /// A non-admin (or nobody) called an admin-only operation.
    #[error("Admin only")]
    AdminOnly,

    /// An operation needs a logged-in session and there is none.
    #[error("Not logged in")]
    NotLoggedIn,

    /// `delete_user` called with a blank id.
    #[error("Missing user id")]
    MissingUserId,

    /// The reserved administrator account cannot be removed.
    #[error("Cannot delete admin")]
    CannotDeleteAdmin,

    /// No account carries the given id.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when form input doesn't meet requirements.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::DuplicateEmail("a@x.com".to_string());
        assert_eq!(
            err.to_string(),
            "An account with that email already exists: a@x.com"
        );
        assert_eq!(CoreError::AdminOnly.to_string(), "Admin only");
        assert_eq!(
            CoreError::CannotDeleteAdmin.to_string(),
            "Cannot delete admin"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email is required");

        let err = ValidationError::TooLong {
            field: "firstName".to_string(),
            max: 100,
        };
        assert_eq!(err.to_string(), "firstName must be at most 100 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "password".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
