//! # CLI Error Type
//!
//! Unified error type for command handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the CLI                                │
//! │                                                                         │
//! │  Command handler  ──► Result<String, CliError>                          │
//! │         │                                                               │
//! │         ├── StoreError (CoreError / Hashing) ──┐                        │
//! │         ├── MenuError (request / decode) ──────┼──► CliError            │
//! │         └── ConfigError (file / toml) ─────────┘        │               │
//! │                                                         ▼               │
//! │                                    stderr: "error: [NOT_FOUND] ..."     │
//! │                                    exit code from ErrorCode             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::path::PathBuf;

use foodies_core::CoreError;
use foodies_menu::MenuError;
use foodies_store::StoreError;
use thiserror::Error;

// =============================================================================
// Config Error
// =============================================================================

/// Failures loading the application config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file {path} is not valid TOML: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// CLI Error
// =============================================================================

/// Error printed when a command fails.
#[derive(Debug, Clone)]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Account, restaurant, item or cart line not found
    NotFound,

    /// Input rejected (duplicate email, missing field, empty cart)
    ValidationError,

    /// Login failed or admin rights missing
    Unauthorized,

    /// Menu feed unreachable or malformed
    NetworkError,

    /// Config file or settings unusable
    ConfigError,

    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }

    /// Process exit status for this code.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorCode::ValidationError => 2,
            ErrorCode::NotFound => 3,
            ErrorCode::Unauthorized => 4,
            ErrorCode::NetworkError => 5,
            ErrorCode::ConfigError => 6,
            ErrorCode::Internal => 1,
        }
    }
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        CliError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }
}

/// Converts domain errors to CLI errors.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::DuplicateEmail(_) | CoreError::Validation(_) => ErrorCode::ValidationError,
            CoreError::MissingUserId => ErrorCode::ValidationError,
            CoreError::IncorrectPassword | CoreError::AdminOnly | CoreError::NotLoggedIn => {
                ErrorCode::Unauthorized
            }
            CoreError::AccountNotFound(_)
            | CoreError::UserNotFound(_)
            | CoreError::CannotDeleteAdmin => ErrorCode::NotFound,
        };
        CliError::new(code, err.to_string())
    }
}

/// Converts store errors to CLI errors.
impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Core(e) => e.into(),
            StoreError::Hashing(e) => {
                // Log the detail, show a generic message
                tracing::error!("Password hashing failed: {}", e);
                CliError::internal("Could not process the password")
            }
            StoreError::InvalidConfig(e) => CliError::new(ErrorCode::ConfigError, e),
        }
    }
}

/// Converts menu feed errors to CLI errors.
impl From<MenuError> for CliError {
    fn from(err: MenuError) -> Self {
        match err {
            MenuError::RestaurantNotFound(key) => CliError::not_found("Restaurant", &key),
            MenuError::ItemNotFound { restaurant, item } => {
                CliError::not_found("Menu item", &format!("{} at {}", item, restaurant))
            }
            MenuError::InvalidConfig(e) => CliError::new(ErrorCode::ConfigError, e),
            e @ (MenuError::Request(_) | MenuError::Status { .. } | MenuError::Decode(_)) => {
                CliError::new(ErrorCode::NetworkError, e.to_string())
            }
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for command handlers.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_codes() {
        let cases = [
            (CoreError::DuplicateEmail("a@x.com".into()), ErrorCode::ValidationError),
            (CoreError::AdminOnly, ErrorCode::Unauthorized),
            (CoreError::IncorrectPassword, ErrorCode::Unauthorized),
            (CoreError::CannotDeleteAdmin, ErrorCode::NotFound),
            (CoreError::UserNotFound("x".into()), ErrorCode::NotFound),
        ];
        for (err, code) in cases {
            assert_eq!(CliError::from(err).code, code);
        }
    }

    #[test]
    fn test_store_error_keeps_message() {
        let err = CliError::from(StoreError::Core(CoreError::AdminOnly));
        assert_eq!(err.to_string(), "[UNAUTHORIZED] Admin only");

        let err = CliError::from(StoreError::Hashing("join error".into()));
        assert_eq!(err.code, ErrorCode::Internal);
        assert!(!err.message.contains("join error"));
    }

    #[test]
    fn test_menu_error_codes() {
        let err = CliError::from(MenuError::Status { status: 503 });
        assert_eq!(err.code, ErrorCode::NetworkError);

        let err = CliError::from(MenuError::RestaurantNotFound("42".into()));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Restaurant not found: 42");
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            ErrorCode::NotFound,
            ErrorCode::ValidationError,
            ErrorCode::Unauthorized,
            ErrorCode::NetworkError,
            ErrorCode::ConfigError,
            ErrorCode::Internal,
        ];
        let mut exits: Vec<i32> = codes.iter().map(ErrorCode::exit_code).collect();
        exits.sort_unstable();
        exits.dedup();
        assert_eq!(exits.len(), codes.len());
    }
}
