//! # Store Error Types
//!
//! Error types for the substrate and the stores.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Substrate failure (io / serde / quota)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageError ──► adapter logs at warn, returns fallback / drops write │
//! │                   (never reaches a store caller)                        │
//! │                                                                         │
//! │  CoreError (rule violation)   Hashing failure    Bad config            │
//! │       │                            │                │                   │
//! │       └──────────┬─────────────────┴────────────────┘                   │
//! │                  ▼                                                      │
//! │             StoreError ──► CliError (in app)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use foodies_core::CoreError;
use thiserror::Error;

/// Substrate read/write failures.
///
/// Only the adapter in [`crate::storage`] ever sees these.
#[derive(Debug, Error)]
pub enum StorageError {
    /// File system error from a file-backed substrate.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored value could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The substrate refused the write.
    ///
    /// ## When This Occurs
    /// - Quota exhausted
    /// - Storage disabled by the host
    #[error("Write rejected for key '{key}': {reason}")]
    WriteRejected { key: String, reason: String },
}

/// Errors returned by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A domain rule rejected the operation before anything changed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The password digest could not be computed.
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    /// Store settings that cannot be used.
    #[error("Invalid store configuration: {0}")]
    InvalidConfig(String),
}

impl StoreError {
    /// Returns the domain error, if this is one.
    pub fn as_core(&self) -> Option<&CoreError> {
        match self {
            StoreError::Core(e) => Some(e),
            StoreError::Hashing(_) | StoreError::InvalidConfig(_) => None,
        }
    }
}

impl From<foodies_core::ValidationError> for StoreError {
    fn from(err: foodies_core::ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

/// Result type for substrate operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use foodies_core::ValidationError;

    #[test]
    fn test_core_error_is_transparent() {
        let err: StoreError = CoreError::AdminOnly.into();
        assert_eq!(err.to_string(), "Admin only");
        assert!(matches!(err.as_core(), Some(CoreError::AdminOnly)));
    }

    #[test]
    fn test_validation_error_lifts_through_core() {
        let err: StoreError = ValidationError::Required {
            field: "email".to_string(),
        }
        .into();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::Validation(ValidationError::Required { .. }))
        ));
    }

    #[test]
    fn test_write_rejected_message() {
        let err = StorageError::WriteRejected {
            key: "users".to_string(),
            reason: "quota exceeded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Write rejected for key 'users': quota exceeded"
        );
    }
}
