//! # Store Configuration
//!
//! Record names and credential settings shared by both stores.
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! admin_password = "adminpassword"
//!
//! [store.keys]
//! cart = "purdueFoodiesCart:v1"
//! users = "users"
//! session = "currentUserId"
//!
//! [store.hashing]
//! memory_kib = 19456
//! iterations = 2
//! parallelism = 1
//! ```
//!
//! The `[store]` table is embedded in the application's config file; this
//! crate only defines its shape and defaults.

use foodies_core::DEFAULT_ADMIN_PASSWORD;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Storage Keys
// =============================================================================

/// Names of the persisted records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageKeys {
    /// Cart record. Versioned so a shape change can move to a new key.
    #[serde(default = "default_cart_key")]
    pub cart: String,

    /// Account collection record.
    #[serde(default = "default_users_key")]
    pub users: String,

    /// Session pointer (a raw account id, not JSON).
    #[serde(default = "default_session_key")]
    pub session: String,
}

fn default_cart_key() -> String {
    "purdueFoodiesCart:v1".to_string()
}

fn default_users_key() -> String {
    "users".to_string()
}

fn default_session_key() -> String {
    "currentUserId".to_string()
}

impl Default for StorageKeys {
    fn default() -> Self {
        StorageKeys {
            cart: default_cart_key(),
            users: default_users_key(),
            session: default_session_key(),
        }
    }
}

// =============================================================================
// Hashing
// =============================================================================

/// Argon2id cost parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashingConfig {
    /// Memory cost in KiB.
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,

    /// Number of passes.
    #[serde(default = "default_iterations")]
    pub iterations: u32,

    /// Degree of parallelism (lanes).
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

fn default_memory_kib() -> u32 {
    19456
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}

impl Default for HashingConfig {
    fn default() -> Self {
        HashingConfig {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

impl HashingConfig {
    /// Smallest cost Argon2 accepts. For tests only.
    pub fn fast() -> Self {
        HashingConfig {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        }
    }
}

// =============================================================================
// Store Configuration
// =============================================================================

/// Settings for [`crate::CartStore`] and [`crate::UserStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub keys: StorageKeys,

    #[serde(default)]
    pub hashing: HashingConfig,

    /// Bootstrap password for the reserved administrator.
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
}

fn default_admin_password() -> String {
    DEFAULT_ADMIN_PASSWORD.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            keys: StorageKeys::default(),
            hashing: HashingConfig::default(),
            admin_password: default_admin_password(),
        }
    }
}

impl StoreConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        let keys = [
            ("cart", &self.keys.cart),
            ("users", &self.keys.users),
            ("session", &self.keys.session),
        ];
        for (name, key) in keys {
            if key.trim().is_empty() {
                return Err(StoreError::InvalidConfig(format!(
                    "keys.{} must not be empty",
                    name
                )));
            }
        }

        if self.keys.cart == self.keys.users
            || self.keys.cart == self.keys.session
            || self.keys.users == self.keys.session
        {
            return Err(StoreError::InvalidConfig(
                "keys.cart, keys.users and keys.session must differ".into(),
            ));
        }

        if self.admin_password.trim().is_empty() {
            return Err(StoreError::InvalidConfig(
                "admin_password must not be empty".into(),
            ));
        }

        // Params::new enforces Argon2's own bounds
        crate::password::PasswordDigest::new(&self.hashing)?;

        Ok(())
    }

    /// Default settings with cheap hashing, for tests.
    pub fn for_tests() -> Self {
        StoreConfig {
            hashing: HashingConfig::fast(),
            ..StoreConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.keys.cart, "purdueFoodiesCart:v1");
        assert_eq!(config.keys.users, "users");
        assert_eq!(config.keys.session, "currentUserId");
        assert_eq!(config.admin_password, "adminpassword");
        assert_eq!(config.hashing.memory_kib, 19456);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: StoreConfig = toml_like(
            r#"{"keys": {"cart": "cart:v2"}, "hashing": {"iterations": 3}}"#,
        );
        assert_eq!(config.keys.cart, "cart:v2");
        assert_eq!(config.keys.users, "users");
        assert_eq!(config.hashing.iterations, 3);
        assert_eq!(config.hashing.parallelism, 1);
    }

    #[test]
    fn test_config_validation() {
        let mut config = StoreConfig::for_tests();
        assert!(config.validate().is_ok());

        config.keys.session = "users".to_string();
        assert!(config.validate().is_err());

        config.keys.session = " ".to_string();
        assert!(config.validate().is_err());

        config.keys.session = "currentUserId".to_string();
        config.hashing.iterations = 0;
        assert!(matches!(
            config.validate(),
            Err(StoreError::InvalidConfig(_))
        ));

        config.hashing.iterations = 1;
        config.admin_password = String::new();
        assert!(config.validate().is_err());
    }

    // The app parses TOML; serde_json exercises the same derive here.
    fn toml_like(json: &str) -> StoreConfig {
        serde_json::from_str(json).unwrap()
    }
}
