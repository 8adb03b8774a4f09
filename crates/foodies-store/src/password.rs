//! # Password Digests
//!
//! Argon2id PHC strings with a fresh random salt per digest.
//!
//! ```text
//! $argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>
//!            │          │             │
//!            │          │             └── verification recomputes with this salt
//!            │          └── cost parameters travel with the digest
//!            └── algorithm version
//! ```
//!
//! Both operations are CPU-bound and run on tokio's blocking pool. They are
//! the only points where a store operation suspends.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use tracing::warn;

use crate::config::HashingConfig;
use crate::error::{StoreError, StoreResult};

/// Computes and checks password digests with fixed cost parameters.
#[derive(Debug, Clone)]
pub struct PasswordDigest {
    params: Params,
}

impl PasswordDigest {
    /// Builds a digest with the configured Argon2 cost.
    pub fn new(config: &HashingConfig) -> StoreResult<Self> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| StoreError::InvalidConfig(format!("Invalid Argon2 parameters: {}", e)))?;
        Ok(PasswordDigest { params })
    }

    /// Hashes `password` with a new salt.
    pub async fn hash(&self, password: &str) -> StoreResult<String> {
        let params = self.params.clone();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| StoreError::Hashing(e.to_string()))
        })
        .await
        .map_err(|e| StoreError::Hashing(format!("Hashing task failed: {}", e)))?
    }

    /// Checks `password` against a stored digest.
    ///
    /// A stored value that is not a PHC string never matches.
    pub async fn verify(&self, password: &str, stored: &str) -> StoreResult<bool> {
        let password = password.to_string();
        let stored = stored.to_string();

        tokio::task::spawn_blocking(move || {
            let parsed = match PasswordHash::new(&stored) {
                Ok(h) => h,
                Err(e) => {
                    warn!(error = %e, "Stored password digest is malformed");
                    return false;
                }
            };
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .await
        .map_err(|e| StoreError::Hashing(format!("Verification task failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest() -> PasswordDigest {
        PasswordDigest::new(&HashingConfig::fast()).unwrap()
    }

    #[tokio::test]
    async fn test_hash_and_verify() {
        let digest = digest();
        let hash = digest.hash("hunter2").await.unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("hunter2"));
        assert!(digest.verify("hunter2", &hash).await.unwrap());
        assert!(!digest.verify("Hunter2", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_salts_differ() {
        let digest = digest();
        let a = digest.hash("same").await.unwrap();
        let b = digest.hash("same").await.unwrap();
        assert_ne!(a, b);
        assert!(digest.verify("same", &a).await.unwrap());
        assert!(digest.verify("same", &b).await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_digest_never_matches() {
        assert!(!digest().verify("x", "plaintext").await.unwrap());
    }

    #[test]
    fn test_rejects_unusable_params() {
        let config = HashingConfig {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        };
        assert!(matches!(
            PasswordDigest::new(&config),
            Err(StoreError::InvalidConfig(_))
        ));
    }
}
