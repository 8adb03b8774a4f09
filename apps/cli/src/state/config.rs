//! # Application Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --data-dir ./tmp                                                   │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     FOODIES_DATA_DIR, FOODIES_FEED_URL, FOODIES_ADMIN_PASSWORD         │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/storefront/config.toml (Linux)                           │
//! │     ~/Library/Application Support/com.foodies.storefront/config.toml   │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [storage]
//! data_dir = "/var/lib/foodies"
//!
//! [store]
//! admin_password = "adminpassword"
//!
//! [store.keys]
//! cart = "purdueFoodiesCart:v1"
//!
//! [menu]
//! feed_url = "https://dummyjson.com/c/2d83-4f1d-4625-a81f"
//! timeout_secs = 10
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use foodies_menu::MenuSettings;
use foodies_store::StoreConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

/// Where the substrate files live.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Data directory. Defaults to the platform data dir when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub menu: MenuSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (config.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        self.store
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        self.menu
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if let Some(dir) = &self.storage.data_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("storage.data_dir must not be empty".into()));
            }
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("FOODIES_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data dir from environment");
            self.storage.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(url) = lookup("FOODIES_FEED_URL") {
            debug!(url = %url, "Overriding feed URL from environment");
            self.menu.feed_url = url;
        }

        // value is a credential; never logged
        if let Some(password) = lookup("FOODIES_ADMIN_PASSWORD") {
            self.store.admin_password = password;
        }
    }

    /// Returns the directory the substrate files go in.
    pub fn data_dir(&self) -> ConfigResult<PathBuf> {
        if let Some(dir) = &self.storage.data_dir {
            return Ok(dir.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| ConfigError::Invalid("Could not determine app data directory".into()))
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "foodies", "storefront")
}
