//! # Feed Client
//!
//! One GET, no retries. The caller decides whether to try again.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{MenuError, MenuResult};
use crate::types::MenuDocument;

// =============================================================================
// Settings
// =============================================================================

/// Where the feed lives and how long to wait for it.
///
/// ```toml
/// [menu]
/// feed_url = "https://dummyjson.com/c/2d83-4f1d-4625-a81f"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSettings {
    #[serde(default = "default_feed_url")]
    pub feed_url: String,

    /// Whole-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_feed_url() -> String {
    "https://dummyjson.com/c/2d83-4f1d-4625-a81f".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for MenuSettings {
    fn default() -> Self {
        MenuSettings {
            feed_url: default_feed_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl MenuSettings {
    /// Validates the settings.
    pub fn validate(&self) -> MenuResult<()> {
        if !self.feed_url.starts_with("http://") && !self.feed_url.starts_with("https://") {
            return Err(MenuError::InvalidConfig(format!(
                "feed_url must start with http:// or https://, got: {}",
                self.feed_url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(MenuError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Client
// =============================================================================

/// HTTP client for the menu feed.
#[derive(Debug, Clone)]
pub struct MenuClient {
    client: reqwest::Client,
    feed_url: String,
}

impl MenuClient {
    /// Builds a client from validated settings.
    pub fn new(settings: &MenuSettings) -> MenuResult<Self> {
        settings.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(MenuClient {
            client,
            feed_url: settings.feed_url.clone(),
        })
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    /// Fetches and parses the feed document.
    pub async fn fetch(&self) -> MenuResult<MenuDocument> {
        debug!(url = %self.feed_url, "Fetching menu feed");

        let response = self.client.get(&self.feed_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.feed_url, status = status.as_u16(), "Menu feed request rejected");
            return Err(MenuError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let document = MenuDocument::from_json(&body)?;

        info!(
            restaurants = document.restaurants.len(),
            items = document.item_count(),
            "Menu feed loaded"
        );
        Ok(document)
    }
}
