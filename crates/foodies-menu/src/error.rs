//! Menu feed errors.

use thiserror::Error;

/// Errors from fetching or reading the menu feed.
#[derive(Debug, Error)]
pub enum MenuError {
    /// The request could not be sent or the body could not be read.
    #[error("Menu feed request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The feed answered with a non-success status.
    #[error("Menu feed returned HTTP {status}")]
    Status { status: u16 },

    /// The body is not a restaurant document.
    #[error("Menu feed document is malformed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(String),

    #[error("Item '{item}' not found on the menu of {restaurant}")]
    ItemNotFound { restaurant: String, item: String },

    /// Feed settings that cannot be used.
    #[error("Invalid menu configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for menu operations.
pub type MenuResult<T> = Result<T, MenuError>;
