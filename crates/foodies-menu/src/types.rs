//! # Feed Document
//!
//! ```text
//! {
//!   "restaurants": [
//!     {
//!       "id": 1,                       ── number or string
//!       "name": "Triple XXX",
//!       "cuisine": "Diner",
//!       "image": "https://...",
//!       "menu": {
//!         "items": [ { "id": 11, "name": "...", "price": 9.5, ... } ]
//!       }
//!     }
//!   ]
//! }
//! ```
//!
//! Every field except `id` and `name` may be missing; missing collections
//! read as empty.

use foodies_core::types::id_from_string_or_number;
use foodies_core::MenuItem;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{MenuError, MenuResult};

/// The whole feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuDocument {
    #[serde(default)]
    pub restaurants: Vec<Restaurant>,
}

/// One restaurant and its menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Restaurant {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub cuisine: String,

    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub menu: Menu,
}

/// A restaurant's menu.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Menu {
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

impl MenuDocument {
    /// Parses a feed body.
    pub fn from_json(body: &str) -> MenuResult<Self> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn restaurant_by_id(&self, id: &str) -> Option<&Restaurant> {
        self.restaurants.iter().find(|r| r.id == id)
    }

    /// Case-insensitive name match.
    pub fn restaurant_by_name(&self, name: &str) -> Option<&Restaurant> {
        let name = name.trim();
        self.restaurants
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name))
    }

    /// Looks a restaurant up by id, then by name.
    pub fn find_restaurant(&self, key: &str) -> MenuResult<&Restaurant> {
        self.restaurant_by_id(key.trim())
            .or_else(|| self.restaurant_by_name(key))
            .ok_or_else(|| MenuError::RestaurantNotFound(key.to_string()))
    }

    /// Total number of items across all menus.
    pub fn item_count(&self) -> usize {
        self.restaurants.iter().map(|r| r.menu.items.len()).sum()
    }
}

impl Restaurant {
    /// Looks an item up by id, then by case-insensitive name.
    pub fn find_item(&self, key: &str) -> MenuResult<&MenuItem> {
        let key = key.trim();
        self.menu
            .items
            .iter()
            .find(|i| i.id == key)
            .or_else(|| {
                self.menu
                    .items
                    .iter()
                    .find(|i| i.name.eq_ignore_ascii_case(key))
            })
            .ok_or_else(|| MenuError::ItemNotFound {
                restaurant: self.name.clone(),
                item: key.to_string(),
            })
    }
}
