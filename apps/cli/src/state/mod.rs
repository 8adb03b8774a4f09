//! # State Module
//!
//! Builds the stores once at startup and hands them to command handlers.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  AppConfig ──► data_dir ──► FileStorage ──┬──► CartStore  (keys.cart)   │
//! │                                           │                             │
//! │                                           └──► UserStore  (keys.users,  │
//! │                                                            keys.session)│
//! │                                                                         │
//! │  MenuSettings ──► MenuClient (fetched only by commands that need it)    │
//! │                                                                         │
//! │  CartStore::on_item_added ──► notices ──► printed after the command     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both stores share one substrate handle. They never touch each other's keys.

mod config;

pub use config::{AppConfig, StorageSettings};

use std::sync::{Arc, Mutex, PoisonError};

use foodies_menu::MenuClient;
use foodies_store::{CartStore, Storage, UserStore};
use tracing::debug;

use crate::error::CliResult;

/// Everything a command can reach.
pub struct AppState<S: Storage + Clone> {
    pub cart: CartStore<S>,
    pub users: UserStore<S>,
    pub menu: MenuClient,
    notices: Arc<Mutex<Vec<String>>>,
}

impl<S: Storage + Clone> AppState<S> {
    /// Opens both stores over `storage` and makes sure the admin exists.
    pub async fn open(storage: S, config: &AppConfig) -> CliResult<Self> {
        let cart = CartStore::open(storage.clone(), config.store.keys.cart.clone());
        let mut users = UserStore::open(storage, &config.store)?;
        users.ensure_admin_user().await?;
        let menu = MenuClient::new(&config.menu)?;

        let notices = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&notices);
        // Lives as long as the store; never cancelled.
        let _toast = cart.on_item_added(move |added| {
            sink.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(format!("Added {} (x{})", added.item.name, added.quantity));
        });

        debug!(
            cart_lines = cart.cart().item_count(),
            logged_in = users.current_user().is_some(),
            "App state ready"
        );

        Ok(AppState {
            cart,
            users,
            menu,
            notices,
        })
    }

    /// Takes the toast messages queued since the last call.
    pub fn drain_notices(&self) -> Vec<String> {
        std::mem::take(&mut *self.notices.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use foodies_menu::MenuDocument;
    use foodies_store::{MemoryStorage, StoreConfig};

    use super::*;

    pub const FEED: &str = r#"{
        "restaurants": [
            {
                "id": 1,
                "name": "Triple XXX",
                "cuisine": "Diner",
                "menu": {
                    "items": [
                        {"id": 11, "name": "Chili Cheese Fries", "price": 7.25},
                        {"id": 12, "name": "Root Beer Float", "price": 4.5}
                    ]
                }
            },
            {"id": "pb", "name": "Pappy's Burgers", "cuisine": "Burgers"}
        ]
    }"#;

    pub fn feed() -> MenuDocument {
        MenuDocument::from_json(FEED).unwrap()
    }

    pub fn config() -> AppConfig {
        AppConfig {
            store: StoreConfig::for_tests(),
            ..AppConfig::default()
        }
    }

    pub async fn state() -> AppState<MemoryStorage> {
        AppState::open(MemoryStorage::new(), &config()).await.unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::testing;
    use foodies_core::{Credentials, MenuItem};

    #[tokio::test]
    async fn test_open_bootstraps_admin() {
        let mut state = testing::state().await;
        assert!(state.cart.cart().is_empty());
        assert!(state.users.current_user().is_none());

        state
            .users
            .login(Credentials::new("admin", "adminpassword"))
            .await
            .unwrap();
        assert!(state.users.is_admin());
    }

    #[tokio::test]
    async fn test_notices_collect_item_added() {
        let mut state = testing::state().await;
        let fries = MenuItem::new("11", "Chili Cheese Fries", 7.25);

        state.cart.add_to_cart(&fries);
        state.cart.add_to_cart(&fries);

        assert_eq!(
            state.drain_notices(),
            vec![
                "Added Chili Cheese Fries (x1)".to_string(),
                "Added Chili Cheese Fries (x2)".to_string(),
            ]
        );
        assert!(state.drain_notices().is_empty());
    }
}
