//! # foodies-store: Persistent State Layer for Purdue Foodies
//!
//! Holds the cart and the account system in memory, writes every committed
//! change to a durable key-value substrate, and tells subscribers about it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Purdue Foodies Data Flow                           │
//! │                                                                         │
//! │  UI event (cart add / login / ...)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  foodies-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  CartStore    │    │  UserStore    │    │   notify     │  │   │
//! │  │   │  (store/cart) │    │  (store/user) │───►│  Listeners   │  │   │
//! │  │   └───────┬───────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │           │    load / save     │                               │   │
//! │  │           ▼                    ▼                               │   │
//! │  │   ┌─────────────────────────────────────┐   ┌──────────────┐  │   │
//! │  │   │  storage adapter (never fails out)  │   │  password    │  │   │
//! │  │   └─────────────────┬───────────────────┘   │  (Argon2id)  │  │   │
//! │  │                     │                       └──────────────┘  │   │
//! │  └─────────────────────┼───────────────────────────────────────────┘   │
//! │                        ▼                                                │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │      MemoryStorage (tests, one process)  |  FileStorage (CLI)   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`storage`] - Substrate trait, adapter, memory and file substrates
//! - [`store`] - `CartStore` and `UserStore`
//! - [`notify`] - Synchronous listener registry
//! - [`password`] - Argon2id digests on the blocking pool
//! - [`config`] - Record names, hashing cost, bootstrap credential
//! - [`error`] - Storage and store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use foodies_store::{CartStore, FileStorage, StoreConfig, UserStore};
//!
//! let config = StoreConfig::default();
//! let storage = FileStorage::open("./data")?;
//!
//! let mut cart = CartStore::open(storage.clone(), &config.keys.cart);
//! let mut users = UserStore::open(storage, &config)?;
//!
//! users.login(Credentials::new("admin", "adminpassword")).await?;
//! cart.add_to_cart(&item);
//! ```
//!
//! ## Consistency
//! Each store instance keeps its own in-memory copy, seeded when it opens.
//! Writes from another instance on the same substrate are only seen after
//! `reload()`. The last instance to write a record wins.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod notify;
pub mod password;
pub mod storage;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{HashingConfig, StorageKeys, StoreConfig};
pub use error::{StorageError, StoreError, StoreResult};
pub use notify::{Listeners, Subscription};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{CartStore, ItemAdded, UserEvent, UserStore};
