//! # Stores
//!
//! The two independent stores. Neither knows about the other; each owns its
//! own storage handle and listener lists.
//!
//! - [`cart`] - Shopping cart keyed by menu item id
//! - [`user`] - Accounts, session pointer, admin bootstrap

pub mod cart;
pub mod user;

pub use cart::{CartStore, ItemAdded};
pub use user::{UserEvent, UserStore};
