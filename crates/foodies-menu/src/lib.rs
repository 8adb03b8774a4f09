//! # foodies-menu: Menu Feed Client
//!
//! Reads the static restaurant/menu document the storefront browses. The
//! stores never see this crate; the presentation layer picks a `MenuItem`
//! out of a [`MenuDocument`] and hands it to the cart.
//!
//! ```text
//! MenuClient::fetch() ──GET──► feed ──► MenuDocument
//!                                          │ find_restaurant("1")
//!                                          ▼
//!                                      Restaurant
//!                                          │ find_item("11")
//!                                          ▼
//!                                      MenuItem ──► CartStore::add_to_cart
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::{MenuClient, MenuSettings};
pub use error::{MenuError, MenuResult};
pub use types::{Menu, MenuDocument, Restaurant};
