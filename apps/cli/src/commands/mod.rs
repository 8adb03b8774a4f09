//! # Command Handlers
//!
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── menu.rs     ◄─── Restaurant and menu listing
//! ├── cart.rs     ◄─── Cart manipulation and demo checkout
//! ├── account.rs  ◄─── Register, login, profile
//! └── admin.rs    ◄─── Account administration
//! ```
//!
//! Every handler borrows the state it needs and returns the text to print.
//! Handlers that need the feed take a fetched `MenuDocument`, so the network
//! is touched only by the caller.

pub mod account;
pub mod admin;
pub mod cart;
pub mod menu;
