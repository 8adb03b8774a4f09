//! # foodies-core: Pure Domain Logic for Purdue Foodies
//!
//! This crate holds the storefront's domain rules as plain data and pure
//! functions. Nothing here reads storage, talks to the network, or hashes
//! passwords; `foodies-store` wraps these types with persistence.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Purdue Foodies Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Presentation (CLI / UI)                      │   │
//! │  │    Restaurant grid ──► Menu ──► Cart drawer ──► Account pages   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    foodies-store                                │   │
//! │  │    CartStore, UserStore (persist + notify)                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ foodies-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   cart    │  │  account  │  │ validation│  │   │
//! │  │   │ MenuItem  │  │   Cart    │  │  Account  │  │  emails   │  │   │
//! │  │   │   Role    │  │ CartLine  │  │ UserList  │  │  fields   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Feed item and account-facing value types
//! - [`cart`] - Cart mapping and line math
//! - [`account`] - Accounts and the user collection
//! - [`money`] - Integer-cent money for subtotals
//! - [`error`] - Domain error types
//! - [`validation`] - Email normalization and field checks
//!
//! ## Example Usage
//!
//! ```rust
//! use foodies_core::{Cart, MenuItem};
//!
//! let pizza = MenuItem::new("m1", "Margherita Pizza", 12.5);
//! let mut cart = Cart::new();
//! cart.add(&pizza);
//! cart.add(&pizza);
//!
//! assert_eq!(cart.total_quantity(), 2);
//! assert_eq!(cart.subtotal().to_string(), "$25.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod account;
pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use account::{Account, PublicAccount, UserCollection};
pub use cart::{Cart, CartLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Id of the reserved administrator account.
///
/// The id is stable so the account can be protected from deletion no matter
/// what its email is later changed to.
pub const ADMIN_USER_ID: &str = "admin";

/// Normalized login identity of the reserved administrator.
pub const ADMIN_EMAIL_NORM: &str = "admin";

/// Bootstrap password for the reserved administrator (demo credential).
pub const DEFAULT_ADMIN_PASSWORD: &str = "adminpassword";
