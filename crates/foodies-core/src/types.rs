//! # Domain Types
//!
//! Value types shared by the stores, the menu feed, and the UI layer.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    MenuItem     │   │   NewAccount    │   │  ProfileDraft   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (feed)      │   │  firstName      │   │  firstName      │       │
//! │  │  name, price    │   │  lastName       │   │  lastName       │       │
//! │  │  image, tags    │   │  email          │   │  email          │       │
//! │  └─────────────────┘   │  password       │   │  password (opt) │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │      Role       │   │   Credentials   │                             │
//! │  │  User | Admin   │   │  email,password │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Form types (`NewAccount`, `Credentials`, `ProfileDraft`) carry cleartext
//! passwords. They are deserialize-only on purpose: nothing in the crate can
//! write them back out.

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

// =============================================================================
// Menu Item
// =============================================================================

/// One dish from the menu feed.
///
/// The cart treats this as an opaque record keyed by `id`: a cart line holds
/// a copy taken when the item was first added, so later feed changes (price
/// included) do not reach lines already in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuItem {
    /// Feed identifier. The feed may send numbers; they are kept as text.
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,

    /// Display name.
    pub name: String,

    /// Short description shown under the name.
    #[serde(default)]
    pub description: String,

    /// Unit price in dollars, exactly as the feed sent it.
    #[serde(default)]
    pub price: f64,

    /// Image URL.
    #[serde(default)]
    pub image: String,

    /// Dietary / category tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl MenuItem {
    /// Builds an item with just the fields the cart needs.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        MenuItem {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            image: String::new(),
            tags: Vec::new(),
        }
    }

    /// Returns the unit price in cents.
    #[inline]
    pub fn unit_price(&self) -> crate::Money {
        crate::Money::from_price(self.price)
    }
}

// =============================================================================
// Role
// =============================================================================

/// Account role. Authorization is a single admin flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Registration form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Login form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Profile edit form.
///
/// A blank (or whitespace-only) `password` means "keep the current one".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl ProfileDraft {
    /// Returns the new password, or `None` when the field was left blank.
    pub fn new_password(&self) -> Option<&str> {
        if self.password.trim().is_empty() {
            None
        } else {
            Some(&self.password)
        }
    }
}

// =============================================================================
// Serde Helpers
// =============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
    Float(f64),
}

/// Accepts `"7"`, `7` or `7.0` and yields `"7"`.
///
/// Feed documents are hand-written JSON and use whichever form the author
/// felt like; every id in the system is text once it is parsed.
pub fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
        RawId::Float(f) => f.to_string(),
    })
}
