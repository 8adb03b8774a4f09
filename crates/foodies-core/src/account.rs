//! # Accounts
//!
//! Account records and the user collection that enforces email uniqueness.
//!
//! ## Dual-Key Identity
//! Every account has:
//! - `id`: opaque, immutable (UUID v4, or `"admin"` for the reserved account)
//! - `email_norm`: the login identity, unique across the collection, may
//!   change through a profile update

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::Role;
use crate::{ADMIN_EMAIL_NORM, ADMIN_USER_ID};

// =============================================================================
// Account
// =============================================================================

/// A registered account as it is persisted.
///
/// `password_hash` is a one-way digest; cleartext never lands here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Display form, trimmed.
    pub email: String,
    /// Canonical form, trimmed and lowercased.
    pub email_norm: String,
    pub password_hash: String,
    #[serde(default)]
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Builds the reserved administrator record.
    pub fn bootstrap_admin(password_hash: String, created_at: DateTime<Utc>) -> Self {
        Account {
            id: ADMIN_USER_ID.to_string(),
            first_name: "Admin".to_string(),
            last_name: String::new(),
            email: ADMIN_EMAIL_NORM.to_string(),
            email_norm: ADMIN_EMAIL_NORM.to_string(),
            password_hash,
            role: Role::Admin,
            created_at,
        }
    }

    /// True for the admin role or the reserved admin identity.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin || self.email_norm == ADMIN_EMAIL_NORM || self.is_reserved_admin()
    }

    /// True only for the undeletable bootstrap account.
    pub fn is_reserved_admin(&self) -> bool {
        self.id == ADMIN_USER_ID
    }

    /// Returns the account without its password hash.
    pub fn to_public(&self) -> PublicAccount {
        PublicAccount {
            id: self.id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            email_norm: self.email_norm.clone(),
            role: self.role,
            created_at: self.created_at,
        }
    }
}

/// An account as handed to callers: everything except the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PublicAccount {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub email_norm: String,
    pub role: Role,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl PublicAccount {
    /// First and last name joined, trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

// =============================================================================
// User Collection
// =============================================================================

/// All registered accounts.
///
/// ## Invariants
/// - `email_norm` is unique across the collection
/// - Persisted as a plain JSON array of accounts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserCollection {
    accounts: Vec<Account>,
}

impl UserCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        UserCollection::default()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.id == id)
    }

    /// Looks up an account by normalized email.
    pub fn find_by_email(&self, email_norm: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.email_norm == email_norm)
    }

    /// Checks whether `email_norm` belongs to an account other than
    /// `except_id`.
    ///
    /// The admin login identity is reserved: it counts as taken for every
    /// account except the reserved administrator, present or not.
    pub fn is_email_taken(&self, email_norm: &str, except_id: Option<&str>) -> bool {
        if email_norm == ADMIN_EMAIL_NORM && except_id != Some(ADMIN_USER_ID) {
            return true;
        }
        self.accounts
            .iter()
            .any(|a| a.email_norm == email_norm && Some(a.id.as_str()) != except_id)
    }

    /// Checks whether the reserved administrator is present, by id or by
    /// its login identity.
    pub fn has_admin(&self) -> bool {
        self.accounts
            .iter()
            .any(|a| a.is_reserved_admin() || a.email_norm == ADMIN_EMAIL_NORM)
    }

    /// Appends an account, enforcing email uniqueness and the reserved
    /// admin identity.
    pub fn insert(&mut self, account: Account) -> CoreResult<()> {
        let reserved_for = account.is_reserved_admin().then_some(ADMIN_USER_ID);
        if self.is_email_taken(&account.email_norm, reserved_for)
            || (reserved_for.is_some() && self.find_by_id(ADMIN_USER_ID).is_some())
        {
            return Err(CoreError::DuplicateEmail(account.email_norm));
        }
        self.accounts.push(account);
        Ok(())
    }

    /// Removes and returns the account with `id`.
    pub fn remove(&mut self, id: &str) -> Option<Account> {
        let pos = self.accounts.iter().position(|a| a.id == id)?;
        Some(self.accounts.remove(pos))
    }

    /// Returns every account with the password hash stripped.
    pub fn public_accounts(&self) -> Vec<PublicAccount> {
        self.accounts.iter().map(Account::to_public).collect()
    }
}
