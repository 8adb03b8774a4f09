//! # User Store
//!
//! Registered accounts, the current session, and the reserved administrator.
//!
//! ## Operation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Every Account Operation                              │
//! │                                                                         │
//! │  1. ensure_admin_user()      (register / login only)                   │
//! │  2. validate input           ──► Err, nothing changed                  │
//! │  3. check rules              ──► Err, nothing changed                  │
//! │  4. await password digest    (the only suspension point)               │
//! │  5. mutate in memory                                                    │
//! │  6. save users / session                                                │
//! │  7. notify listeners                                                    │
//! │                                                                         │
//! │  Nothing is written before step 5, so a failure leaves the store       │
//! │  exactly as it was.                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persisted Records
//! | Key              | Value                                         |
//! |------------------|-----------------------------------------------|
//! | `users`          | JSON array of accounts (camelCase fields)     |
//! | `currentUserId`  | the account id as a raw string, or absent     |

use chrono::Utc;
use foodies_core::validation::{normalize_email, validate_email, validate_name, validate_password};
use foodies_core::{
    Account, CoreError, Credentials, NewAccount, ProfileDraft, PublicAccount, Role,
    UserCollection, ADMIN_USER_ID,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{StorageKeys, StoreConfig};
use crate::error::StoreResult;
use crate::notify::{Listeners, Subscription};
use crate::password::PasswordDigest;
use crate::storage::{self, Storage};

/// What changed in the user store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {
    /// The reserved administrator was created.
    AdminBootstrapped,
    /// A new account was created and logged in.
    Registered { id: String },
    LoggedIn { id: String },
    LoggedOut,
    ProfileUpdated { id: String },
    /// An account was removed by an administrator.
    Deleted { id: String },
    /// State was re-read from storage.
    Reloaded,
}

/// Accounts plus the session pointer, with persistence and subscribers.
pub struct UserStore<S: Storage> {
    storage: S,
    keys: StorageKeys,
    admin_password: String,
    digest: PasswordDigest,
    users: UserCollection,
    session: Option<String>,
    listeners: Listeners<UserEvent>,
}

impl<S: Storage> UserStore<S> {
    /// Opens the store, rehydrating accounts and the session pointer.
    ///
    /// A malformed account record yields an empty collection; the admin is
    /// bootstrapped again on the next register or login.
    pub fn open(storage: S, config: &StoreConfig) -> StoreResult<Self> {
        let digest = PasswordDigest::new(&config.hashing)?;
        let users: UserCollection = storage::load(&storage, &config.keys.users, UserCollection::new);
        let session = load_session(&storage, &config.keys.session);
        debug!(accounts = users.len(), logged_in = session.is_some(), "User store opened");

        Ok(UserStore {
            storage,
            keys: config.keys.clone(),
            admin_password: config.admin_password.clone(),
            digest,
            users,
            session,
            listeners: Listeners::new(),
        })
    }

    // =========================================================================
    // Bootstrap
    // =========================================================================

    /// Creates the reserved administrator if no admin identity exists.
    ///
    /// Returns whether an account was created. Later calls are no-ops.
    pub async fn ensure_admin_user(&mut self) -> StoreResult<bool> {
        if self.users.has_admin() {
            return Ok(false);
        }

        let password_hash = self.digest.hash(&self.admin_password).await?;
        self.users
            .insert(Account::bootstrap_admin(password_hash, Utc::now()))?;
        self.save_users();

        info!("Reserved admin account created");
        self.listeners.notify(&UserEvent::AdminBootstrapped);
        Ok(true)
    }

    // =========================================================================
    // Registration & Session
    // =========================================================================

    /// Registers an account and logs it in.
    ///
    /// ## Errors
    /// - `Validation` for a blank email or password, or an overlong field
    /// - `DuplicateEmail` when the normalized email is already registered
    pub async fn create_user(&mut self, form: NewAccount) -> StoreResult<PublicAccount> {
        self.ensure_admin_user().await?;

        let email = validate_email(&form.email)?;
        validate_password(&form.password)?;
        let first_name = validate_name("firstName", &form.first_name)?;
        let last_name = validate_name("lastName", &form.last_name)?;

        let email_norm = normalize_email(&email);
        if self.users.is_email_taken(&email_norm, None) {
            return Err(CoreError::DuplicateEmail(email_norm).into());
        }

        let password_hash = self.digest.hash(&form.password).await?;

        let account = Account {
            id: Uuid::new_v4().to_string(),
            first_name,
            last_name,
            email,
            email_norm,
            password_hash,
            role: Role::User,
            created_at: Utc::now(),
        };
        let public = account.to_public();
        self.users.insert(account)?;
        self.save_users();
        self.set_session(Some(public.id.clone()));

        info!(account_id = %public.id, "Account registered");
        self.listeners.notify(&UserEvent::Registered {
            id: public.id.clone(),
        });
        Ok(public)
    }

    /// Logs in with email and password.
    ///
    /// ## Errors
    /// - `AccountNotFound` when no account has that normalized email
    /// - `IncorrectPassword` when the digest does not match
    pub async fn login(&mut self, credentials: Credentials) -> StoreResult<PublicAccount> {
        self.ensure_admin_user().await?;

        let email_norm = normalize_email(&credentials.email);
        let Some(account) = self.users.find_by_email(&email_norm) else {
            debug!(email = %email_norm, "Login for unknown email");
            return Err(CoreError::AccountNotFound(email_norm).into());
        };
        let public = account.to_public();
        let stored_hash = account.password_hash.clone();

        if !self.digest.verify(&credentials.password, &stored_hash).await? {
            warn!(account_id = %public.id, "Login rejected, incorrect password");
            return Err(CoreError::IncorrectPassword.into());
        }

        self.set_session(Some(public.id.clone()));
        info!(account_id = %public.id, "Logged in");
        self.listeners.notify(&UserEvent::LoggedIn {
            id: public.id.clone(),
        });
        Ok(public)
    }

    /// Clears the session. Safe to call when nobody is logged in.
    pub fn log_out(&mut self) {
        let previous = self.session.take();
        storage::remove(&self.storage, &self.keys.session);

        debug!(account_id = ?previous, "Logged out");
        self.listeners.notify(&UserEvent::LoggedOut);
    }

    /// Resolves the session against the current accounts.
    ///
    /// Returns `None` when nobody is logged in or the session points at an
    /// account that no longer exists.
    pub fn current_user(&self) -> Option<PublicAccount> {
        self.current_account().map(Account::to_public)
    }

    /// True when the session resolves to an administrator.
    pub fn is_admin(&self) -> bool {
        self.current_account().is_some_and(Account::is_admin)
    }

    /// True when any account already uses this email (after normalizing).
    pub fn is_email_taken(&self, email: &str) -> bool {
        self.users.is_email_taken(&normalize_email(email), None)
    }

    // =========================================================================
    // Profile
    // =========================================================================

    /// Updates the logged-in account's names, email and (optionally)
    /// password.
    ///
    /// A blank password in the draft keeps the stored digest.
    ///
    /// ## Errors
    /// - `NotLoggedIn` without a live session
    /// - `Validation` for a blank email or an overlong field
    /// - `DuplicateEmail` when another account holds the new email
    pub async fn update_current_user_profile(
        &mut self,
        draft: ProfileDraft,
    ) -> StoreResult<PublicAccount> {
        let id = self
            .current_account()
            .map(|a| a.id.clone())
            .ok_or(CoreError::NotLoggedIn)?;

        let email = validate_email(&draft.email)?;
        let first_name = validate_name("firstName", &draft.first_name)?;
        let last_name = validate_name("lastName", &draft.last_name)?;

        let email_norm = normalize_email(&email);
        if self.users.is_email_taken(&email_norm, Some(&id)) {
            return Err(CoreError::DuplicateEmail(email_norm).into());
        }

        let password_hash = match draft.new_password() {
            Some(password) => Some(self.digest.hash(password).await?),
            None => None,
        };

        let account = self
            .users
            .find_by_id_mut(&id)
            .ok_or(CoreError::NotLoggedIn)?;
        account.first_name = first_name;
        account.last_name = last_name;
        account.email = email;
        account.email_norm = email_norm;
        if let Some(hash) = password_hash {
            account.password_hash = hash;
        }
        let public = account.to_public();
        self.save_users();

        info!(account_id = %id, "Profile updated");
        self.listeners.notify(&UserEvent::ProfileUpdated { id });
        Ok(public)
    }

    // =========================================================================
    // Administration
    // =========================================================================

    /// Lists every account without password digests. Admin only.
    pub fn list_users(&self) -> StoreResult<Vec<PublicAccount>> {
        self.require_admin()?;
        Ok(self.users.public_accounts())
    }

    /// Deletes an account. Admin only.
    ///
    /// Logs out as well when the deleted account is the session.
    ///
    /// ## Errors
    /// - `AdminOnly` unless the session is an administrator
    /// - `MissingUserId` for a blank id
    /// - `CannotDeleteAdmin` for the reserved administrator
    /// - `UserNotFound` when no account has that id
    pub fn delete_user(&mut self, id: &str) -> StoreResult<()> {
        self.require_admin()?;

        let id = id.trim();
        if id.is_empty() {
            return Err(CoreError::MissingUserId.into());
        }
        if id == ADMIN_USER_ID {
            return Err(CoreError::CannotDeleteAdmin.into());
        }

        let removed = self
            .users
            .remove(id)
            .ok_or_else(|| CoreError::UserNotFound(id.to_string()))?;
        self.save_users();

        info!(account_id = %removed.id, "Account deleted");
        self.listeners.notify(&UserEvent::Deleted {
            id: removed.id.clone(),
        });

        if self.session.as_deref() == Some(removed.id.as_str()) {
            self.log_out();
        }
        Ok(())
    }

    fn require_admin(&self) -> StoreResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(CoreError::AdminOnly.into())
        }
    }

    // =========================================================================
    // Persistence & Subscriptions
    // =========================================================================

    /// Re-reads accounts and the session pointer from storage.
    pub fn reload(&mut self) {
        self.users = storage::load(&self.storage, &self.keys.users, UserCollection::new);
        self.session = load_session(&self.storage, &self.keys.session);
        debug!(accounts = self.users.len(), "User store reloaded from storage");
        self.listeners.notify(&UserEvent::Reloaded);
    }

    /// Calls `listener` after every committed change.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&UserEvent) + Send + Sync + 'static,
    {
        self.listeners.subscribe(listener)
    }

    fn current_account(&self) -> Option<&Account> {
        self.session
            .as_deref()
            .and_then(|id| self.users.find_by_id(id))
    }

    fn save_users(&self) {
        storage::save(&self.storage, &self.keys.users, &self.users);
    }

    fn set_session(&mut self, id: Option<String>) {
        match &id {
            Some(id) => storage::save_text(&self.storage, &self.keys.session, id),
            None => storage::remove(&self.storage, &self.keys.session),
        };
        self.session = id;
    }
}

fn load_session<S: Storage + ?Sized>(storage: &S, key: &str) -> Option<String> {
    storage::load_text(storage, key).filter(|id| !id.trim().is_empty())
}
