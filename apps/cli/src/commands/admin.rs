//! # Admin Commands
//!
//! Both commands require the session to be an administrator; the store
//! enforces it.

use std::fmt::Write;

use foodies_store::{Storage, UserStore};
use tracing::debug;

use crate::error::CliResult;

/// Lists every account.
pub fn users<S: Storage>(users: &UserStore<S>) -> CliResult<String> {
    debug!("admin users command");

    let accounts = users.list_users()?;
    let mut out = String::new();
    for account in &accounts {
        let _ = writeln!(
            out,
            "{:<36}  {:<6} {:<28} {}",
            account.id,
            account.role,
            account.email,
            account.created_at.format("%Y-%m-%d")
        );
    }
    let _ = write!(out, "{} account(s)", accounts.len());
    Ok(out)
}

pub fn delete<S: Storage>(users: &mut UserStore<S>, id: &str) -> CliResult<String> {
    debug!(account_id = %id, "admin delete command");

    users.delete_user(id)?;
    Ok(format!("Deleted account {}", id.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use foodies_core::{Credentials, NewAccount};
    use foodies_store::{MemoryStorage, StoreConfig};

    async fn admin_store() -> (UserStore<MemoryStorage>, String) {
        let mut store =
            UserStore::open(MemoryStorage::new(), &StoreConfig::for_tests()).unwrap();
        let user = store
            .create_user(NewAccount {
                email: "a@x.com".into(),
                password: "pw".into(),
                ..NewAccount::default()
            })
            .await
            .unwrap();
        store
            .login(Credentials::new("admin", "adminpassword"))
            .await
            .unwrap();
        (store, user.id)
    }

    #[tokio::test]
    async fn test_users_requires_admin() {
        let (mut store, _) = admin_store().await;

        let out = users(&store).unwrap();
        assert!(out.contains("admin"));
        assert!(out.contains("a@x.com"));
        assert!(out.ends_with("2 account(s)"));

        store.log_out();
        assert_eq!(users(&store).unwrap_err().code, ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn test_delete() {
        let (mut store, id) = admin_store().await;

        assert_eq!(delete(&mut store, "admin").unwrap_err().code, ErrorCode::NotFound);
        assert_eq!(delete(&mut store, "  ").unwrap_err().code, ErrorCode::ValidationError);

        assert_eq!(delete(&mut store, &id).unwrap(), format!("Deleted account {}", id));
        assert_eq!(delete(&mut store, &id).unwrap_err().code, ErrorCode::NotFound);
        assert!(!store.is_email_taken("a@x.com"));
    }
}
