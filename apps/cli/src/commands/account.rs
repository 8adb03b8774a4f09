//! # Account Commands
//!
//! Registration, login and the logged-in user's profile. The session
//! survives between invocations through the store's session record.

use foodies_core::{CoreError, Credentials, NewAccount, ProfileDraft, PublicAccount};
use foodies_store::{Storage, UserStore};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Profile fields given on the command line. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ProfileArgs {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Creates an account and logs it in.
pub async fn register<S: Storage>(
    users: &mut UserStore<S>,
    form: NewAccount,
) -> CliResult<String> {
    debug!("account register command");

    let account = users.create_user(form).await?;
    Ok(format!("Welcome, {}! You are now logged in.", greeting(&account)))
}

pub async fn login<S: Storage>(
    users: &mut UserStore<S>,
    credentials: Credentials,
) -> CliResult<String> {
    debug!("account login command");

    let account = users.login(credentials).await?;
    Ok(format!("Logged in as {}", greeting(&account)))
}

pub fn logout<S: Storage>(users: &mut UserStore<S>) -> String {
    debug!("account logout command");
    users.log_out();
    "Logged out".to_string()
}

/// Describes the logged-in account.
pub fn whoami<S: Storage>(users: &UserStore<S>) -> String {
    match users.current_user() {
        Some(account) => format!(
            "{} <{}> role={} id={}",
            greeting(&account),
            account.email,
            account.role,
            account.id
        ),
        None => "Not logged in".to_string(),
    }
}

/// Edits the logged-in account, filling unspecified fields from it.
pub async fn update<S: Storage>(
    users: &mut UserStore<S>,
    args: ProfileArgs,
) -> CliResult<String> {
    debug!("account update command");

    let current = users
        .current_user()
        .ok_or_else(|| CliError::from(CoreError::NotLoggedIn))?;

    let draft = ProfileDraft {
        first_name: args.first_name.unwrap_or(current.first_name),
        last_name: args.last_name.unwrap_or(current.last_name),
        email: args.email.unwrap_or(current.email),
        password: args.password.unwrap_or_default(),
    };

    let account = users.update_current_user_profile(draft).await?;
    Ok(format!("Profile saved for {}", account.email))
}

fn greeting(account: &PublicAccount) -> String {
    let name = account.full_name();
    if name.is_empty() {
        account.email.clone()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use foodies_store::{MemoryStorage, StoreConfig};

    fn store() -> UserStore<MemoryStorage> {
        UserStore::open(MemoryStorage::new(), &StoreConfig::for_tests()).unwrap()
    }

    fn form(email: &str) -> NewAccount {
        NewAccount {
            first_name: "Boiler".into(),
            last_name: "Maker".into(),
            email: email.into(),
            password: "hunter22".into(),
        }
    }

    #[tokio::test]
    async fn test_register_then_whoami() {
        let mut users = store();
        assert_eq!(whoami(&users), "Not logged in");

        let out = register(&mut users, form("Pete@Purdue.edu")).await.unwrap();
        assert_eq!(out, "Welcome, Boiler Maker! You are now logged in.");
        assert!(whoami(&users).starts_with("Boiler Maker <Pete@Purdue.edu> role=user"));

        let err = register(&mut users, form("pete@purdue.edu")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_login_logout() {
        let mut users = store();
        register(&mut users, form("a@x.com")).await.unwrap();
        assert_eq!(logout(&mut users), "Logged out");

        let err = login(&mut users, Credentials::new("a@x.com", "wrong"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);

        let err = login(&mut users, Credentials::new("b@x.com", "hunter22"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let out = login(&mut users, Credentials::new(" A@X.com ", "hunter22"))
            .await
            .unwrap();
        assert_eq!(out, "Logged in as Boiler Maker");
    }

    #[tokio::test]
    async fn test_update_keeps_unspecified_fields() {
        let mut users = store();

        let err = update(&mut users, ProfileArgs::default()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);

        register(&mut users, form("a@x.com")).await.unwrap();
        let out = update(
            &mut users,
            ProfileArgs {
                email: Some("new@x.com".into()),
                ..ProfileArgs::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(out, "Profile saved for new@x.com");

        let current = users.current_user().unwrap();
        assert_eq!(current.first_name, "Boiler");
        assert_eq!(current.last_name, "Maker");

        // blank password kept the old one
        logout(&mut users);
        login(&mut users, Credentials::new("new@x.com", "hunter22"))
            .await
            .unwrap();
    }
}
