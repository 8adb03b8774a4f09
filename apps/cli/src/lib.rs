//! # Purdue Foodies CLI
//!
//! Command-line storefront over the persistent cart and account stores.
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        foodies (binary)                                 │
//! │                                                                         │
//! │  main.rs ────► init_tracing, parse args, print result, exit code       │
//! │                                                                         │
//! │  lib.rs ─────► run: AppConfig ──► FileStorage ──► AppState ──► execute │
//! │                                                                         │
//! │  commands/ ──► menu, cart, account, admin handlers                     │
//! │                                                                         │
//! │  state/ ─────► AppState (CartStore + UserStore + MenuClient), AppConfig│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```bash
//! foodies menu list
//! foodies menu show "Triple XXX"
//! foodies cart add 1 11
//! foodies cart show
//! foodies account register --email pete@purdue.edu --password hunter22
//! foodies account login --email admin --password adminpassword
//! foodies admin users
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use foodies_core::{Credentials, NewAccount};
use foodies_store::{FileStorage, Storage};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use commands::account::ProfileArgs;
use error::{CliError, CliResult, ErrorCode};
use state::{AppConfig, AppState};

// =============================================================================
// Arguments
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "foodies")]
#[command(author, version, about = "Purdue Foodies storefront")]
pub struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory for the cart and account records
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Browse restaurants and menus
    Menu {
        #[command(subcommand)]
        action: MenuAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Register, log in, edit your profile
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Administer accounts (admin only)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum MenuAction {
    /// List restaurants
    List,
    /// Show one restaurant's menu
    Show {
        /// Restaurant id or name
        restaurant: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum CartAction {
    /// Add one unit of a menu item
    Add {
        /// Restaurant id or name
        restaurant: String,
        /// Item id or name
        item: String,
    },
    /// Remove one unit of an item
    Remove { item: String },
    /// Delete an item's whole line
    Delete { item: String },
    Show,
    Clear,
    /// Print the total and empty the cart
    Checkout,
}

#[derive(Debug, Subcommand)]
pub enum AccountAction {
    /// Create an account and log in
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    /// Show the logged-in account
    Whoami,
    /// Edit the logged-in account; omitted fields keep their value
    Update(UpdateArgs),
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    /// New password; omit to keep the current one
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum AdminAction {
    /// List all accounts
    Users,
    /// Delete an account by id
    Delete { id: String },
}

// =============================================================================
// Entry Points
// =============================================================================

/// Loads config, opens the file-backed stores and runs one command.
///
/// A config file named with `--config` must load cleanly; a broken file at
/// the default location falls back to defaults with a warning.
pub async fn run(cli: Cli) -> CliResult<String> {
    let mut config = match cli.config {
        Some(path) => AppConfig::load(Some(path))?,
        None => AppConfig::load_or_default(None),
    };
    if let Some(dir) = cli.data_dir {
        debug!(data_dir = ?dir, "Overriding data dir from command line");
        config.storage.data_dir = Some(dir);
    }

    let data_dir = config.data_dir()?;
    let storage = FileStorage::open(data_dir.clone()).map_err(|e| {
        CliError::new(
            ErrorCode::ConfigError,
            format!("Cannot open data dir {}: {}", data_dir.display(), e),
        )
    })?;
    info!(data_dir = %data_dir.display(), "Storage ready");

    let mut state = AppState::open(storage, &config).await?;
    execute(&mut state, cli.command).await
}

/// Runs one command against already-open state.
///
/// Toast messages raised while the command ran are printed above its output.
pub async fn execute<S: Storage + Clone>(
    state: &mut AppState<S>,
    command: Commands,
) -> CliResult<String> {
    let output = match command {
        Commands::Menu { action } => {
            let document = state.menu.fetch().await?;
            match action {
                MenuAction::List => commands::menu::list(&document),
                MenuAction::Show { restaurant } => commands::menu::show(&document, &restaurant)?,
            }
        }
        Commands::Cart { action } => match action {
            CartAction::Add { restaurant, item } => {
                let document = state.menu.fetch().await?;
                commands::cart::add(&mut state.cart, &document, &restaurant, &item)?
            }
            CartAction::Remove { item } => commands::cart::remove(&mut state.cart, &item),
            CartAction::Delete { item } => commands::cart::delete(&mut state.cart, &item)?,
            CartAction::Show => commands::cart::show(&state.cart),
            CartAction::Clear => commands::cart::clear(&mut state.cart),
            CartAction::Checkout => commands::cart::checkout(&mut state.cart)?,
        },
        Commands::Account { action } => match action {
            AccountAction::Register {
                email,
                password,
                first_name,
                last_name,
            } => {
                let form = NewAccount {
                    first_name,
                    last_name,
                    email,
                    password,
                };
                commands::account::register(&mut state.users, form).await?
            }
            AccountAction::Login { email, password } => {
                commands::account::login(&mut state.users, Credentials::new(email, password))
                    .await?
            }
            AccountAction::Logout => commands::account::logout(&mut state.users),
            AccountAction::Whoami => commands::account::whoami(&state.users),
            AccountAction::Update(args) => {
                let args = ProfileArgs {
                    first_name: args.first_name,
                    last_name: args.last_name,
                    email: args.email,
                    password: args.password,
                };
                commands::account::update(&mut state.users, args).await?
            }
        },
        Commands::Admin { action } => match action {
            AdminAction::Users => commands::admin::users(&state.users)?,
            AdminAction::Delete { id } => commands::admin::delete(&mut state.users, &id)?,
        },
    };

    let mut lines = state.drain_notices();
    lines.push(output);
    Ok(lines.join("\n"))
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so command output stays clean on stdout.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=foodies_store=trace` - Show trace for the store crate only
/// - Default: `info,foodies=debug`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,foodies=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
