//! # Stockroom Dashboard Library
//!
//! Application layer for the Stockroom inventory dashboard: configuration,
//! session, authentication and one command per screen action. The
//! `stockroom` binary drives it from the command line.
//!
//! ## Module Organization
//! ```text
//! stockroom_dashboard/
//! ├── lib.rs          ◄─── You are here (App, startup, tracing)
//! ├── cli.rs          ◄─── Argument parsing and usage text
//! ├── auth.rs         ◄─── Argon2 hashing, demo accounts
//! ├── navigation.rs   ◄─── Routes and sign-in redirects
//! ├── state/
//! │   ├── config.rs   ◄─── AppConfig (TOML + env)
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   ├── session.rs  ◄─── SessionStore trait, file/memory backends
//! │   └── submit.rs   ◄─── In-flight submission guard
//! ├── commands/
//! │   ├── item.rs, category.rs, supplier.rs, transaction.rs
//! │   ├── report.rs   ◄─── Dashboard, reports, CSV export/import
//! │   └── session.rs  ◄─── Login, register, logout, theme
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod auth;
pub mod cli;
pub mod commands;
pub mod error;
pub mod navigation;
pub mod state;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use serde_json::Value;
use stockroom_core::Theme;
use stockroom_store::Database;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Command, ThemeAction, USAGE};
use commands::transaction::TransactionInput;
use error::{ApiError, ApiResult};
use navigation::{guard, Route};
use state::{AppConfig, DbState, FileSessionStore, SessionState, SubmitGuard};

/// Default log filter when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "info,stockroom=debug";

/// All state the commands draw from.
#[derive(Debug, Clone)]
pub struct App {
    pub config: AppConfig,
    pub db: DbState,
    pub session: SessionState,
    pub submit: SubmitGuard,
}

impl App {
    /// Builds the store and session from `config`.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  1. Database::new(store config)   mock catalog, latency             │
    /// │  2. seed_demo_users               admin / manager / viewer          │
    /// │  3. FileSessionStore              <data_dir>/session.json           │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    pub async fn start(config: AppConfig) -> ApiResult<App> {
        let db = Database::new(config.store_config());
        if config.seed {
            auth::seed_demo_users(&db).await?;
        }

        let session_path = config.session_path();
        debug!(path = ?session_path, "Using session file");
        let session = SessionState::new(Arc::new(FileSessionStore::new(session_path)));

        Ok(App::with_state(config, db, session))
    }

    pub fn with_state(config: AppConfig, db: Database, session: SessionState) -> App {
        App {
            config,
            db: DbState::new(db),
            session,
            submit: SubmitGuard::new(),
        }
    }

    /// Runs one command after the sign-in check for its screen.
    pub async fn execute(&self, command: Command) -> ApiResult<Value> {
        if let Some(route) = command.route() {
            let user = self.session.current_user()?;
            if !route.is_public() && guard(route, user.as_ref()) == Route::Login {
                return Err(ApiError::unauthenticated());
            }
        }

        let db = &self.db;
        let session = &self.session;
        let submit = &self.submit;

        match command {
            Command::Items { query, page } => {
                to_json(commands::item::list_items(db, &query, page).await?)
            }
            Command::Item { id } => to_json(commands::item::get_item(db, &id).await?),
            Command::Categories { query } => {
                to_json(commands::category::list_categories(db, &query).await?)
            }
            Command::Suppliers { query } => {
                to_json(commands::supplier::list_suppliers(db, &query).await?)
            }
            Command::Transactions { filter } => {
                to_json(commands::transaction::list_transactions(db, &filter).await?)
            }
            Command::Record {
                item_id,
                kind,
                amount,
                reason,
            } => {
                let input = TransactionInput {
                    item_id,
                    kind,
                    amount,
                    reason,
                    performed_by: None,
                };
                to_json(commands::transaction::record_transaction(db, session, submit, input).await?)
            }
            Command::Dashboard => to_json(commands::report::dashboard(db).await?),
            Command::Movement { days } => {
                to_json(commands::transaction::stock_movement(db, days).await?)
            }
            Command::Report => to_json(commands::report::inventory_report(db).await?),
            Command::Export { dir } => {
                let dir = dir.unwrap_or_else(|| self.config.data_dir());
                to_json(commands::report::export_items(db, &dir).await?)
            }
            Command::Import { path } => to_json(commands::report::import_items(db, &path).await?),
            Command::Login { email, password } => {
                to_json(commands::session::login(db, session, &email, &password).await?)
            }
            Command::Register {
                name,
                email,
                password,
            } => to_json(commands::session::register(db, session, &name, &email, &password).await?),
            Command::Logout => to_json(commands::session::logout(session)?),
            Command::Whoami => to_json(commands::session::current_user(session)?),
            Command::Theme(action) => {
                let theme: Theme = match action {
                    ThemeAction::Show => commands::session::theme(session)?,
                    ThemeAction::Set(theme) => commands::session::set_theme(session, theme)?,
                    ThemeAction::Toggle => commands::session::toggle_theme(session)?,
                };
                to_json(theme)
            }
            Command::Help => Ok(Value::String(USAGE.to_string())),
        }
    }
}

fn to_json<T: Serialize>(value: T) -> ApiResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| ApiError::internal(format!("Failed to encode response: {}", e)))
}

/// Runs the CLI with the arguments after the program name.
pub async fn run(args: Vec<String>) -> ExitCode {
    let loaded = AppConfig::load(None);
    init_tracing(loaded.as_ref().ok().and_then(|c| c.log.as_deref()));

    let config = loaded.unwrap_or_else(|e| {
        warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let command = match Command::parse(&args) {
        Ok(Command::Help) => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Ok(command) => command,
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    let start = Instant::now();
    info!(command = ?command.route(), latency_ms = config.latency_ms, "Starting Stockroom");

    let result = match App::start(config).await {
        Ok(app) => app.execute(command).await,
        Err(e) => Err(e),
    };

    info!(elapsed_ms = start.elapsed().as_secs_f64() * 1000.0, "Command finished");

    match result {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(text) => {
                println!("{}", text);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            let text = serde_json::to_string_pretty(&err).unwrap_or_else(|_| err.to_string());
            eprintln!("{}", text);
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Filter Priority
/// 1. `RUST_LOG`
/// 2. `log` from the config (or `STOCKROOM_LOG`)
/// 3. [`DEFAULT_LOG_FILTER`]
///
/// Logs go to stderr so stdout carries only command output.
pub fn init_tracing(configured: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured.unwrap_or(DEFAULT_LOG_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
