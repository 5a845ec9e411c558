//! # Nellito Stock Application
//!
//! Command-line front end for the ice cream shop's stock ledger.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Nellito Stock Architecture                         │
//! │                                                                         │
//! │  ┌───────────────────────────────────────────────────────────────────┐ │
//! │  │                  CLI (commands.rs, clap)                          │ │
//! │  │   add | entry | exit | list | categories                          │ │
//! │  └──────────────────────────┬────────────────────────────────────────┘ │
//! │                             │                                           │
//! │  ┌──────────────────────────▼────────────────────────────────────────┐ │
//! │  │              StockController (controller.rs)                      │ │
//! │  │   Ledger in memory ─── save after every successful mutation       │ │
//! │  └──────────┬───────────────────────────────────┬────────────────────┘ │
//! │             │                                   │                       │
//! │  ┌──────────▼──────────┐             ┌──────────▼──────────┐           │
//! │  │    nellito-core     │             │     nellito-db      │           │
//! │  │  ledger, validation │             │  LedgerStore        │           │
//! │  │  report, codec      │             │  SQLite kv_store    │           │
//! │  └─────────────────────┘             └─────────────────────┘           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (to stderr)
//! 2. Load configuration (`config.rs`)
//! 3. Open the database and run migrations
//! 4. Load the stored ledger into the controller
//! 5. Run the command and print its output

use tracing::info;
use tracing_subscriber::EnvFilter;

use nellito_db::{Database, DbConfig, LedgerStore};

pub mod commands;
pub mod config;
pub mod controller;
pub mod error;

pub use commands::{Cli, Command};
pub use config::AppConfig;
pub use controller::{MutationOutcome, StockController};
pub use error::{ApiError, ApiResult, ErrorCode};

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so command output on stdout stays clean.
/// Use `RUST_LOG` to override the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs one CLI invocation end to end.
pub async fn run(cli: Cli) -> ApiResult<String> {
    let config = AppConfig::load(cli.config)?;
    let db_path = config.database_path()?;

    info!(path = %db_path.display(), "Opening database");
    let db = Database::new(DbConfig::new(&db_path)).await?;

    let store = LedgerStore::with_key(db.kv_store(), config.storage.ledger_key);
    let mut controller = StockController::init(store, config.ledger).await?;

    let output = commands::execute(&mut controller, cli.command).await;

    db.close().await;
    output
}
