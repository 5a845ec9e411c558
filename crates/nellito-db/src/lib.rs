//! # nellito-db: Persistence Layer for Nellito Stock
//!
//! The ledger is saved as one serialized blob in a scoped key-value store,
//! loaded once at startup and saved again after every successful mutation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StockController (apps/nellito)                                        │
//! │       │ load() at init, save() after each successful mutation          │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  nellito-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │  LedgerStore<S> ──► KeyValueStore ──┬── SqliteKvStore           │   │
//! │  │  (codec + key)      (trait)         └── MemoryKvStore           │   │
//! │  │                                                                 │   │
//! │  │  Database / DbConfig (pool.rs)   migrations (embedded)          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite: kv_store(key, value, updated_at)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nellito_db::{Database, DbConfig, LedgerStore};
//!
//! let db = Database::new(DbConfig::new("nellito.db")).await?;
//! let store = LedgerStore::new(db.kv_store());
//!
//! let ledger = store.load().await?.unwrap_or_default();
//! store.save(&ledger).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger_store;
pub mod migrations;
pub mod pool;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use ledger_store::{LedgerStore, DEFAULT_LEDGER_KEY};
pub use pool::{Database, DbConfig};
pub use store::{KeyValueStore, MemoryKvStore, SqliteKvStore};
