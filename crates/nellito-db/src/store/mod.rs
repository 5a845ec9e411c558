//! # Key-Value Stores
//!
//! The persistence contract the ledger relies on: a scoped store of string
//! blobs addressed by key.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  KeyValueStore                                                          │
//! │  ├── load(key)        → Some(blob) | None                              │
//! │  └── save(key, blob)  → Ok | Err                                       │
//! │                                                                         │
//! │  Implementations                                                        │
//! │  ├── SqliteKvStore  - durable, one row per key                         │
//! │  └── MemoryKvStore  - process-local, for tests and throwaway runs      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod memory;
mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

use async_trait::async_trait;

use crate::error::DbResult;

/// Scoped string store keyed by a fixed identifier.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the blob stored under `key`, or `None` if nothing is there.
    async fn load(&self, key: &str) -> DbResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous blob.
    async fn save(&self, key: &str, value: &str) -> DbResult<()>;
}
