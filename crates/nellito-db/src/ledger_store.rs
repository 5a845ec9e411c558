//! # Ledger Store
//!
//! Binds a [`KeyValueStore`] to the key the ledger lives under and handles
//! the blob codec in both directions.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load()                                                                 │
//! │    store.load(key) ─► None           ─► Ok(None)   (fresh install)     │
//! │                    ─► Some(blob) ─► decode ─► Ok(Some(ledger))          │
//! │                                          └──► Err(CorruptLedger)        │
//! │                                                                         │
//! │  save(&ledger)                                                          │
//! │    encode ─► store.save(key, blob)                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use nellito_core::{codec, Ledger};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::store::KeyValueStore;

/// Key the ledger has always been stored under.
pub const DEFAULT_LEDGER_KEY: &str = "estoque";

/// Load/save adapter for a single ledger.
#[derive(Debug, Clone)]
pub struct LedgerStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> LedgerStore<S> {
    /// Adapter using [`DEFAULT_LEDGER_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_LEDGER_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        LedgerStore {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the underlying store.
    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Loads the persisted ledger, if one exists.
    ///
    /// ## Returns
    /// * `Ok(None)` - Nothing stored yet
    /// * `Ok(Some(ledger))` - Stored ledger, invariants checked
    /// * `Err(DbError::CorruptLedger)` - Blob present but unreadable
    pub async fn load(&self) -> DbResult<Option<Ledger>> {
        let Some(blob) = self.store.load(&self.key).await? else {
            debug!(key = %self.key, "No stored ledger");
            return Ok(None);
        };

        let ledger = codec::decode(&blob).map_err(|e| DbError::corrupt(&self.key, e))?;

        info!(key = %self.key, records = ledger.len(), "Ledger loaded");
        Ok(Some(ledger))
    }

    /// Persists the whole ledger, replacing the previous blob.
    pub async fn save(&self, ledger: &Ledger) -> DbResult<()> {
        let blob = codec::encode(ledger).map_err(DbError::Serialization)?;
        self.store.save(&self.key, &blob).await?;

        debug!(key = %self.key, records = ledger.len(), "Ledger saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryKvStore;
    use crate::{Database, DbConfig};
    use nellito_core::{AddStockRequest, LedgerSettings, StockRecord};

    fn sample() -> Ledger {
        Ledger::from_records(vec![
            StockRecord::new("Cone", "Waffle", 3),
            StockRecord::new("Popsicle", "Lemon", 12),
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn test_load_when_nothing_stored() {
        let store = LedgerStore::new(MemoryKvStore::new());
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let store = LedgerStore::new(MemoryKvStore::new());
        store.save(&sample()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(sample()));
    }

    #[tokio::test]
    async fn test_uses_ledger_key() {
        let store = LedgerStore::new(MemoryKvStore::new());
        store.save(&Ledger::new()).await.unwrap();
        assert_eq!(
            store.inner().load("estoque").await.unwrap().as_deref(),
            Some("[]")
        );
    }

    #[tokio::test]
    async fn test_reads_blob_in_stored_format() {
        let blob = r#"[{"categoria":"Cones","produto":"Casquinha","quantidade":7}]"#;
        let store = LedgerStore::new(MemoryKvStore::with_entry("estoque", blob));

        let ledger = store.load().await.unwrap().unwrap();
        assert_eq!(ledger.get("Casquinha").unwrap().quantity, 7);
    }

    #[tokio::test]
    async fn test_corrupt_blob_is_an_error() {
        let store = LedgerStore::new(MemoryKvStore::with_entry("estoque", "{not json"));
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, DbError::CorruptLedger { ref key, .. } if key == "estoque"));
    }

    #[tokio::test]
    async fn test_sqlite_round_trip_after_mutation() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = LedgerStore::with_key(db.kv_store(), "estoque-test");

        let mut ledger = sample();
        ledger
            .add_stock(
                &AddStockRequest::new("Topping", "Fudge", "2"),
                &LedgerSettings::default(),
            )
            .unwrap();
        store.save(&ledger).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, ledger);
        assert_eq!(loaded.records()[2].product, "Fudge");
    }
}
