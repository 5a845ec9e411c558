//! # Stock Controller
//!
//! Owns the in-memory ledger for the lifetime of the process and keeps the
//! persisted copy in step with it.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Controller Operations                                │
//! │                                                                         │
//! │  init()         store.load() ─► Some(ledger) ─► use it                 │
//! │                              ─► None         ─► empty ledger           │
//! │                              ─► Err          ─► DATABASE_ERROR         │
//! │                                                                         │
//! │  add_stock()  ┐                                                         │
//! │  record_entry()├─► ledger mutation ─► Err ─► ApiError, nothing saved   │
//! │  record_exit() ┘                    └─► Ok  ─► store.save(&ledger)     │
//! │                                              ├─ Ok  ─► persisted=true  │
//! │                                              └─ Err ─► logged,         │
//! │                                                        persisted=false │
//! │                                                                         │
//! │  report()       read only, never touches the store                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed save never rolls back the in-memory change; the next successful
//! save writes the whole ledger again.

use serde::Serialize;
use tracing::{debug, error, info, warn};

use nellito_core::{
    AddStockRequest, Ledger, LedgerError, LedgerSettings, MovementRequest, StockChange,
    StockReport,
};
use nellito_db::{KeyValueStore, LedgerStore};

use crate::error::ApiResult;

/// Result of a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationOutcome {
    pub change: StockChange,

    /// False when the ledger changed in memory but could not be saved.
    pub persisted: bool,
}

/// Application controller for the stock ledger.
pub struct StockController<S> {
    ledger: Ledger,
    settings: LedgerSettings,
    store: LedgerStore<S>,
}

impl<S: KeyValueStore> StockController<S> {
    /// Loads the stored ledger, or starts empty when nothing is stored.
    pub async fn init(store: LedgerStore<S>, settings: LedgerSettings) -> ApiResult<Self> {
        let ledger = match store.load().await? {
            Some(ledger) => ledger,
            None => {
                info!(key = %store.key(), "Starting with an empty ledger");
                Ledger::new()
            }
        };

        let unknown: Vec<&str> = ledger
            .iter()
            .map(|r| r.category.as_str())
            .filter(|c| !settings.is_known_category(c))
            .collect();
        if !unknown.is_empty() {
            warn!(?unknown, "Stored records use categories missing from configuration");
        }

        Ok(StockController {
            ledger,
            settings,
            store,
        })
    }

    /// Adds stock for a product, creating its record when new.
    pub async fn add_stock(&mut self, request: AddStockRequest) -> ApiResult<MutationOutcome> {
        let result = self.ledger.add_stock(&request, &self.settings);
        self.finish("add", result).await
    }

    /// Records stock arriving for an existing product.
    pub async fn record_entry(&mut self, request: MovementRequest) -> ApiResult<MutationOutcome> {
        let result = self.ledger.record_entry(&request);
        self.finish("entry", result).await
    }

    /// Records stock leaving for an existing product.
    pub async fn record_exit(&mut self, request: MovementRequest) -> ApiResult<MutationOutcome> {
        let result = self.ledger.record_exit(&request);
        self.finish("exit", result).await
    }

    /// Builds the stock report with the configured threshold.
    pub fn report(&self) -> StockReport {
        StockReport::build(&self.ledger, self.settings.low_stock_threshold)
    }

    pub fn categories(&self) -> &[String] {
        &self.settings.categories
    }

    pub fn settings(&self) -> &LedgerSettings {
        &self.settings
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    async fn finish(
        &self,
        operation: &'static str,
        result: Result<StockChange, LedgerError>,
    ) -> ApiResult<MutationOutcome> {
        let change = match result {
            Ok(change) => change,
            Err(err) => {
                debug!(operation, error = %err, kind = ?err.kind(), "Stock operation rejected");
                return Err(err.into());
            }
        };

        info!(
            operation,
            product = %change.product,
            previous = change.previous,
            current = change.current,
            "Stock updated"
        );

        let persisted = match self.store.save(&self.ledger).await {
            Ok(()) => true,
            Err(err) => {
                error!(operation, key = %self.store.key(), error = %err, "Failed to save ledger");
                false
            }
        };

        Ok(MutationOutcome { change, persisted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use async_trait::async_trait;
    use nellito_core::StockRecord;
    use nellito_db::{DbError, DbResult, MemoryKvStore};

    /// Store whose writes always fail.
    struct ReadOnlyStore(MemoryKvStore);

    #[async_trait]
    impl KeyValueStore for ReadOnlyStore {
        async fn load(&self, key: &str) -> DbResult<Option<String>> {
            self.0.load(key).await
        }

        async fn save(&self, _key: &str, _value: &str) -> DbResult<()> {
            Err(DbError::QueryFailed("disk I/O error".into()))
        }
    }

    async fn controller() -> StockController<MemoryKvStore> {
        StockController::init(LedgerStore::new(MemoryKvStore::new()), LedgerSettings::default())
            .await
            .unwrap()
    }

    async fn stored(controller: &StockController<MemoryKvStore>) -> Ledger {
        controller.store.load().await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn test_init_with_nothing_stored() {
        let controller = controller().await;
        assert!(controller.ledger().is_empty());
        assert_eq!(controller.report().total_products, 0);
    }

    #[tokio::test]
    async fn test_init_loads_stored_ledger() {
        let blob = r#"[{"categoria":"Cone","produto":"Waffle","quantidade":3}]"#;
        let store = LedgerStore::new(MemoryKvStore::with_entry("estoque", blob));

        let controller = StockController::init(store, LedgerSettings::default())
            .await
            .unwrap();
        assert_eq!(controller.ledger().get("Waffle").unwrap().quantity, 3);
    }

    #[tokio::test]
    async fn test_init_fails_on_corrupt_ledger() {
        let store = LedgerStore::new(MemoryKvStore::with_entry("estoque", "not json"));
        let err = StockController::init(store, LedgerSettings::default())
            .await
            .err()
            .unwrap();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[tokio::test]
    async fn test_add_persists_ledger() {
        let mut controller = controller().await;

        let outcome = controller
            .add_stock(AddStockRequest::new("Popsicle", "Lemon", "10"))
            .await
            .unwrap();
        assert!(outcome.persisted);
        assert!(outcome.change.created);
        assert_eq!(outcome.change.current, 10);

        assert_eq!(
            stored(&controller).await.records(),
            &[StockRecord::new("Popsicle", "Lemon", 10)]
        );
    }

    #[tokio::test]
    async fn test_entry_and_exit_update_stored_copy() {
        let mut controller = controller().await;
        controller
            .add_stock(AddStockRequest::new("Cone", "Waffle", "3"))
            .await
            .unwrap();

        controller
            .record_entry(MovementRequest::new("Waffle", "4"))
            .await
            .unwrap();
        let outcome = controller
            .record_exit(MovementRequest::new("Waffle", "5"))
            .await
            .unwrap();

        assert_eq!(outcome.change.previous, 7);
        assert_eq!(outcome.change.current, 2);
        assert_eq!(stored(&controller).await.get("Waffle").unwrap().quantity, 2);
    }

    #[tokio::test]
    async fn test_rejected_operations_do_not_save() {
        let mut controller = controller().await;
        controller
            .add_stock(AddStockRequest::new("Cone", "Waffle", "3"))
            .await
            .unwrap();

        let err = controller
            .record_exit(MovementRequest::new("Waffle", "5"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);

        let err = controller
            .record_entry(MovementRequest::new("Ghost", "1"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = controller
            .add_stock(AddStockRequest::new("Cone", "", "1"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert_eq!(controller.ledger().get("Waffle").unwrap().quantity, 3);
        assert_eq!(stored(&controller).await.get("Waffle").unwrap().quantity, 3);
    }

    #[tokio::test]
    async fn test_save_failure_keeps_memory_state() {
        let store = LedgerStore::new(ReadOnlyStore(MemoryKvStore::new()));
        let mut controller = StockController::init(store, LedgerSettings::default())
            .await
            .unwrap();

        let outcome = controller
            .add_stock(AddStockRequest::new("Topping", "Fudge", "2"))
            .await
            .unwrap();
        assert!(!outcome.persisted);
        assert_eq!(controller.ledger().get("Fudge").unwrap().quantity, 2);
    }

    #[tokio::test]
    async fn test_report_uses_configured_threshold() {
        let mut settings = LedgerSettings::default();
        settings.low_stock_threshold = 10;
        let mut controller =
            StockController::init(LedgerStore::new(MemoryKvStore::new()), settings)
                .await
                .unwrap();

        controller
            .add_stock(AddStockRequest::new("Cone", "Waffle", "9"))
            .await
            .unwrap();
        controller
            .add_stock(AddStockRequest::new("Cone", "Sugar", "10"))
            .await
            .unwrap();

        let report = controller.report();
        assert_eq!(report.threshold, 10);
        assert_eq!(report.restock_count, 1);
        assert_eq!(
            report.restock_lines().map(|s| s.record.product.as_str()).collect::<Vec<_>>(),
            ["Waffle"]
        );
    }
}
