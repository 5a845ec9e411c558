//! # Ledger
//!
//! The authoritative collection of stock records and the three operations
//! allowed to change it.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Ledger Operations                                  │
//! │                                                                         │
//! │  add_stock(category, product, qty)                                     │
//! │     ├── product exists  → quantity += qty (category kept)              │
//! │     └── otherwise       → append (category, product, qty)              │
//! │                                                                         │
//! │  record_entry(product, qty)                                            │
//! │     ├── product exists  → quantity += qty                              │
//! │     └── otherwise       → ProductNotFound                              │
//! │                                                                         │
//! │  record_exit(product, qty)                                             │
//! │     ├── unknown product → ProductNotFound                              │
//! │     ├── qty > on hand   → InsufficientStock                            │
//! │     └── otherwise       → quantity -= qty                              │
//! │                                                                         │
//! │  Every check runs before the write: a call either fully applies or     │
//! │  leaves the ledger untouched.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `product` is unique across records
//! - `quantity >= 0` (enforced by the unsigned type and checked arithmetic)
//! - Records are never removed, not even at zero
//! - Insertion order is kept for display only; lookups go by key

use std::collections::HashSet;

use crate::error::{LedgerError, LedgerResult, ValidationError};
use crate::types::{CategoryMismatchPolicy, LedgerSettings, StockChange, StockRecord};
use crate::validation::{AddStockRequest, MovementRequest};

/// Ordered set of stock records, unique by product.
///
/// Only [`Ledger::from_records`] builds a non-empty ledger from outside, so
/// a duplicate or empty product in stored data is an error rather than a
/// broken ledger. The stored form lives in [`crate::codec`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    records: Vec<StockRecord>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Ledger::default()
    }

    /// Builds a ledger from records, checking its invariants.
    ///
    /// ## Errors
    /// - `ValidationError::Required` if a product name is empty
    /// - `ValidationError::Duplicate` if two records share a product name
    pub fn from_records(records: Vec<StockRecord>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::with_capacity(records.len());

        for record in &records {
            if record.product.is_empty() {
                return Err(ValidationError::required("product"));
            }
            if !seen.insert(record.product.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "product".to_string(),
                    value: record.product.clone(),
                });
            }
        }

        Ok(Ledger { records })
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    /// Looks up a record by exact product name.
    pub fn get(&self, product: &str) -> Option<&StockRecord> {
        self.records.iter().find(|r| r.product == product)
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[StockRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StockRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, product: &str) -> Option<usize> {
        self.records.iter().position(|r| r.product == product)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds stock for a new or existing product.
    ///
    /// ## Behavior
    /// - Existing product: quantity is incremented. The stored category wins
    ///   under [`CategoryMismatchPolicy::KeepExisting`]; under
    ///   [`CategoryMismatchPolicy::Reject`] a different category is refused.
    /// - New product: a record is appended with the given quantity.
    ///
    /// ## Example
    /// ```rust
    /// use nellito_core::{AddStockRequest, Ledger, LedgerSettings};
    ///
    /// let settings = LedgerSettings::default();
    /// let mut ledger = Ledger::new();
    ///
    /// ledger.add_stock(&AddStockRequest::new("Cone", "Waffle", "3"), &settings).unwrap();
    /// ledger.add_stock(&AddStockRequest::new("Cone", "Waffle", "3"), &settings).unwrap();
    ///
    /// assert_eq!(ledger.len(), 1);
    /// assert_eq!(ledger.get("Waffle").unwrap().quantity, 6);
    /// ```
    pub fn add_stock(
        &mut self,
        request: &AddStockRequest,
        settings: &LedgerSettings,
    ) -> LedgerResult<StockChange> {
        let input = request.validate(settings)?;

        match self.position(input.product) {
            Some(index) => {
                let record = &self.records[index];

                if record.category != input.category
                    && settings.category_mismatch == CategoryMismatchPolicy::Reject
                {
                    return Err(ValidationError::CategoryMismatch {
                        product: record.product.clone(),
                        existing: record.category.clone(),
                        requested: input.category.to_string(),
                    }
                    .into());
                }

                self.increment(index, input.quantity)
            }
            None => {
                let record = StockRecord::new(input.category, input.product, input.quantity);
                let change = StockChange {
                    category: record.category.clone(),
                    product: record.product.clone(),
                    previous: 0,
                    current: record.quantity,
                    created: true,
                };
                self.records.push(record);
                Ok(change)
            }
        }
    }

    /// Records an incoming movement against an existing product.
    ///
    /// Unknown products are not created here; use [`Ledger::add_stock`].
    pub fn record_entry(&mut self, request: &MovementRequest) -> LedgerResult<StockChange> {
        let movement = request.validate()?;

        let index = self
            .position(movement.product)
            .ok_or_else(|| LedgerError::ProductNotFound(movement.product.to_string()))?;

        self.increment(index, movement.quantity)
    }

    /// Records an outgoing movement.
    ///
    /// ## Errors (in priority order)
    /// 1. `Validation` - malformed input
    /// 2. `ProductNotFound` - unknown product
    /// 3. `InsufficientStock` - more requested than on hand
    ///
    /// Taking exactly what is on hand is allowed and leaves a zero-quantity
    /// record in place.
    pub fn record_exit(&mut self, request: &MovementRequest) -> LedgerResult<StockChange> {
        let movement = request.validate()?;

        let index = self
            .position(movement.product)
            .ok_or_else(|| LedgerError::ProductNotFound(movement.product.to_string()))?;

        let record = &mut self.records[index];
        let previous = record.quantity;

        let current = previous
            .checked_sub(movement.quantity)
            .ok_or_else(|| LedgerError::InsufficientStock {
                product: record.product.clone(),
                available: previous,
                requested: movement.quantity,
            })?;

        record.quantity = current;

        Ok(StockChange {
            category: record.category.clone(),
            product: record.product.clone(),
            previous,
            current,
            created: false,
        })
    }

    fn increment(&mut self, index: usize, quantity: u32) -> LedgerResult<StockChange> {
        let record = &mut self.records[index];
        let previous = record.quantity;

        let current = previous
            .checked_add(quantity)
            .ok_or_else(|| ValidationError::QuantityOverflow {
                product: record.product.clone(),
                current: previous,
                added: quantity,
                max: u32::MAX,
            })?;

        record.quantity = current;

        Ok(StockChange {
            category: record.category.clone(),
            product: record.product.clone(),
            previous,
            current,
            created: false,
        })
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a StockRecord;
    type IntoIter = std::slice::Iter<'a, StockRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
