//! # nellito-core: Pure Ledger Logic for Nellito Stock
//!
//! Inventory rules for a single ice-cream shop: how stock records are
//! created, merged, incremented and decremented, and which of them need
//! restocking. Zero I/O and no logging; callers decide when to load, save
//! and report.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Nellito Stock Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               Presentation (CLI today, any UI later)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            StockController (apps/nellito)                       │   │
//! │  │    init → load    mutation → save    report → read              │   │
//! │  └──────────────┬──────────────────────────────┬───────────────────┘   │
//! │                 │                              │                        │
//! │  ┌──────────────▼───────────────┐  ┌───────────▼───────────────────┐   │
//! │  │ ★ nellito-core (THIS CRATE) ★│  │  nellito-db                   │   │
//! │  │  Ledger  validation  report  │  │  key-value store, LedgerStore │   │
//! │  │  codec                       │  │                               │   │
//! │  └──────────────────────────────┘  └───────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`ledger`] - The Ledger and its three mutations
//! - [`validation`] - Raw form input → typed values
//! - [`report`] - Low-stock flags and totals
//! - [`codec`] - Stored JSON format
//! - [`types`] - StockRecord, LedgerSettings, StockChange
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use nellito_core::{AddStockRequest, Ledger, LedgerSettings, MovementRequest};
//!
//! let settings = LedgerSettings::default();
//! let mut ledger = Ledger::new();
//!
//! ledger.add_stock(&AddStockRequest::new("Cone", "Waffle", "3"), &settings).unwrap();
//! ledger.record_exit(&MovementRequest::new("Waffle", "3")).unwrap();
//!
//! let waffle = ledger.get("Waffle").unwrap();
//! assert_eq!(waffle.quantity, 0);
//! assert!(ledger.low_stock(settings.low_stock_threshold)[0].needs_restock);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod codec;
pub mod error;
pub mod ledger;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CodecError, LedgerError, LedgerErrorKind, LedgerResult, ValidationError};
pub use ledger::Ledger;
pub use report::{StockReport, StockStatus};
pub use types::*;
pub use validation::{AddStockRequest, MovementRequest};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Restock threshold used when none is configured.
///
/// A record with fewer units than this is flagged.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;

/// Category set used when none is configured.
pub const DEFAULT_CATEGORIES: &[&str] = &["Popsicle", "IceCream", "Topping", "Cone"];
