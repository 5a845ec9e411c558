//! # Domain Types
//!
//! Core domain types used throughout Nellito Stock.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────────┐      │
//! │  │  StockRecord    │   │  LedgerSettings  │   │  StockChange    │      │
//! │  │  ─────────────  │   │  ──────────────  │   │  ─────────────  │      │
//! │  │  category       │   │  categories      │   │  product        │      │
//! │  │  product (key)  │   │  low_stock_      │   │  previous       │      │
//! │  │  quantity >= 0  │   │    threshold     │   │  current        │      │
//! │  └─────────────────┘   │  category_       │   │  created        │      │
//! │                        │    mismatch      │   └─────────────────┘      │
//! │                        └──────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persisted Field Names
//! `StockRecord` keeps the field names the shop's stored data has always
//! used (`categoria`, `produto`, `quantidade`) so existing blobs load as-is.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::{DEFAULT_CATEGORIES, DEFAULT_LOW_STOCK_THRESHOLD};

// =============================================================================
// Stock Record
// =============================================================================

/// One product's category and current quantity.
///
/// `product` is the ledger key: exact, case- and whitespace-sensitive.
/// `quantity` is unsigned, so a negative count cannot be represented, and a
/// stored negative value fails to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockRecord {
    /// Category name, fixed when the record is created.
    #[serde(rename = "categoria")]
    pub category: String,

    /// Product name (unique key).
    #[serde(rename = "produto")]
    pub product: String,

    /// Units on hand.
    #[serde(rename = "quantidade")]
    pub quantity: u32,
}

impl StockRecord {
    pub fn new(category: impl Into<String>, product: impl Into<String>, quantity: u32) -> Self {
        StockRecord {
            category: category.into(),
            product: product.into(),
            quantity,
        }
    }

    /// Whether this record is below the given restock threshold.
    ///
    /// The comparison is strict: a quantity equal to the threshold is fine.
    #[inline]
    pub fn needs_restock(&self, threshold: u32) -> bool {
        self.quantity < threshold
    }
}

// =============================================================================
// Category Mismatch Policy
// =============================================================================

/// What `add_stock` does when the product exists under another category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CategoryMismatchPolicy {
    /// Merge the quantity and keep the category the record already has.
    #[default]
    KeepExisting,
    /// Refuse the add with `ValidationError::CategoryMismatch`.
    Reject,
}

impl fmt::Display for CategoryMismatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryMismatchPolicy::KeepExisting => write!(f, "keep_existing"),
            CategoryMismatchPolicy::Reject => write!(f, "reject"),
        }
    }
}

impl FromStr for CategoryMismatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keep_existing" | "keep-existing" | "keep" => Ok(CategoryMismatchPolicy::KeepExisting),
            "reject" => Ok(CategoryMismatchPolicy::Reject),
            other => Err(format!("unknown category mismatch policy: {}", other)),
        }
    }
}

// =============================================================================
// Ledger Settings
// =============================================================================

/// Externally supplied configuration the ledger validates against.
///
/// The ledger reads these values but never owns or changes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSettings {
    /// Allowed category names, in display order.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// Records with fewer units than this are flagged for restock.
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: u32,

    /// Behaviour of `add_stock` on a category mismatch.
    #[serde(default)]
    pub category_mismatch: CategoryMismatchPolicy,
}

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

fn default_low_stock_threshold() -> u32 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

impl Default for LedgerSettings {
    fn default() -> Self {
        LedgerSettings {
            categories: default_categories(),
            low_stock_threshold: default_low_stock_threshold(),
            category_mismatch: CategoryMismatchPolicy::default(),
        }
    }
}

impl LedgerSettings {
    /// Checks whether `category` is one of the configured names (exact match).
    pub fn is_known_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

// =============================================================================
// Stock Change
// =============================================================================

/// What a successful mutation did to a single record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockChange {
    pub category: String,
    pub product: String,
    /// Quantity before the operation (0 for a new record).
    pub previous: u32,
    /// Quantity after the operation.
    pub current: u32,
    /// True when the operation appended a new record.
    pub created: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================
