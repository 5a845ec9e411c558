//! # Stock Report
//!
//! Read-only view of the ledger annotated with restock flags.
//!
//! Nothing here mutates the ledger; building the same report twice from
//! the same ledger yields the same value.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::ledger::Ledger;
use crate::types::StockRecord;

/// One record paired with its restock flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockStatus {
    pub record: StockRecord,
    pub needs_restock: bool,
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}: {}",
            self.record.category, self.record.product, self.record.quantity
        )?;
        if self.needs_restock {
            write!(f, " (restock needed)")?;
        }
        Ok(())
    }
}

impl Ledger {
    /// Flags every record below `threshold`, in ledger order.
    ///
    /// ## Example
    /// ```rust
    /// use nellito_core::{Ledger, StockRecord};
    ///
    /// let ledger = Ledger::from_records(vec![
    ///     StockRecord::new("Cone", "Waffle", 4),
    ///     StockRecord::new("Cone", "Sugar", 5),
    /// ]).unwrap();
    ///
    /// let flags: Vec<bool> = ledger.low_stock(5).iter().map(|s| s.needs_restock).collect();
    /// assert_eq!(flags, [true, false]);
    /// ```
    pub fn low_stock(&self, threshold: u32) -> Vec<StockStatus> {
        self.iter()
            .map(|record| StockStatus {
                needs_restock: record.needs_restock(threshold),
                record: record.clone(),
            })
            .collect()
    }
}

/// Ledger-wide summary built on top of [`Ledger::low_stock`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockReport {
    pub threshold: u32,
    pub lines: Vec<StockStatus>,
    pub total_products: usize,
    /// Sum of all quantities. Wider than a single quantity so it cannot wrap.
    #[ts(type = "number")]
    pub total_units: u64,
    pub restock_count: usize,
}

impl StockReport {
    pub fn build(ledger: &Ledger, threshold: u32) -> Self {
        let lines = ledger.low_stock(threshold);
        let total_units = ledger.iter().map(|r| u64::from(r.quantity)).sum();
        let restock_count = lines.iter().filter(|l| l.needs_restock).count();

        StockReport {
            threshold,
            total_products: lines.len(),
            total_units,
            restock_count,
            lines,
        }
    }

    /// Only the lines flagged for restock.
    pub fn restock_lines(&self) -> impl Iterator<Item = &StockStatus> {
        self.lines.iter().filter(|l| l.needs_restock)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Ledger {
        Ledger::from_records(vec![
            StockRecord::new("Popsicle", "Lemon", 12),
            StockRecord::new("Cone", "Waffle", 4),
            StockRecord::new("Cone", "Sugar", 5),
            StockRecord::new("Topping", "Fudge", 0),
        ])
        .unwrap()
    }

    #[test]
    fn test_threshold_is_strict() {
        let statuses = sample().low_stock(5);
        let flags: Vec<(&str, bool)> = statuses
            .iter()
            .map(|s| (s.record.product.as_str(), s.needs_restock))
            .collect();
        assert_eq!(
            flags,
            [("Lemon", false), ("Waffle", true), ("Sugar", false), ("Fudge", true)]
        );
    }

    #[test]
    fn test_query_is_idempotent_and_pure() {
        let ledger = sample();
        let before = ledger.clone();
        assert_eq!(ledger.low_stock(5), ledger.low_stock(5));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_display_line() {
        let statuses = sample().low_stock(5);
        assert_eq!(statuses[0].to_string(), "Popsicle - Lemon: 12");
        assert_eq!(statuses[1].to_string(), "Cone - Waffle: 4 (restock needed)");
    }

    #[test]
    fn test_report_totals() {
        let report = StockReport::build(&sample(), 5);
        assert_eq!(report.total_products, 4);
        assert_eq!(report.total_units, 21);
        assert_eq!(report.restock_count, 2);

        let restock: Vec<&str> = report
            .restock_lines()
            .map(|l| l.record.product.as_str())
            .collect();
        assert_eq!(restock, ["Waffle", "Fudge"]);
    }

    #[test]
    fn test_empty_ledger_report() {
        let report = StockReport::build(&Ledger::new(), 5);
        assert!(report.lines.is_empty());
        assert_eq!(report.total_units, 0);
        assert_eq!(report.restock_count, 0);
    }
}
