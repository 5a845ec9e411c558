//! # CLI Commands
//!
//! Thin layer between the command line and [`StockController`]: parse,
//! call one controller operation, render the result as text.
//!
//! ## Command Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command              Controller call          Output                   │
//! │  ───────              ───────────────          ──────                   │
//! │  add                  add_stock()              change summary           │
//! │  entry                record_entry()           change summary           │
//! │  exit                 record_exit()            change summary           │
//! │  list [--restock-only] report()                one line per product     │
//! │  categories           categories()             one name per line        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Quantities are taken as raw text so the ledger's own parsing decides
//! what is valid.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use nellito_core::{AddStockRequest, MovementRequest, StockReport};
use nellito_db::KeyValueStore;

use crate::controller::{MutationOutcome, StockController};
use crate::error::ApiResult;

#[derive(Debug, Parser)]
#[command(name = "nellito", version, about = "Ice cream shop stock ledger")]
pub struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add stock for a product, creating it if new.
    Add {
        #[arg(long)]
        category: String,
        #[arg(long)]
        product: String,
        #[arg(long, allow_hyphen_values = true)]
        quantity: String,
    },

    /// Record units arriving for an existing product.
    Entry {
        #[arg(long)]
        product: String,
        #[arg(long, allow_hyphen_values = true)]
        quantity: String,
    },

    /// Record units leaving for an existing product.
    Exit {
        #[arg(long)]
        product: String,
        #[arg(long, allow_hyphen_values = true)]
        quantity: String,
    },

    /// Show every product with its restock flag.
    List {
        /// Only products below the restock threshold.
        #[arg(long)]
        restock_only: bool,
    },

    /// Show the configured categories.
    Categories,
}

/// Runs one command and returns the text to print.
pub async fn execute<S: KeyValueStore>(
    controller: &mut StockController<S>,
    command: Command,
) -> ApiResult<String> {
    let output = match command {
        Command::Add {
            category,
            product,
            quantity,
        } => {
            let outcome = controller
                .add_stock(AddStockRequest::new(category, product, quantity))
                .await?;
            render_outcome(&outcome)
        }
        Command::Entry { product, quantity } => {
            let outcome = controller
                .record_entry(MovementRequest::new(product, quantity))
                .await?;
            render_outcome(&outcome)
        }
        Command::Exit { product, quantity } => {
            let outcome = controller
                .record_exit(MovementRequest::new(product, quantity))
                .await?;
            render_outcome(&outcome)
        }
        Command::List { restock_only } => render_report(&controller.report(), restock_only),
        Command::Categories => controller.categories().join("\n"),
    };

    Ok(output)
}

fn render_outcome(outcome: &MutationOutcome) -> String {
    let change = &outcome.change;
    let mut out = if change.created {
        format!(
            "Added {} - {}: {}",
            change.category, change.product, change.current
        )
    } else {
        format!(
            "Updated {} - {}: {} -> {}",
            change.category, change.product, change.previous, change.current
        )
    };

    if !outcome.persisted {
        out.push_str("\nwarning: change was not saved and will be lost on exit");
    }
    out
}

fn render_report(report: &StockReport, restock_only: bool) -> String {
    if report.lines.is_empty() {
        return "No products in stock".to_string();
    }

    let mut out = String::new();
    for line in report.lines.iter().filter(|l| !restock_only || l.needs_restock) {
        out.push_str(&format!("{}\n", line));
    }

    out.push_str(&format!(
        "{} products, {} units, {} below {}",
        report.total_products, report.total_units, report.restock_count, report.threshold
    ));
    out
}
