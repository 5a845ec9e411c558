//! # Seed Data Generator
//!
//! Populates a database with sample ice-cream-shop stock for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./nellito_dev.db
//! cargo run -p nellito-db --bin seed
//!
//! # Specify database path and overwrite an existing ledger
//! cargo run -p nellito-db --bin seed -- --db ./data/nellito.db --force
//! ```
//!
//! Quantities are spread so some products land under the default restock
//! threshold and show up flagged.

use anyhow::Context;
use clap::Parser;
use nellito_core::{AddStockRequest, Ledger, LedgerSettings};
use nellito_db::{Database, DbConfig, LedgerStore, DEFAULT_LEDGER_KEY};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Sample products per default category.
const SAMPLE_STOCK: &[(&str, &[(&str, u32)])] = &[
    (
        "Popsicle",
        &[("Lemon", 24), ("Strawberry", 18), ("Coconut", 3), ("Grape", 9)],
    ),
    (
        "IceCream",
        &[("Vanilla", 12), ("Chocolate", 10), ("Pistachio", 2), ("Cream", 6)],
    ),
    ("Topping", &[("Fudge", 8), ("Caramel", 4), ("Sprinkles", 15)]),
    ("Cone", &[("Waffle", 40), ("Sugar", 30), ("Cup", 1)]),
];

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Nellito Stock seed data generator")]
struct Args {
    /// Database file path.
    #[arg(short, long, default_value = "./nellito_dev.db")]
    db: String,

    /// Key the ledger is stored under.
    #[arg(short, long, default_value = DEFAULT_LEDGER_KEY)]
    key: String,

    /// Overwrite a ledger that is already stored.
    #[arg(short, long)]
    force: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    let args = Args::parse();

    println!("🍦 Nellito Stock Seed Data Generator");
    println!("====================================");
    println!("Database: {}", args.db);
    println!("Key:      {}", args.key);
    println!();

    let db = Database::new(DbConfig::new(&args.db))
        .await
        .with_context(|| format!("opening {}", args.db))?;
    let store = LedgerStore::with_key(db.kv_store(), &args.key);

    if let Some(existing) = store.load().await? {
        if !args.force {
            println!("⚠ Ledger already has {} products", existing.len());
            println!("  Skipping seed. Pass --force to overwrite.");
            return Ok(());
        }
        info!(records = existing.len(), "Overwriting existing ledger");
    }

    let ledger = sample_ledger()?;
    store.save(&ledger).await?;

    let settings = LedgerSettings::default();
    let flagged = ledger
        .low_stock(settings.low_stock_threshold)
        .into_iter()
        .filter(|s| s.needs_restock)
        .count();

    println!("✓ Seeded {} products ({} below restock threshold)", ledger.len(), flagged);

    db.close().await;
    Ok(())
}

/// Builds the sample ledger through the normal add path, so seeded data
/// obeys the same rules as user input.
fn sample_ledger() -> anyhow::Result<Ledger> {
    let settings = LedgerSettings::default();
    let mut ledger = Ledger::new();

    for (category, products) in SAMPLE_STOCK {
        for (product, quantity) in products.iter() {
            let request = AddStockRequest::new(*category, *product, quantity.to_string());
            ledger
                .add_stock(&request, &settings)
                .with_context(|| format!("seeding {}", product))?;
        }
    }

    Ok(ledger)
}
