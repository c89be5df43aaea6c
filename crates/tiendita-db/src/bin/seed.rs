//! # Seed Snapshot Writer
//!
//! Writes the demo marketplace (three users, one open store, two products)
//! to a snapshot file.
//!
//! ## Usage
//! ```bash
//! # Write ./db.json if it does not exist yet
//! cargo run -p tiendita-db --bin seed
//!
//! # Specify the snapshot path
//! cargo run -p tiendita-db --bin seed -- --db ./data/db.json
//!
//! # Throw away existing data and start over
//! cargo run -p tiendita-db --bin seed -- --force
//! ```

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use tiendita_db::{seed_snapshot, SnapshotStore, StoreConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = PathBuf::from("./db.json");
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                println!("Tiendita Seed Snapshot Writer");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Snapshot file path (default: ./db.json)");
                println!("  -f, --force        Overwrite an existing snapshot");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {other}"),
        }
        i += 1;
    }

    println!("🌱 Tiendita Seed Snapshot Writer");
    println!("================================");
    println!("Snapshot: {}", db_path.display());
    println!();

    let existed = tokio::fs::try_exists(&db_path)
        .await
        .with_context(|| format!("cannot inspect {}", db_path.display()))?;

    if existed && !force {
        println!("⚠ Snapshot already exists.");
        println!("  Skipping seed to keep existing data.");
        println!("  Pass --force to overwrite it.");
        return Ok(());
    }

    if existed {
        tokio::fs::remove_file(&db_path)
            .await
            .with_context(|| format!("cannot remove {}", db_path.display()))?;
        println!("✓ Existing snapshot removed");
    }

    // Opening a missing file writes the seed
    let store = SnapshotStore::open(StoreConfig::new(&db_path))
        .await
        .context("failed to write seed snapshot")?;
    let seeded = store.read(|s| *s == seed_snapshot()).await?;
    anyhow::ensure!(seeded, "snapshot at {} does not match the seed", db_path.display());

    println!("✓ Seed snapshot written");
    println!();
    println!("  alice@demo.com  consumer  (password 1234)");
    println!("  store@demo.com  store     (password 1234)");
    println!("  rider@demo.com  courier   (password 1234)");
    Ok(())
}
