//! # Seed Data Generator
//!
//! Populates the database with the electrical-goods starter catalog for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file
//! cargo run -p ampere-db --bin seed
//!
//! # Specify database path
//! cargo run -p ampere-db --bin seed -- --db ./data/ampere.db
//! ```
//!
//! ## Generated Data
//! - Starter catalog: LED bulbs and tube lights, copper wire (loose and
//!   packed), switches — with prices, stock levels, and costs
//! - Three sample customers with zero opening balances
//!
//! Seeding is skipped when the database already has products, so it is safe
//! to run on every dev setup.

use chrono::Utc;
use std::env;
use uuid::Uuid;

use ampere_core::{Customer, Product, Unit};
use ampere_db::{Database, DbConfig, Store};

/// Starter catalog: (name, category, unit, price rupees, cost rupees, stock, watts)
const CATALOG: &[(&str, &str, Unit, i64, Option<i64>, i64, Option<&str>)] = &[
    ("LED Bulb 12W", "Bulbs", Unit::Piece, 350, Some(220), 120, Some("12W")),
    ("LED Bulb 18W", "Bulbs", Unit::Piece, 520, Some(340), 80, Some("18W")),
    ("LED Tube Light 20W", "Bulbs", Unit::Piece, 950, Some(640), 60, Some("20W")),
    ("Copper Wire 1.5mm", "Wires", Unit::Meter, 120, Some(85), 1_000, None),
    ("Copper Wire 2.5mm (Pack of 90m)", "Wires", Unit::Pack, 9_500, Some(7_200), 15, None),
    ("Switch 2-Gang", "Switches", Unit::Piece, 280, Some(160), 200, None),
];

/// Sample customers: (name, phone, address)
const CUSTOMERS: &[(&str, &str, &str)] = &[
    ("Ahmad Ali", "03001234567", "Lahore"),
    ("Sara Khan", "03017654321", "Faisalabad"),
    ("Hassan Raza", "03005551234", "Multan"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./ampere_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Ampere POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./ampere_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Ampere POS Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;
    let store = db.store();

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = store.products().await?;
    if !existing.is_empty() {
        println!("⚠ Database already has {} products", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding starter catalog...");

    let now = Utc::now();

    for (name, category, unit, price_rs, cost_rs, stock, watts) in CATALOG {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            category: category.to_string(),
            unit: *unit,
            unit_price_paisa: price_rs * 100,
            unit_cost_paisa: cost_rs.map(|c| c * 100),
            stock: *stock,
            watts: watts.map(str::to_string),
            created_at: now,
        };
        store.insert_product(&product).await?;
        println!("  + {} (stock {})", product.name, product.stock);
    }

    println!();
    println!("Seeding sample customers...");

    for (name, phone, address) in CUSTOMERS {
        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            phone: phone.to_string(),
            email: None,
            address: Some(address.to_string()),
            total_due_paisa: 0,
            created_at: now,
        };
        store.insert_customer(&customer).await?;
        println!("  + {} ({})", customer.name, customer.phone);
    }

    println!();
    println!(
        "✓ Seed complete: {} products, {} customers",
        CATALOG.len(),
        CUSTOMERS.len()
    );

    Ok(())
}
