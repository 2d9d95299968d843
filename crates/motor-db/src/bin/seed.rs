//! # Seed Data Generator
//!
//! Populates the database with sample motor products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 200 products (default)
//! cargo run -p motor-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p motor-db --bin seed -- --count 1000
//!
//! # Specify database path
//! cargo run -p motor-db --bin seed -- --db ./data/motor.db
//! ```
//!
//! ## Generated Products
//! Cycles through every (code, vehicle class, location) combination, so each
//! code ends up with a family of rows for bulk update/delete to act on.
//! Prices are rounded to the cent through `Money`.

use anyhow::{bail, Context};
use std::env;

use motor_core::{Money, NewProduct};
use motor_db::{Database, DbConfig, ProductStore};

/// Product family codes with a base premium.
const CODES: &[(&str, f64)] = &[
    ("1000", 300.0),
    ("2000", 450.5),
    ("3000", 620.25),
    ("4000", 180.75),
    ("5000", 999.99),
];

/// Vehicle classes, with a premium multiplier.
const VEHICLES: &[(&str, f64)] = &[
    ("Sedan", 1.0),
    ("SUV", 1.235),
    ("Hatchback", 0.915),
    ("Pickup", 1.1175),
    ("Motorcycle", 0.4325),
];

const LOCATIONS: &[&str] = &["West Malaysia", "East Malaysia", "Singapore", "Brunei"];

const DEFAULT_COUNT: usize = 200;
const DEFAULT_DB: &str = "./data/motor.db";

struct Args {
    count: usize,
    db_path: String,
}

fn parse_args() -> anyhow::Result<Option<Args>> {
    let args: Vec<String> = env::args().collect();

    let mut parsed = Args {
        count: DEFAULT_COUNT,
        db_path: DEFAULT_DB.to_string(),
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                let value = args.get(i + 1).context("--count needs a value")?;
                parsed.count = value
                    .parse()
                    .with_context(|| format!("invalid --count: {}", value))?;
                i += 1;
            }
            "--db" | "-d" => {
                parsed.db_path = args.get(i + 1).context("--db needs a value")?.clone();
                i += 1;
            }
            "--help" | "-h" => {
                println!("Motor Catalog Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!(
                    "  -c, --count <N>    Number of products to generate (default: {})",
                    DEFAULT_COUNT
                );
                println!(
                    "  -d, --db <PATH>    Database file path (default: {})",
                    DEFAULT_DB
                );
                println!("  -h, --help         Show this help message");
                return Ok(None);
            }
            other => bail!("unknown argument: {}", other),
        }
        i += 1;
    }

    Ok(Some(parsed))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Some(args) = parse_args()? else {
        return Ok(());
    };

    println!("🌱 Motor Catalog Seed Data Generator");
    println!("====================================");
    println!("Database: {}", args.db_path);
    println!("Products: {}", args.count);
    println!();

    let db = Database::new(DbConfig::new(&args.db_path))
        .await
        .context("failed to open database")?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let repo = db.products();

    let existing = repo.count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating products...");

    let start = std::time::Instant::now();
    let mut generated = 0;

    for index in 0..args.count {
        let product = generate_product(index)?;

        if let Err(e) = repo.insert(&product).await {
            eprintln!("Failed to insert {}: {}", product.code, e);
            continue;
        }

        generated += 1;
        if generated % 50 == 0 {
            println!("  Generated {} products...", generated);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} products in {:?}", generated, elapsed);

    for (code, _) in CODES {
        let family = repo
            .find(&motor_core::ProductFilter::by_code(*code).predicates())
            .await?;
        println!("  Code {}: {} products", code, family.len());
    }

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds the `index`-th sample product.
fn generate_product(index: usize) -> anyhow::Result<NewProduct> {
    let (code, base) = CODES[index % CODES.len()];
    let (vehicle, factor) = VEHICLES[(index / CODES.len()) % VEHICLES.len()];
    let location = LOCATIONS[(index / (CODES.len() * VEHICLES.len())) % LOCATIONS.len()];

    // Multipliers with four decimals produce third-digit values that exercise rounding
    let price = Money::from_f64(base * factor)?;

    Ok(NewProduct {
        code: code.to_string(),
        description: Some(vehicle.to_string()),
        location: location.to_string(),
        price,
    })
}
