//! # Seed Data Generator
//!
//! Populates the database with development data for the reconciliation
//! dashboard.
//!
//! ## Usage
//! ```bash
//! # Seed 30 days of data (default)
//! cargo run -p tillkeep-db --bin seed
//!
//! # Custom span
//! cargo run -p tillkeep-db --bin seed -- --days 90
//!
//! # Specify database path
//! cargo run -p tillkeep-db --bin seed -- --db ./data/tillkeep.db
//! ```
//!
//! ## Generated Data
//! - A small staff directory (manager + cashiers)
//! - One close-out row per cashier per day, with the occasional counted
//!   variance so the dashboard has discrepancies to show
//! - Cash/card/other invoices matching the close-out volumes
//! - A handful of withdrawals spread across the span
//!
//! Amounts are derived from the day index, so reseeding a fresh database
//! is deterministic.

use chrono::{Duration, TimeZone, Utc};
use std::env;
use uuid::Uuid;

use tillkeep_core::{Money, StaffRole, TenderType, Withdrawal};
use tillkeep_db::{Database, DbConfig};

/// Seeded staff: (id, name, role).
const STAFF: &[(&str, &str, StaffRole)] = &[
    ("admin-sam", "Sam Ortiz", StaffRole::Manager),
    ("op-dana", "Dana Reyes", StaffRole::Cashier),
    ("op-luca", "Luca Moretti", StaffRole::Cashier),
    ("op-mei", "Mei Tanaka", StaffRole::Cashier),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut days: i64 = 30;
    let mut db_path = String::from("./tillkeep_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--days" | "-n" => {
                if i + 1 < args.len() {
                    days = args[i + 1].parse().unwrap_or(30);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Tillkeep Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -n, --days <N>     Days of history to generate (default: 30)");
                println!("  -d, --db <PATH>    Database file path (default: ./tillkeep_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Tillkeep Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!("Days:     {}", days);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.balances().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} balance entries", existing);
        println!("  Skipping seed to avoid duplicate close-outs.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Staff directory
    for (id, name, role) in STAFF {
        db.directory().upsert(id, name, *role).await?;
    }
    println!("✓ {} staff rows", STAFF.len());

    let today = Utc::now().date_naive();
    let cashiers: Vec<&str> = STAFF
        .iter()
        .filter(|(_, _, role)| *role == StaffRole::Cashier)
        .map(|(id, _, _)| *id)
        .collect();

    let mut balance_rows = 0;
    let mut invoice_rows = 0;

    for day_offset in 0..days {
        let day = today - Duration::days(day_offset);

        for (cashier_idx, cashier) in cashiers.iter().enumerate() {
            // Deterministic but varied volumes per cashier-day
            let wave = (day_offset + cashier_idx as i64 * 7) % 11;
            let opening = Money::from_cents(10_000);
            let cash = Money::from_cents(42_000 + wave * 3_150);
            let card = Money::from_cents(28_500 + wave * 2_075);

            // Every 9th close-out is short by 1.25 so variances show up
            let variance = if (day_offset + cashier_idx as i64) % 9 == 0 {
                Money::from_cents(-125)
            } else {
                Money::zero()
            };
            let closing = opening + cash + card + variance;

            db.balances()
                .record_close_out(cashier, day, opening, cash, card, closing)
                .await?;
            balance_rows += 1;

            // Invoices roughly matching the close-out volumes
            db.invoices()
                .record_invoice(day, TenderType::Cash, cash)
                .await?;
            db.invoices()
                .record_invoice(day, TenderType::Card, card)
                .await?;
            invoice_rows += 2;
        }

        // Store-credit sale every few days; counted but never summed
        if day_offset % 5 == 0 {
            db.invoices()
                .record_invoice(day, TenderType::Other, Money::from_cents(1_999))
                .await?;
            invoice_rows += 1;
        }
    }

    println!("✓ {} balance entries", balance_rows);
    println!("✓ {} invoices", invoice_rows);

    // A withdrawal every fourth day, recorded by the manager
    let mut withdrawal_rows = 0;
    for day_offset in (0..days).step_by(4) {
        let day = today - Duration::days(day_offset);
        let created_at = Utc.from_utc_datetime(
            &day.and_hms_opt(18, 30, 0)
                .expect("18:30:00 is always a valid time of day"),
        );

        let withdrawal = Withdrawal {
            id: Uuid::new_v4().to_string(),
            admin_id: "admin-sam".to_string(),
            amount: Money::from_cents(10_000 + day_offset * 500),
            note: if day_offset % 8 == 0 {
                Some("bank deposit".to_string())
            } else {
                None
            },
            created_at,
            withdrawn_on: created_at.date_naive(),
        };
        db.withdrawals().insert(&withdrawal).await?;
        withdrawal_rows += 1;
    }

    println!("✓ {} withdrawals", withdrawal_rows);
    println!();
    println!("Done. Point the reconciliation service at {}", db_path);

    Ok(())
}
