//! Database seeder for Bookwise development.
//!
//! Seeds the identity roles and administrator, then a small demo chart of
//! accounts. Safe to run repeatedly; existing rows are left alone.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use bookwise_core::account::{AccountDetails, AccountType};
use bookwise_db::{AccountRepository, AdminSeed, connect, seed_identity};
use bookwise_shared::AppConfig;
use sea_orm::DatabaseConnection;

/// Demo chart of accounts: code, name, type.
const DEMO_ACCOUNTS: &[(&str, &str, AccountType)] = &[
    ("1000", "Cash", AccountType::Asset),
    ("1100", "Bank", AccountType::Asset),
    ("1200", "Accounts Receivable", AccountType::Asset),
    ("2000", "Accounts Payable", AccountType::Liability),
    ("3000", "Owner's Equity", AccountType::Equity),
    ("4000", "Sales", AccountType::Revenue),
    ("5000", "Cost of Goods Sold", AccountType::Expense),
    ("6000", "Office Supplies", AccountType::Expense),
    ("6100", "Rent", AccountType::Expense),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    println!("Connecting to database...");
    let db = connect(&config.database)
        .await
        .context("Failed to connect to database")?;

    println!("Seeding roles and admin user...");
    let admin_id = seed_identity(&db, &AdminSeed::from(&config.seed)).await?;
    println!("  Admin user: {admin_id}");

    println!("Seeding chart of accounts...");
    seed_accounts(&db).await?;

    println!("Seeding complete!");
    Ok(())
}

async fn seed_accounts(db: &DatabaseConnection) -> anyhow::Result<()> {
    let repo = AccountRepository::new(db.clone());

    for &(code, name, account_type) in DEMO_ACCOUNTS {
        if repo.code_exists(code, None).await? {
            println!("  {code} already exists, skipping...");
            continue;
        }

        let details = AccountDetails::new(code, name, account_type)?;
        repo.create(&details).await?;
        println!("  Created {code} {name}");
    }

    Ok(())
}
