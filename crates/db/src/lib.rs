//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access, including the account
//!   directory and journal store used by the ledger service
//! - Database migrations
//! - Idempotent identity seeding

pub mod entities;
pub mod migration;
pub mod repositories;
pub mod seed;

pub use migration::Migrator;
pub use repositories::{
    AccountRepository, JournalEntryRepository, JournalEntryWithLines, TransactionRepository,
    UserAccess, UserRepository,
};
pub use seed::{AdminSeed, SeedError, seed_identity};

use bookwise_shared::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection pool sized from configuration.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .sqlx_logging(false);

    Database::connect(options).await
}
