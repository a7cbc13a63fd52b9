//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration and written with the schema
//! builder, so the same files run against Postgres and SQLite.

pub use sea_orm_migration::prelude::*;

mod m20260110_000001_bookkeeping;
mod m20260110_000002_identity;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260110_000001_bookkeeping::Migration),
            Box::new(m20260110_000002_identity::Migration),
        ]
    }
}
