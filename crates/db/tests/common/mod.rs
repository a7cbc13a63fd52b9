//! Shared setup for repository tests.

#![allow(dead_code)]

use bookwise_core::account::{AccountDetails, AccountType};
use bookwise_db::entities::users;
use bookwise_db::{AccountRepository, Migrator};
use bookwise_shared::types::{AccountId, UserId};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;

/// Fresh in-memory database with the full schema.
///
/// A single pooled connection keeps every query on the same in-memory file.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

/// Creates an account and returns its id.
pub async fn create_account(
    db: &DatabaseConnection,
    code: &str,
    name: &str,
    account_type: AccountType,
) -> AccountId {
    let details = AccountDetails::new(code, name, account_type).expect("valid account");
    let model = AccountRepository::new(db.clone())
        .create(&details)
        .await
        .expect("Failed to create account");
    AccountId::new(model.id)
}

/// Inserts a user with no roles and returns its id.
pub async fn create_user(db: &DatabaseConnection, email: &str) -> UserId {
    let id = UserId::new();
    users::ActiveModel {
        id: Set(id.into_inner()),
        email: Set(email.to_string()),
        password_hash: Set("not-a-real-hash".to_string()),
        created_at: Set(chrono::Utc::now().into()),
    }
    .insert(db)
    .await
    .expect("Failed to create user");
    id
}
