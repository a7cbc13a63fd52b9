//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Each one reports failures with the matching domain error from
//! `bookwise-core`, so handlers never see a raw `DbErr`.

pub mod account;
pub mod journal_entry;
pub mod transaction;
pub mod user;

pub use account::AccountRepository;
pub use journal_entry::{JournalEntryRepository, JournalEntryWithLines};
pub use transaction::TransactionRepository;
pub use user::{UserAccess, UserRepository};

use sea_orm::{DbErr, SqlErr};

/// True when the store rejected a write on a unique index.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// True when the store rejected a write on a foreign key.
pub(crate) fn is_foreign_key_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}
