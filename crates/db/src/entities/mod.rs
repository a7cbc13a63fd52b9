//! `SeaORM` entity definitions.

pub mod prelude;

pub mod accounts;
pub mod journal_entries;
pub mod journal_entry_lines;
pub mod roles;
pub mod sea_orm_active_enums;
pub mod transactions;
pub mod user_roles;
pub mod users;
