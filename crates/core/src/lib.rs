//! Core business logic for Bookwise.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Storage is reached only through the traits in [`ledger`].
//!
//! # Modules
//!
//! - `ledger` - Journal entries, double-entry validation, batch commit
//! - `account` - Chart of accounts fields and errors
//! - `transaction` - Income and expense transactions
//! - `auth` - Password hashing for the seeded administrator
//! - `fields` - Text and money normalization shared by the above

pub mod account;
pub mod auth;
pub mod fields;
pub mod ledger;
pub mod transaction;
