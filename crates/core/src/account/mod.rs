//! Chart of accounts.
//!
//! Account codes are unique across the whole chart. Uniqueness needs storage,
//! so it is checked by the repository; this module owns the field rules.

pub mod error;
pub mod types;

pub use error::AccountError;
pub use types::{AccountDetails, AccountType, CODE_MAX_LEN, NAME_MAX_LEN};
