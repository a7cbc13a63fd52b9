//! Simple income and expense transactions.
//!
//! A transaction posts a single positive amount against one account. The kind
//! decides the sign used when amounts are aggregated.

pub mod error;
pub mod types;

pub use error::TransactionError;
pub use types::{
    CATEGORY_MAX_LEN, DESCRIPTION_MAX_LEN, REFERENCE_MAX_LEN, TransactionDetails, TransactionDraft,
    TransactionKind,
};
