//! Double-entry bookkeeping logic.
//!
//! This module implements journal entries end to end:
//! - Drafts and results (`types`)
//! - Per-line, header, and balance rules (`validation`)
//! - The journal entry aggregate (`entry`)
//! - Account existence checks (`directory`)
//! - Single-entry creation and atomic batch commit (`service`)

pub mod directory;
pub mod entry;
pub mod error;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod service_props;
#[cfg(test)]
mod validation_props;

pub use directory::{AccountDirectory, ensure_accounts_exist};
pub use entry::{JournalEntry, JournalEntryLine};
pub use error::LedgerError;
pub use service::{JournalStore, LedgerService};
pub use types::{
    BatchResult, EntryHeader, EntryTotals, JournalEntryDraft, JournalLineDraft, MAX_BATCH_SIZE,
    MIN_BATCH_SIZE,
};
pub use validation::{check_balance, validate_draft, validate_header, validate_line};
