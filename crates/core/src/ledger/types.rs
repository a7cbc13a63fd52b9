//! Journal entry drafts and batch results.
//!
//! Drafts carry caller input as received. Nothing here is validated; the
//! validators and the aggregate decide what is acceptable.

use bookwise_shared::types::{AccountId, JournalEntryId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Smallest accepted batch.
pub const MIN_BATCH_SIZE: usize = 1;
/// Largest accepted batch.
pub const MAX_BATCH_SIZE: usize = 500;
/// Minimum number of lines in a journal entry.
pub const MIN_LINES: usize = 2;
/// Maximum length of an entry description.
pub const DESCRIPTION_MAX_LEN: usize = 200;
/// Maximum length of an entry reference.
pub const REFERENCE_MAX_LEN: usize = 50;
/// Maximum length of a line memo.
pub const MEMO_MAX_LEN: usize = 200;

/// One proposed debit or credit line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalLineDraft {
    /// Account to post to.
    pub account_id: AccountId,
    /// Debit amount (zero when the line is a credit).
    pub debit: Decimal,
    /// Credit amount (zero when the line is a debit).
    pub credit: Decimal,
    /// Optional line memo.
    pub memo: Option<String>,
}

impl JournalLineDraft {
    /// Creates a debit line.
    #[must_use]
    pub fn debit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            debit: amount,
            credit: Decimal::ZERO,
            memo: None,
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            debit: Decimal::ZERO,
            credit: amount,
            memo: None,
        }
    }
}

/// A proposed journal entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntryDraft {
    /// Date the entry occurred on; required.
    pub occurred_on: Option<NaiveDate>,
    /// Free-text description; required.
    pub description: String,
    /// Optional external reference (invoice number, receipt id).
    pub reference_no: Option<String>,
    /// Lines in submission order.
    pub lines: Vec<JournalLineDraft>,
}

/// Normalized journal entry header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryHeader {
    /// Date the entry occurred on.
    pub occurred_on: NaiveDate,
    /// Trimmed description.
    pub description: String,
    /// Trimmed reference; `None` when blank.
    pub reference_no: Option<String>,
}

/// Outcome of a committed batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    /// Number of entries written.
    pub created_count: usize,
    /// Assigned ids, in submission order.
    pub created_ids: Vec<JournalEntryId>,
}

impl BatchResult {
    /// Wraps the ids returned by the store.
    #[must_use]
    pub fn new(created_ids: Vec<JournalEntryId>) -> Self {
        Self {
            created_count: created_ids.len(),
            created_ids,
        }
    }
}

/// Debit and credit sums for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryTotals {
    /// Sum of line debits.
    pub debit: Decimal,
    /// Sum of line credits.
    pub credit: Decimal,
}

impl EntryTotals {
    /// True when debits equal credits exactly.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.debit == self.credit
    }

    /// Debits minus credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debit - self.credit
    }
}
