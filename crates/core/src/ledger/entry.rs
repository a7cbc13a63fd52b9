//! Journal entry aggregate.
//!
//! A [`JournalEntry`] owns its lines outright. Lines refer to accounts by id
//! only and never point back at the entry.

use bookwise_shared::types::AccountId;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{EntryTotals, JournalEntryDraft};
use super::validation::{check_balance, normalize_line, validate_header};

/// A validated debit or credit line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntryLine {
    account_id: AccountId,
    debit: Decimal,
    credit: Decimal,
    memo: Option<String>,
}

impl JournalEntryLine {
    /// Account the line posts to.
    #[must_use]
    pub const fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Debit amount; zero for credit lines.
    #[must_use]
    pub const fn debit(&self) -> Decimal {
        self.debit
    }

    /// Credit amount; zero for debit lines.
    #[must_use]
    pub const fn credit(&self) -> Decimal {
        self.credit
    }

    /// Trimmed memo, if any.
    #[must_use]
    pub fn memo(&self) -> Option<&str> {
        self.memo.as_deref()
    }
}

/// A journal entry and its lines, not yet persisted.
///
/// Construction validates the header; each [`add_line`](Self::add_line)
/// validates the line. [`validate_balanced`](Self::validate_balanced) is the
/// last gate before the entry is handed to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    occurred_on: NaiveDate,
    description: String,
    reference_no: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    lines: Vec<JournalEntryLine>,
}

impl JournalEntry {
    /// Creates an entry with no lines.
    ///
    /// # Errors
    ///
    /// Fails when the date is missing, the description is blank, or a text
    /// field is too long.
    pub fn create(
        occurred_on: Option<NaiveDate>,
        description: &str,
        reference_no: Option<&str>,
    ) -> Result<Self, LedgerError> {
        let header = validate_header(occurred_on, description, reference_no)?;
        Ok(Self {
            occurred_on: header.occurred_on,
            description: header.description,
            reference_no: header.reference_no,
            created_at: Utc::now(),
            updated_at: None,
            lines: Vec::new(),
        })
    }

    /// Builds and checks an entry from a draft.
    ///
    /// # Errors
    ///
    /// Returns the first header, line, or balance failure.
    pub fn from_draft(draft: &JournalEntryDraft) -> Result<Self, LedgerError> {
        let mut entry = Self::create(
            draft.occurred_on,
            &draft.description,
            draft.reference_no.as_deref(),
        )?;
        for line in &draft.lines {
            entry.add_line(line.account_id, line.debit, line.credit, line.memo.as_deref())?;
        }
        entry.validate_balanced()?;
        Ok(entry)
    }

    /// Appends a line. Append order is the persisted order.
    ///
    /// # Errors
    ///
    /// Fails with the line validator's error; the entry is left unchanged.
    pub fn add_line(
        &mut self,
        account_id: AccountId,
        debit: Decimal,
        credit: Decimal,
        memo: Option<&str>,
    ) -> Result<&JournalEntryLine, LedgerError> {
        let memo = normalize_line(account_id, debit, credit, memo)?;
        self.lines.push(JournalEntryLine {
            account_id,
            debit,
            credit,
            memo,
        });
        match self.lines.as_slice() {
            [.., line] => Ok(line),
            [] => unreachable!("a line was just pushed"),
        }
    }

    /// Checks line count and debit/credit equality.
    ///
    /// # Errors
    ///
    /// `InsufficientLines` or `UnbalancedEntry`.
    pub fn validate_balanced(&self) -> Result<EntryTotals, LedgerError> {
        check_balance(self.lines.iter().map(|l| (l.debit, l.credit)))
    }

    /// Replaces the header fields. Lines are untouched.
    ///
    /// # Errors
    ///
    /// Same rules as [`create`](Self::create); the entry is left unchanged on
    /// failure.
    pub fn update_header(
        &mut self,
        occurred_on: Option<NaiveDate>,
        description: &str,
        reference_no: Option<&str>,
    ) -> Result<(), LedgerError> {
        let header = validate_header(occurred_on, description, reference_no)?;
        self.occurred_on = header.occurred_on;
        self.description = header.description;
        self.reference_no = header.reference_no;
        self.updated_at = Some(Utc::now());
        Ok(())
    }

    /// Date the entry occurred on.
    #[must_use]
    pub const fn occurred_on(&self) -> NaiveDate {
        self.occurred_on
    }

    /// Trimmed description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Trimmed reference, if any.
    #[must_use]
    pub fn reference_no(&self) -> Option<&str> {
        self.reference_no.as_deref()
    }

    /// When the aggregate was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the header was last changed.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Lines in append order.
    #[must_use]
    pub fn lines(&self) -> &[JournalEntryLine] {
        &self.lines
    }

    /// Accounts referenced by the lines, in line order (may repeat).
    pub fn account_ids(&self) -> impl Iterator<Item = AccountId> + '_ {
        self.lines.iter().map(JournalEntryLine::account_id)
    }
}
