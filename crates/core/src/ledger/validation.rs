//! Business rule validation for journal entries.
//!
//! Every function here is pure. The aggregate and the batch coordinator call
//! the same functions, so a draft that passes here builds a valid aggregate.

use bookwise_shared::types::AccountId;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{
    DESCRIPTION_MAX_LEN, EntryHeader, EntryTotals, JournalEntryDraft, JournalLineDraft,
    MEMO_MAX_LEN, MIN_LINES, REFERENCE_MAX_LEN,
};
use crate::fields::{self, MONEY_INTEGER_DIGITS, MONEY_SCALE};

/// Validates the header fields of a journal entry.
///
/// Returns the header with text trimmed and a blank reference dropped.
///
/// # Errors
///
/// - `MissingField` when the date is absent or the description is blank
/// - `OutOfRange` when the description or reference is too long
pub fn validate_header(
    occurred_on: Option<NaiveDate>,
    description: &str,
    reference_no: Option<&str>,
) -> Result<EntryHeader, LedgerError> {
    let occurred_on = occurred_on.ok_or(LedgerError::MissingField {
        field: "occurredOn",
    })?;
    let description = fields::required_text(description, DESCRIPTION_MAX_LEN)
        .map_err(|v| LedgerError::field("description", v))?;
    let reference_no = fields::optional_text(reference_no, REFERENCE_MAX_LEN)
        .map_err(|v| LedgerError::field("referenceNo", v))?;

    Ok(EntryHeader {
        occurred_on,
        description,
        reference_no,
    })
}

/// Validates a single line.
///
/// Checks run in a fixed order and the first failure wins: account id,
/// negative debit, negative credit, amount size, one-sidedness, memo.
///
/// # Errors
///
/// - `MissingField` when the account id is not positive
/// - `OutOfRange` for negative, sub-cent or oversized amounts, or a long memo
/// - `MutuallyExclusive` when both or neither amount is positive
pub fn validate_line(line: &JournalLineDraft) -> Result<(), LedgerError> {
    normalize_line(line.account_id, line.debit, line.credit, line.memo.as_deref()).map(|_| ())
}

/// Runs the line rules and returns the trimmed memo.
pub(crate) fn normalize_line(
    account_id: AccountId,
    debit: Decimal,
    credit: Decimal,
    memo: Option<&str>,
) -> Result<Option<String>, LedgerError> {
    if !account_id.is_assigned() {
        return Err(LedgerError::MissingField { field: "accountId" });
    }
    check_amount("debit", debit)?;
    check_amount("credit", credit)?;

    if (debit > Decimal::ZERO) == (credit > Decimal::ZERO) {
        return Err(LedgerError::MutuallyExclusive);
    }

    fields::optional_text(memo, MEMO_MAX_LEN).map_err(|v| LedgerError::field("memo", v))
}

fn check_amount(field: &'static str, amount: Decimal) -> Result<(), LedgerError> {
    if amount < Decimal::ZERO {
        return Err(LedgerError::OutOfRange {
            field,
            reason: "cannot be negative".to_string(),
        });
    }
    if !fields::fits_money_scale(amount) {
        return Err(LedgerError::OutOfRange {
            field,
            reason: format!("must have at most {MONEY_SCALE} decimal places"),
        });
    }
    if !fields::fits_money_precision(amount) {
        return Err(LedgerError::OutOfRange {
            field,
            reason: format!("must have at most {MONEY_INTEGER_DIGITS} integer digits"),
        });
    }
    Ok(())
}

/// Sums `(debit, credit)` pairs and checks the double-entry invariant.
///
/// Comparison is exact `Decimal` equality.
///
/// # Errors
///
/// - `OutOfRange` when a sum overflows
/// - `InsufficientLines` for fewer than two lines
/// - `UnbalancedEntry` when the sums differ
pub fn check_balance<I>(lines: I) -> Result<EntryTotals, LedgerError>
where
    I: IntoIterator<Item = (Decimal, Decimal)>,
{
    let mut count = 0usize;
    let mut totals = EntryTotals {
        debit: Decimal::ZERO,
        credit: Decimal::ZERO,
    };
    for (debit, credit) in lines {
        count += 1;
        totals.debit = totals
            .debit
            .checked_add(debit)
            .ok_or_else(|| total_too_large("debit"))?;
        totals.credit = totals
            .credit
            .checked_add(credit)
            .ok_or_else(|| total_too_large("credit"))?;
    }

    if count < MIN_LINES {
        return Err(LedgerError::InsufficientLines);
    }
    if !totals.is_balanced() {
        return Err(LedgerError::UnbalancedEntry {
            debit: totals.debit,
            credit: totals.credit,
        });
    }
    Ok(totals)
}

fn total_too_large(field: &'static str) -> LedgerError {
    LedgerError::OutOfRange {
        field,
        reason: "total is too large".to_string(),
    }
}

/// Runs header, line, and balance rules over a raw draft.
///
/// # Errors
///
/// Returns the first rule violation found.
pub fn validate_draft(draft: &JournalEntryDraft) -> Result<EntryTotals, LedgerError> {
    validate_header(
        draft.occurred_on,
        &draft.description,
        draft.reference_no.as_deref(),
    )?;
    for line in &draft.lines {
        validate_line(line)?;
    }
    check_balance(draft.lines.iter().map(|l| (l.debit, l.credit)))
}
