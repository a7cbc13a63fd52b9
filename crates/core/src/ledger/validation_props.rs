//! Property-based tests for line and balance rules.
//!
//! Covers the double-entry invariants:
//! - balanced entries with two or more lines validate
//! - any debit/credit mismatch fails with `UnbalancedEntry`
//! - fewer than two lines fails with `InsufficientLines`
//! - two-sided or empty lines fail with `MutuallyExclusive`
//! - negative amounts fail with `OutOfRange`

use bookwise_shared::types::AccountId;
use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::entry::JournalEntry;
use super::error::LedgerError;

/// Strategy to generate a valid positive amount (> 0).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    // 0.01 to 1,000,000.00
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a negative amount.
fn negative_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(-cents, 2))
}

/// Strategy to generate a positive account id.
fn account_id() -> impl Strategy<Value = AccountId> {
    (1i32..10_000i32).prop_map(AccountId::new)
}

fn empty_entry() -> JournalEntry {
    JournalEntry::create(NaiveDate::from_ymd_opt(2026, 1, 15), "Property test", None).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any set of debits balanced by a single credit of their sum validates.
    #[test]
    fn prop_balanced_entry_accepted(
        debits in prop::collection::vec(positive_amount(), 1..10),
        credit_account in account_id(),
    ) {
        let mut entry = empty_entry();
        let mut total = Decimal::ZERO;
        for (i, amount) in debits.iter().enumerate() {
            let account = AccountId::new(i32::try_from(i).unwrap() + 1);
            entry.add_line(account, *amount, Decimal::ZERO, None).unwrap();
            total += *amount;
        }
        entry.add_line(credit_account, Decimal::ZERO, total, None).unwrap();

        let totals = entry.validate_balanced();
        prop_assert!(totals.is_ok(), "balanced entry rejected: {:?}", totals);
        let totals = totals.unwrap();
        prop_assert_eq!(totals.debit, totals.credit);
    }

    /// Any mismatch between debits and credits is rejected with both sums.
    #[test]
    fn prop_unbalanced_entry_rejected(
        debit in positive_amount(),
        credit in positive_amount(),
    ) {
        prop_assume!(debit != credit);

        let mut entry = empty_entry();
        entry.add_line(AccountId::new(1), debit, Decimal::ZERO, None).unwrap();
        entry.add_line(AccountId::new(2), Decimal::ZERO, credit, None).unwrap();

        match entry.validate_balanced() {
            Err(LedgerError::UnbalancedEntry { debit: d, credit: c }) => {
                prop_assert_eq!(d, debit);
                prop_assert_eq!(c, credit);
            }
            other => prop_assert!(false, "expected UnbalancedEntry, got {:?}", other),
        }
    }

    /// A single line never validates, whatever its amount.
    #[test]
    fn prop_single_line_rejected(
        amount in positive_amount(),
        is_debit in any::<bool>(),
    ) {
        let mut entry = empty_entry();
        let (debit, credit) = if is_debit { (amount, Decimal::ZERO) } else { (Decimal::ZERO, amount) };
        entry.add_line(AccountId::new(1), debit, credit, None).unwrap();

        prop_assert!(matches!(
            entry.validate_balanced(),
            Err(LedgerError::InsufficientLines)
        ));
    }

    /// Lines with both sides positive are rejected.
    #[test]
    fn prop_two_sided_line_rejected(
        account in account_id(),
        debit in positive_amount(),
        credit in positive_amount(),
    ) {
        let mut entry = empty_entry();
        let result = entry.add_line(account, debit, credit, None);
        prop_assert!(matches!(result, Err(LedgerError::MutuallyExclusive)));
        prop_assert!(entry.lines().is_empty());
    }

    /// Negative debits or credits are rejected as out of range.
    #[test]
    fn prop_negative_amount_rejected(
        account in account_id(),
        negative in negative_amount(),
        other in positive_amount(),
        negative_is_debit in any::<bool>(),
    ) {
        let (debit, credit) = if negative_is_debit { (negative, other) } else { (other, negative) };

        let mut entry = empty_entry();
        let result = entry.add_line(account, debit, credit, None);
        prop_assert!(
            matches!(result, Err(LedgerError::OutOfRange { .. })),
            "negative amount should be out of range, got: {:?}",
            result
        );
    }

    /// Non-positive account ids are rejected before any amount rule.
    #[test]
    fn prop_unassigned_account_rejected(
        raw in i32::MIN..=0i32,
        amount in positive_amount(),
    ) {
        let mut entry = empty_entry();
        let result = entry.add_line(AccountId::new(raw), amount, Decimal::ZERO, None);
        prop_assert!(
            matches!(result, Err(LedgerError::MissingField { field: "accountId" })),
            "unassigned account should be a missing field, got: {:?}",
            result
        );
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Both amounts zero is as invalid as both positive.
    #[test]
    fn test_zero_zero_line() {
        let mut entry = empty_entry();
        assert!(matches!(
            entry.add_line(AccountId::new(1), Decimal::ZERO, Decimal::ZERO, None),
            Err(LedgerError::MutuallyExclusive)
        ));
    }

    /// The smallest representable balanced entry.
    #[test]
    fn test_minimum_valid_entry() {
        let mut entry = empty_entry();
        entry
            .add_line(AccountId::new(1), Decimal::new(1, 2), Decimal::ZERO, None)
            .unwrap();
        entry
            .add_line(AccountId::new(2), Decimal::ZERO, Decimal::new(1, 2), None)
            .unwrap();
        assert!(entry.validate_balanced().is_ok());
    }
}
