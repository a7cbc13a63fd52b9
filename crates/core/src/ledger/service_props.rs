//! Property-based tests for the batch commit coordinator.
//!
//! - Any batch with one bad entry fails at that entry's index and writes nothing
//! - Valid batches get one id per entry, in submission order
//! - Sizes outside 1..=500 are rejected before any lookup

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use bookwise_shared::types::{AccountId, JournalEntryId};
use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::directory::AccountDirectory;
use super::entry::JournalEntry;
use super::error::LedgerError;
use super::service::{JournalStore, LedgerService};
use super::types::{JournalEntryDraft, JournalLineDraft};

/// Strategy to generate positive decimal amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Accounts 1..=10 exist.
struct TenAccounts;

#[async_trait]
impl AccountDirectory for TenAccounts {
    async fn existing_account_ids(
        &self,
        ids: &[AccountId],
    ) -> Result<HashSet<AccountId>, LedgerError> {
        Ok(ids
            .iter()
            .copied()
            .filter(|id| (1..=10).contains(&id.into_inner()))
            .collect())
    }
}

#[derive(Default)]
struct CountingStore {
    written: Mutex<usize>,
}

#[async_trait]
impl JournalStore for CountingStore {
    async fn insert_entries(
        &self,
        entries: &[JournalEntry],
    ) -> Result<Vec<JournalEntryId>, LedgerError> {
        let mut written = self.written.lock().unwrap();
        let first = *written;
        *written += entries.len();
        Ok((first..*written)
            .map(|i| JournalEntryId::new(i32::try_from(i).unwrap() + 100))
            .collect())
    }
}

fn balanced(amount: Decimal) -> JournalEntryDraft {
    JournalEntryDraft {
        occurred_on: NaiveDate::from_ymd_opt(2026, 4, 1),
        description: "Batch member".into(),
        reference_no: None,
        lines: vec![
            JournalLineDraft::debit(AccountId::new(1), amount),
            JournalLineDraft::credit(AccountId::new(2), amount),
        ],
    }
}

/// Ways to spoil an otherwise valid draft.
#[derive(Debug, Clone, Copy)]
enum Defect {
    Unbalanced,
    OneLine,
    TwoSided,
    BlankDescription,
    MissingDate,
}

fn defect() -> impl Strategy<Value = Defect> {
    prop_oneof![
        Just(Defect::Unbalanced),
        Just(Defect::OneLine),
        Just(Defect::TwoSided),
        Just(Defect::BlankDescription),
        Just(Defect::MissingDate),
    ]
}

fn spoil(mut draft: JournalEntryDraft, defect: Defect) -> JournalEntryDraft {
    match defect {
        Defect::Unbalanced => draft.lines[1].credit += Decimal::new(1, 2),
        Defect::OneLine => {
            draft.lines.pop();
        }
        Defect::TwoSided => draft.lines[0].credit = draft.lines[0].debit,
        Defect::BlankDescription => draft.description = "   ".into(),
        Defect::MissingDate => draft.occurred_on = None,
    }
    draft
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// One bad draft anywhere fails the batch at its index with zero writes.
    #[test]
    fn prop_bad_entry_fails_whole_batch(
        amounts in prop::collection::vec(positive_amount(), 1..20),
        bad_seed in any::<prop::sample::Index>(),
        defect in defect(),
    ) {
        let bad = bad_seed.index(amounts.len());
        let drafts: Vec<_> = amounts
            .iter()
            .enumerate()
            .map(|(i, a)| if i == bad { spoil(balanced(*a), defect) } else { balanced(*a) })
            .collect();
        let store = CountingStore::default();

        let result = block_on(LedgerService::commit_batch(&TenAccounts, &store, &drafts));

        let err = result.unwrap_err();
        prop_assert_eq!(err.batch_index(), Some(bad));
        prop_assert_eq!(*store.written.lock().unwrap(), 0);
    }

    /// Valid batches come back with one id per draft, in order.
    #[test]
    fn prop_valid_batch_returns_ids_in_order(
        amounts in prop::collection::vec(positive_amount(), 1..50),
    ) {
        let drafts: Vec<_> = amounts.iter().copied().map(balanced).collect();
        let store = CountingStore::default();

        let result = block_on(LedgerService::commit_batch(&TenAccounts, &store, &drafts)).unwrap();

        prop_assert_eq!(result.created_count, drafts.len());
        let raw: Vec<i32> = result.created_ids.iter().map(|id| id.into_inner()).collect();
        let expected: Vec<i32> = (0..drafts.len())
            .map(|i| i32::try_from(i).unwrap() + 100)
            .collect();
        prop_assert_eq!(raw, expected);
    }

    /// An unknown account in any draft rejects the batch before writing.
    #[test]
    fn prop_unknown_account_rejects_batch(
        amounts in prop::collection::vec(positive_amount(), 1..20),
        bad_seed in any::<prop::sample::Index>(),
        unknown in 11i32..1_000,
    ) {
        let bad = bad_seed.index(amounts.len());
        let mut drafts: Vec<_> = amounts.iter().copied().map(balanced).collect();
        drafts[bad].lines[1].account_id = AccountId::new(unknown);
        let store = CountingStore::default();

        let result = block_on(LedgerService::commit_batch(&TenAccounts, &store, &drafts));

        prop_assert!(matches!(result, Err(LedgerError::InvalidReference)));
        prop_assert_eq!(*store.written.lock().unwrap(), 0);
    }

    /// Sizes above the limit never reach validation.
    #[test]
    fn prop_oversized_batch_rejected(extra in 1usize..20) {
        let drafts = vec![balanced(Decimal::ONE); 500 + extra];
        let store = CountingStore::default();

        let result = block_on(LedgerService::commit_batch(&TenAccounts, &store, &drafts));

        prop_assert!(
            matches!(result, Err(LedgerError::OutOfRange { field: "entries", .. })),
            "expected OutOfRange"
        );
    }
}
