//! Journal entry creation and all-or-nothing batch commit.
//!
//! The pipeline is the same for one entry or many:
//! 1. Header, line, and balance rules on every raw draft
//! 2. One account-existence lookup for the whole submission
//! 3. Aggregates built and re-checked with `validate_balanced`
//! 4. A single storage transaction for every insert
//!
//! Nothing reaches storage unless every draft passes steps 1 to 3.

use async_trait::async_trait;
use bookwise_shared::types::{AccountId, JournalEntryId};

use super::directory::{AccountDirectory, ensure_accounts_exist};
use super::entry::JournalEntry;
use super::error::LedgerError;
use super::types::{BatchResult, JournalEntryDraft, MAX_BATCH_SIZE, MIN_BATCH_SIZE};
use super::validation::validate_draft;

/// Persistence for validated journal entries.
#[async_trait]
pub trait JournalStore: Send + Sync {
    /// Inserts every entry and its lines inside one storage transaction.
    ///
    /// Returns the assigned ids in input order. On failure nothing is kept.
    ///
    /// # Errors
    ///
    /// `LedgerError::Storage` when any insert or the commit fails.
    async fn insert_entries(
        &self,
        entries: &[JournalEntry],
    ) -> Result<Vec<JournalEntryId>, LedgerError>;
}

/// Journal entry workflows over an account directory and a store.
pub struct LedgerService;

impl LedgerService {
    /// Validates and persists one entry.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure, `InvalidReference` for an
    /// unknown account, or `Storage` when the write fails.
    pub async fn create_entry<D, S>(
        directory: &D,
        store: &S,
        draft: &JournalEntryDraft,
    ) -> Result<JournalEntryId, LedgerError>
    where
        D: AccountDirectory + ?Sized,
        S: JournalStore + ?Sized,
    {
        validate_draft(draft)?;
        let account_ids: Vec<AccountId> = draft.lines.iter().map(|l| l.account_id).collect();
        ensure_accounts_exist(directory, &account_ids).await?;

        let entry = JournalEntry::from_draft(draft)?;
        entry.validate_balanced()?;

        let ids = store.insert_entries(std::slice::from_ref(&entry)).await?;
        ids.into_iter()
            .next()
            .ok_or_else(|| LedgerError::Storage("store returned no id".to_string()))
    }

    /// Validates and persists a batch atomically.
    ///
    /// Per-entry failures carry the zero-based index of the offending draft.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` when the batch is empty or larger than 500 entries
    /// - `InBatch { index, .. }` for the first draft that fails validation
    /// - `InvalidReference` when any line in any draft names an unknown account
    /// - `Storage` when the write fails; nothing is persisted
    pub async fn commit_batch<D, S>(
        directory: &D,
        store: &S,
        drafts: &[JournalEntryDraft],
    ) -> Result<BatchResult, LedgerError>
    where
        D: AccountDirectory + ?Sized,
        S: JournalStore + ?Sized,
    {
        Self::check_batch_size(drafts.len())?;

        for (index, draft) in drafts.iter().enumerate() {
            validate_draft(draft).map_err(|e| e.at_index(index))?;
        }

        let account_ids: Vec<AccountId> = drafts
            .iter()
            .flat_map(|d| d.lines.iter().map(|l| l.account_id))
            .collect();
        ensure_accounts_exist(directory, &account_ids).await?;

        let entries = drafts
            .iter()
            .enumerate()
            .map(|(index, draft)| {
                let entry = JournalEntry::from_draft(draft).map_err(|e| e.at_index(index))?;
                entry.validate_balanced().map_err(|e| e.at_index(index))?;
                Ok(entry)
            })
            .collect::<Result<Vec<_>, LedgerError>>()?;

        let ids = store.insert_entries(&entries).await?;
        if ids.len() != entries.len() {
            return Err(LedgerError::Storage(format!(
                "store returned {} ids for {} entries",
                ids.len(),
                entries.len()
            )));
        }
        Ok(BatchResult::new(ids))
    }

    /// Checks that a batch holds between 1 and 500 drafts.
    ///
    /// # Errors
    ///
    /// `OutOfRange` on the `entries` field otherwise.
    pub fn check_batch_size(len: usize) -> Result<(), LedgerError> {
        if (MIN_BATCH_SIZE..=MAX_BATCH_SIZE).contains(&len) {
            Ok(())
        } else {
            Err(LedgerError::OutOfRange {
                field: "entries",
                reason: format!(
                    "must contain between {MIN_BATCH_SIZE} and {MAX_BATCH_SIZE} items (got {len})"
                ),
            })
        }
    }
}
