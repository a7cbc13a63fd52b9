//! Journal entry repository: entries with their lines.

use std::collections::HashMap;

use async_trait::async_trait;
use bookwise_core::ledger::{JournalEntry, JournalStore, LedgerError};
use bookwise_shared::types::JournalEntryId;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::entities::{journal_entries, journal_entry_lines};

/// A stored entry together with its lines in id order.
#[derive(Debug, Clone)]
pub struct JournalEntryWithLines {
    /// The entry header.
    pub entry: journal_entries::Model,
    /// The entry's lines.
    pub lines: Vec<journal_entry_lines::Model>,
}

/// Journal entry repository.
#[derive(Debug, Clone)]
pub struct JournalEntryRepository {
    db: DatabaseConnection,
}

impl JournalEntryRepository {
    /// Creates a new journal entry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists every entry, newest `occurred_on` first and ties by id
    /// descending. Lines come back in insertion order.
    pub async fn list(&self) -> Result<Vec<JournalEntryWithLines>, LedgerError> {
        let entries = journal_entries::Entity::find()
            .order_by_desc(journal_entries::Column::OccurredOn)
            .order_by_desc(journal_entries::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage_error)?;

        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let lines = journal_entry_lines::Entity::find()
            .filter(journal_entry_lines::Column::JournalEntryId.is_in(entries.iter().map(|e| e.id)))
            .order_by_asc(journal_entry_lines::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage_error)?;

        let mut by_entry: HashMap<i32, Vec<journal_entry_lines::Model>> = HashMap::new();
        for line in lines {
            by_entry.entry(line.journal_entry_id).or_default().push(line);
        }

        Ok(entries
            .into_iter()
            .map(|entry| {
                let lines = by_entry.remove(&entry.id).unwrap_or_default();
                JournalEntryWithLines { entry, lines }
            })
            .collect())
    }

    /// Finds one entry with its lines.
    ///
    /// # Errors
    ///
    /// `NotFound` when no entry has this id.
    pub async fn find_by_id(&self, id: JournalEntryId) -> Result<JournalEntryWithLines, LedgerError> {
        let entry = journal_entries::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(storage_error)?
            .ok_or(LedgerError::NotFound(id))?;

        let lines = journal_entry_lines::Entity::find()
            .filter(journal_entry_lines::Column::JournalEntryId.eq(entry.id))
            .order_by_asc(journal_entry_lines::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage_error)?;

        Ok(JournalEntryWithLines { entry, lines })
    }

    /// Counts stored entries.
    pub async fn count(&self) -> Result<u64, LedgerError> {
        journal_entries::Entity::find()
            .count(&self.db)
            .await
            .map_err(storage_error)
    }

    /// Deletes an entry; its lines go with it.
    ///
    /// # Errors
    ///
    /// `NotFound` when no entry has this id.
    pub async fn delete(&self, id: JournalEntryId) -> Result<(), LedgerError> {
        let result = journal_entries::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(storage_error)?;

        if result.rows_affected == 0 {
            return Err(LedgerError::NotFound(id));
        }

        tracing::info!(journal_entry_id = %id, "Journal entry deleted");
        Ok(())
    }
}

#[async_trait]
impl JournalStore for JournalEntryRepository {
    async fn insert_entries(
        &self,
        entries: &[JournalEntry],
    ) -> Result<Vec<JournalEntryId>, LedgerError> {
        let txn = self.db.begin().await.map_err(storage_error)?;

        let mut ids = Vec::with_capacity(entries.len());
        for entry in entries {
            // Dropping `txn` on error rolls back every entry written so far
            let id = insert_entry(&txn, entry).await.map_err(storage_error)?;
            ids.push(id);
        }

        txn.commit().await.map_err(storage_error)?;

        tracing::info!(count = ids.len(), "Journal entries committed");
        Ok(ids)
    }
}

async fn insert_entry<C>(conn: &C, entry: &JournalEntry) -> Result<JournalEntryId, DbErr>
where
    C: ConnectionTrait,
{
    let header = journal_entries::ActiveModel {
        occurred_on: Set(entry.occurred_on()),
        description: Set(entry.description().to_string()),
        reference_no: Set(entry.reference_no().map(str::to_string)),
        created_at: Set(entry.created_at().into()),
        updated_at: Set(entry.updated_at().map(Into::into)),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    // One insert per line keeps ascending ids in append order
    for line in entry.lines() {
        journal_entry_lines::ActiveModel {
            journal_entry_id: Set(header.id),
            account_id: Set(line.account_id().into_inner()),
            debit: Set(line.debit()),
            credit: Set(line.credit()),
            memo: Set(line.memo().map(str::to_string)),
            ..Default::default()
        }
        .insert(conn)
        .await?;
    }

    Ok(JournalEntryId::new(header.id))
}

fn storage_error(err: DbErr) -> LedgerError {
    tracing::error!(error = %err, "Journal entry query failed");
    LedgerError::Storage(err.to_string())
}
