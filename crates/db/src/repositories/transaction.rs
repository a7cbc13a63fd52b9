//! Income/expense transaction repository.

use bookwise_core::transaction::{TransactionDetails, TransactionError, TransactionKind};
use bookwise_shared::types::{AccountId, TransactionId};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};

use super::is_foreign_key_violation;
use crate::entities::{accounts, transactions};

/// Transaction repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists transactions, newest `occurred_on` first and ties by id descending.
    pub async fn list(&self) -> Result<Vec<transactions::Model>, TransactionError> {
        transactions::Entity::find()
            .order_by_desc(transactions::Column::OccurredOn)
            .order_by_desc(transactions::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage_error)
    }

    /// Finds a transaction by ID.
    ///
    /// # Errors
    ///
    /// `NotFound` when no transaction has this id.
    pub async fn find_by_id(
        &self,
        id: TransactionId,
    ) -> Result<transactions::Model, TransactionError> {
        transactions::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(storage_error)?
            .ok_or(TransactionError::NotFound(id))
    }

    /// Records a new income or expense.
    ///
    /// # Errors
    ///
    /// `InvalidReference` when the account does not exist.
    pub async fn create(
        &self,
        kind: TransactionKind,
        details: &TransactionDetails,
    ) -> Result<transactions::Model, TransactionError> {
        self.ensure_account(details.account_id()).await?;

        let transaction = transactions::ActiveModel {
            account_id: Set(details.account_id().into_inner()),
            transaction_type: Set(kind.into()),
            occurred_on: Set(details.occurred_on()),
            description: Set(details.description().to_string()),
            amount: Set(details.amount()),
            category: Set(details.category().map(str::to_string)),
            reference_no: Set(details.reference_no().map(str::to_string)),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
            ..Default::default()
        };

        let model = transaction
            .insert(&self.db)
            .await
            .map_err(reference_or_storage)?;

        tracing::info!(
            transaction_id = model.id,
            kind = %kind,
            amount = %model.amount,
            "Transaction created"
        );
        Ok(model)
    }

    /// Replaces the shared fields of a transaction. The kind never changes.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id, `InvalidReference` for an unknown account.
    pub async fn update(
        &self,
        id: TransactionId,
        details: &TransactionDetails,
    ) -> Result<transactions::Model, TransactionError> {
        let existing = self.find_by_id(id).await?;
        self.ensure_account(details.account_id()).await?;

        let mut transaction: transactions::ActiveModel = existing.into();
        transaction.account_id = Set(details.account_id().into_inner());
        transaction.occurred_on = Set(details.occurred_on());
        transaction.description = Set(details.description().to_string());
        transaction.amount = Set(details.amount());
        transaction.category = Set(details.category().map(str::to_string));
        transaction.reference_no = Set(details.reference_no().map(str::to_string));
        transaction.updated_at = Set(Some(chrono::Utc::now().into()));

        let model = transaction
            .update(&self.db)
            .await
            .map_err(reference_or_storage)?;

        tracing::info!(transaction_id = model.id, "Transaction updated");
        Ok(model)
    }

    /// Deletes a transaction.
    ///
    /// # Errors
    ///
    /// `NotFound` when no transaction has this id.
    pub async fn delete(&self, id: TransactionId) -> Result<(), TransactionError> {
        let result = transactions::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(storage_error)?;

        if result.rows_affected == 0 {
            return Err(TransactionError::NotFound(id));
        }

        tracing::info!(transaction_id = %id, "Transaction deleted");
        Ok(())
    }

    async fn ensure_account(&self, id: AccountId) -> Result<(), TransactionError> {
        accounts::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(storage_error)?
            .map(|_| ())
            .ok_or(TransactionError::InvalidReference)
    }
}

fn reference_or_storage(err: DbErr) -> TransactionError {
    if is_foreign_key_violation(&err) {
        TransactionError::InvalidReference
    } else {
        storage_error(err)
    }
}

fn storage_error(err: DbErr) -> TransactionError {
    tracing::error!(error = %err, "Transaction query failed");
    TransactionError::Storage(err.to_string())
}
