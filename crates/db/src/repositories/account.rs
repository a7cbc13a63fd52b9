//! Account repository for chart of accounts database operations.

use std::collections::HashSet;

use async_trait::async_trait;
use bookwise_core::account::{AccountDetails, AccountError};
use bookwise_core::ledger::{AccountDirectory, LedgerError};
use bookwise_shared::types::AccountId;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::{is_foreign_key_violation, is_unique_violation};
use crate::entities::{accounts, journal_entry_lines, transactions};

/// Account repository for CRUD operations and account lookups.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all accounts ordered by code, then name.
    pub async fn list(&self) -> Result<Vec<accounts::Model>, AccountError> {
        accounts::Entity::find()
            .order_by_asc(accounts::Column::AccountCode)
            .order_by_asc(accounts::Column::Name)
            .all(&self.db)
            .await
            .map_err(storage_error)
    }

    /// Finds an account by ID.
    ///
    /// # Errors
    ///
    /// `NotFound` when no account has this id.
    pub async fn find_by_id(&self, id: AccountId) -> Result<accounts::Model, AccountError> {
        accounts::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(storage_error)?
            .ok_or(AccountError::NotFound(id))
    }

    /// Checks whether an account code is taken, optionally ignoring one account.
    pub async fn code_exists(
        &self,
        code: &str,
        exclude: Option<AccountId>,
    ) -> Result<bool, AccountError> {
        let mut query = accounts::Entity::find().filter(accounts::Column::AccountCode.eq(code));
        if let Some(id) = exclude {
            query = query.filter(accounts::Column::Id.ne(id.into_inner()));
        }

        let count = query.count(&self.db).await.map_err(storage_error)?;
        Ok(count > 0)
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// `DuplicateKey` when the code is already in use, either found up front
    /// or reported by the unique index.
    pub async fn create(&self, details: &AccountDetails) -> Result<accounts::Model, AccountError> {
        if self.code_exists(details.code(), None).await? {
            return Err(AccountError::DuplicateKey(details.code().to_string()));
        }

        let account = accounts::ActiveModel {
            account_code: Set(details.code().to_string()),
            name: Set(details.name().to_string()),
            account_type: Set(details.account_type().into()),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
            ..Default::default()
        };

        let model = account
            .insert(&self.db)
            .await
            .map_err(|e| duplicate_or_storage(e, details.code()))?;

        tracing::info!(account_id = model.id, code = %model.account_code, "Account created");
        Ok(model)
    }

    /// Replaces an account's code, name, and type.
    ///
    /// The account may keep its own code.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id, `DuplicateKey` when another account holds
    /// the code.
    pub async fn update(
        &self,
        id: AccountId,
        details: &AccountDetails,
    ) -> Result<accounts::Model, AccountError> {
        let existing = self.find_by_id(id).await?;

        if self.code_exists(details.code(), Some(id)).await? {
            return Err(AccountError::DuplicateKey(details.code().to_string()));
        }

        let mut account: accounts::ActiveModel = existing.into();
        account.account_code = Set(details.code().to_string());
        account.name = Set(details.name().to_string());
        account.account_type = Set(details.account_type().into());
        account.updated_at = Set(Some(chrono::Utc::now().into()));

        let model = account
            .update(&self.db)
            .await
            .map_err(|e| duplicate_or_storage(e, details.code()))?;

        tracing::info!(account_id = model.id, "Account updated");
        Ok(model)
    }

    /// Deletes an account that nothing references.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id, `InUse` when journal lines or
    /// transactions still point at the account.
    pub async fn delete(&self, id: AccountId) -> Result<(), AccountError> {
        self.find_by_id(id).await?;

        if self.reference_count(id).await? > 0 {
            return Err(AccountError::InUse(id));
        }

        accounts::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AccountError::InUse(id)
                } else {
                    storage_error(e)
                }
            })?;

        tracing::info!(account_id = %id, "Account deleted");
        Ok(())
    }

    async fn reference_count(&self, id: AccountId) -> Result<u64, AccountError> {
        let lines = journal_entry_lines::Entity::find()
            .filter(journal_entry_lines::Column::AccountId.eq(id.into_inner()))
            .count(&self.db)
            .await
            .map_err(storage_error)?;
        let transactions = transactions::Entity::find()
            .filter(transactions::Column::AccountId.eq(id.into_inner()))
            .count(&self.db)
            .await
            .map_err(storage_error)?;

        Ok(lines + transactions)
    }
}

#[async_trait]
impl AccountDirectory for AccountRepository {
    async fn existing_account_ids(
        &self,
        ids: &[AccountId],
    ) -> Result<HashSet<AccountId>, LedgerError> {
        let found: Vec<i32> = accounts::Entity::find()
            .select_only()
            .column(accounts::Column::Id)
            .filter(accounts::Column::Id.is_in(ids.iter().map(|id| id.into_inner())))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Account lookup failed");
                LedgerError::Storage(e.to_string())
            })?;

        Ok(found.into_iter().map(AccountId::new).collect())
    }
}

fn duplicate_or_storage(err: DbErr, code: &str) -> AccountError {
    if is_unique_violation(&err) {
        AccountError::DuplicateKey(code.to_string())
    } else {
        storage_error(err)
    }
}

fn storage_error(err: DbErr) -> AccountError {
    tracing::error!(error = %err, "Account query failed");
    AccountError::Storage(err.to_string())
}
