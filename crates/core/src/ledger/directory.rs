//! Account existence checks for journal lines.

use std::collections::HashSet;

use async_trait::async_trait;
use bookwise_shared::types::AccountId;

use super::error::LedgerError;

/// Read-only view of the chart of accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Returns the subset of `ids` that name existing accounts.
    ///
    /// # Errors
    ///
    /// `LedgerError::Storage` when the lookup itself fails.
    async fn existing_account_ids(
        &self,
        ids: &[AccountId],
    ) -> Result<HashSet<AccountId>, LedgerError>;
}

/// Fails unless every id names an existing account.
///
/// Duplicates are collapsed and the directory is queried once. The error does
/// not say which id was unknown.
///
/// # Errors
///
/// `InvalidReference` when any id is unknown; directory failures pass through.
pub async fn ensure_accounts_exist<D>(directory: &D, ids: &[AccountId]) -> Result<(), LedgerError>
where
    D: AccountDirectory + ?Sized,
{
    let mut wanted: Vec<AccountId> = ids
        .iter()
        .copied()
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    if wanted.is_empty() {
        return Ok(());
    }
    wanted.sort_unstable();

    let found = directory.existing_account_ids(&wanted).await?;
    if wanted.iter().all(|id| found.contains(id)) {
        Ok(())
    } else {
        Err(LedgerError::InvalidReference)
    }
}
