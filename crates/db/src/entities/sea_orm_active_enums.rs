//! Enum columns, stored by name.

use bookwise_core::{account, transaction};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account classification column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum AccountType {
    /// Asset.
    #[sea_orm(string_value = "Asset")]
    Asset,
    /// Liability.
    #[sea_orm(string_value = "Liability")]
    Liability,
    /// Equity.
    #[sea_orm(string_value = "Equity")]
    Equity,
    /// Revenue.
    #[sea_orm(string_value = "Revenue")]
    Revenue,
    /// Expense.
    #[sea_orm(string_value = "Expense")]
    Expense,
}

impl From<account::AccountType> for AccountType {
    fn from(value: account::AccountType) -> Self {
        match value {
            account::AccountType::Asset => Self::Asset,
            account::AccountType::Liability => Self::Liability,
            account::AccountType::Equity => Self::Equity,
            account::AccountType::Revenue => Self::Revenue,
            account::AccountType::Expense => Self::Expense,
        }
    }
}

impl From<AccountType> for account::AccountType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Asset => Self::Asset,
            AccountType::Liability => Self::Liability,
            AccountType::Equity => Self::Equity,
            AccountType::Revenue => Self::Revenue,
            AccountType::Expense => Self::Expense,
        }
    }
}

/// Income/expense tag column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum TransactionType {
    /// Money in.
    #[sea_orm(string_value = "Income")]
    Income,
    /// Money out.
    #[sea_orm(string_value = "Expense")]
    Expense,
}

impl From<transaction::TransactionKind> for TransactionType {
    fn from(value: transaction::TransactionKind) -> Self {
        match value {
            transaction::TransactionKind::Income => Self::Income,
            transaction::TransactionKind::Expense => Self::Expense,
        }
    }
}

impl From<TransactionType> for transaction::TransactionKind {
    fn from(value: TransactionType) -> Self {
        match value {
            TransactionType::Income => Self::Income,
            TransactionType::Expense => Self::Expense,
        }
    }
}
