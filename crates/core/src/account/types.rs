//! Account domain types.

use serde::{Deserialize, Serialize};

use super::error::AccountError;
use crate::fields;

/// Maximum length of an account code.
pub const CODE_MAX_LEN: usize = 20;
/// Maximum length of an account name.
pub const NAME_MAX_LEN: usize = 100;

/// Account classification, stored by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    /// Resources owned.
    Asset,
    /// Obligations owed.
    Liability,
    /// Owner's residual interest.
    Equity,
    /// Income earned.
    Revenue,
    /// Costs incurred.
    Expense,
}

impl AccountType {
    /// Every type, in chart order.
    pub const ALL: [Self; 5] = [
        Self::Asset,
        Self::Liability,
        Self::Equity,
        Self::Revenue,
        Self::Expense,
    ];

    /// Returns the stored name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "Asset",
            Self::Liability => "Liability",
            Self::Equity => "Equity",
            Self::Revenue => "Revenue",
            Self::Expense => "Expense",
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AccountType {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AccountError::InvalidType(s.to_string()))
    }
}

/// Validated account fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountDetails {
    code: String,
    name: String,
    account_type: AccountType,
}

impl AccountDetails {
    /// Trims and validates account fields.
    ///
    /// # Errors
    ///
    /// `MissingField` for a blank code or name, `OutOfRange` when either is
    /// too long.
    pub fn new(code: &str, name: &str, account_type: AccountType) -> Result<Self, AccountError> {
        let code = fields::required_text(code, CODE_MAX_LEN)
            .map_err(|v| AccountError::field("accountCode", v))?;
        let name = fields::required_text(name, NAME_MAX_LEN)
            .map_err(|v| AccountError::field("name", v))?;
        Ok(Self {
            code,
            name,
            account_type,
        })
    }

    /// Replaces every field, re-running the same rules.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new); `self` is unchanged on failure.
    pub fn update(
        &mut self,
        code: &str,
        name: &str,
        account_type: AccountType,
    ) -> Result<(), AccountError> {
        *self = Self::new(code, name, account_type)?;
        Ok(())
    }

    /// Trimmed, unique account code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Trimmed display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Classification.
    #[must_use]
    pub const fn account_type(&self) -> AccountType {
        self.account_type
    }
}
