//! Account error types.

use bookwise_shared::AppError;
use bookwise_shared::types::AccountId;
use thiserror::Error;

use crate::fields::FieldViolation;

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// A required field is blank.
    #[error("{field} is required")]
    MissingField {
        /// Request field name.
        field: &'static str,
    },

    /// A field is too long.
    #[error("{field} {reason}")]
    OutOfRange {
        /// Request field name.
        field: &'static str,
        /// What the value must satisfy.
        reason: String,
    },

    /// Unknown account type name.
    #[error("Account type must be one of Asset, Liability, Equity, Revenue, Expense (got '{0}')")]
    InvalidType(String),

    /// Another account already uses this code.
    #[error("Account code already exists: {0}")]
    DuplicateKey(String),

    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(AccountId),

    /// Journal lines or transactions still reference the account.
    #[error("Account {0} is referenced by journal lines or transactions")]
    InUse(AccountId),

    /// Storage failure.
    #[error("Failed to save account: {0}")]
    Storage(String),
}

impl AccountError {
    /// Builds the error for a rejected text field.
    #[must_use]
    pub fn field(field: &'static str, violation: FieldViolation) -> Self {
        match violation {
            FieldViolation::Missing => Self::MissingField { field },
            FieldViolation::TooLong { max } => Self::OutOfRange {
                field,
                reason: format!("must be at most {max} characters"),
            },
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::OutOfRange { .. } => "out_of_range",
            Self::InvalidType(_) => "invalid_account_type",
            Self::DuplicateKey(_) => "duplicate_code",
            Self::NotFound(_) => "not_found",
            Self::InUse(_) => "account_in_use",
            Self::Storage(_) => "storage_error",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::MissingField { .. } | Self::OutOfRange { .. } | Self::InvalidType(_) => 400,
            Self::NotFound(_) => 404,
            Self::DuplicateKey(_) | Self::InUse(_) => 409,
            Self::Storage(_) => 500,
        }
    }
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        let message = err.to_string();
        match err {
            AccountError::MissingField { .. }
            | AccountError::OutOfRange { .. }
            | AccountError::InvalidType(_) => Self::Validation(message),
            AccountError::DuplicateKey(_) | AccountError::InUse(_) => Self::Conflict(message),
            AccountError::NotFound(_) => Self::NotFound(message),
            AccountError::Storage(_) => Self::Database(message),
        }
    }
}
