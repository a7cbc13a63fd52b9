//! Transaction error types.

use bookwise_shared::AppError;
use bookwise_shared::types::TransactionId;
use thiserror::Error;

use crate::fields::FieldViolation;

/// Errors that can occur during transaction operations.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// A required field is absent or blank.
    #[error("{field} is required")]
    MissingField {
        /// Request field name.
        field: &'static str,
    },

    /// A value falls outside its allowed range.
    #[error("{field} {reason}")]
    OutOfRange {
        /// Request field name.
        field: &'static str,
        /// What the value must satisfy.
        reason: String,
    },

    /// Type tag is neither Income nor Expense.
    #[error("TransactionType must be Income or Expense.")]
    InvalidKind(String),

    /// The account does not exist.
    #[error("AccountId is invalid.")]
    InvalidReference,

    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    NotFound(TransactionId),

    /// Storage failure.
    #[error("Failed to save transaction: {0}")]
    Storage(String),
}

impl TransactionError {
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
            Self::InvalidKind(_) => "invalid_transaction_type",
            Self::InvalidReference => "invalid_reference",
            Self::NotFound(_) => "not_found",
            Self::Storage(_) => "storage_error",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Storage(_) => 500,
            _ => 400,
        }
    }
}

impl From<TransactionError> for AppError {
    fn from(err: TransactionError) -> Self {
        let message = err.to_string();
        match err {
            TransactionError::InvalidReference => Self::InvalidReference(message),
            TransactionError::NotFound(_) => Self::NotFound(message),
            TransactionError::Storage(_) => Self::Database(message),
            TransactionError::MissingField { .. }
            | TransactionError::OutOfRange { .. }
            | TransactionError::InvalidKind(_) => Self::Validation(message),
        }
    }
}
