//! Ledger error types for journal entry validation and persistence.
//!
//! Validation stops at the first failure. Batch operations wrap the failure
//! with the zero-based position of the offending entry.

use bookwise_shared::AppError;
use bookwise_shared::types::JournalEntryId;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::fields::FieldViolation;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
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

    /// A line sets both debit and credit, or neither.
    #[error("Each line must have either a debit or a credit (not both)")]
    MutuallyExclusive,

    /// Total debits differ from total credits.
    #[error("Journal entry is not balanced. Debit: {debit}, Credit: {credit}")]
    UnbalancedEntry {
        /// Sum of line debits.
        debit: Decimal,
        /// Sum of line credits.
        credit: Decimal,
    },

    /// Fewer than two lines.
    #[error("Journal entry must have at least 2 lines")]
    InsufficientLines,

    // ========== Reference Errors ==========
    /// At least one referenced account does not exist.
    #[error("One or more account ids are invalid")]
    InvalidReference,

    /// Journal entry not found.
    #[error("Journal entry not found: {0}")]
    NotFound(JournalEntryId),

    // ========== Batch Errors ==========
    /// A batch member failed validation.
    #[error("Entry {index}: {source}")]
    InBatch {
        /// Zero-based position of the entry in the submitted batch.
        index: usize,
        /// The underlying failure.
        #[source]
        source: Box<LedgerError>,
    },

    // ========== Storage Errors ==========
    /// Persistence failed; nothing was written.
    #[error("Failed to save journal entries: {0}")]
    Storage(String),
}

impl LedgerError {
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

    /// Tags this error with a batch position.
    #[must_use]
    pub fn at_index(self, index: usize) -> Self {
        Self::InBatch {
            index,
            source: Box::new(self),
        }
    }

    /// Returns the batch position, if the error came from a batch member.
    #[must_use]
    pub fn batch_index(&self) -> Option<usize> {
        match self {
            Self::InBatch { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Returns the error without its batch tag.
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::InBatch { source, .. } => source.root(),
            other => other,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self.root() {
            Self::MissingField { .. } => "missing_field",
            Self::OutOfRange { .. } => "out_of_range",
            Self::MutuallyExclusive => "mutually_exclusive",
            Self::UnbalancedEntry { .. } => "unbalanced_entry",
            Self::InsufficientLines => "insufficient_lines",
            Self::InvalidReference => "invalid_reference",
            Self::NotFound(_) => "not_found",
            Self::Storage(_) => "storage_error",
            Self::InBatch { .. } => "batch_error",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self.root() {
            Self::NotFound(_) => 404,
            Self::Storage(_) => 500,
            _ => 400,
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err.root() {
            LedgerError::InvalidReference => Self::InvalidReference(message),
            LedgerError::NotFound(_) => Self::NotFound(message),
            LedgerError::Storage(_) => Self::Database(message),
            _ => Self::Validation(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(LedgerError::InsufficientLines.error_code(), "insufficient_lines");
        assert_eq!(
            LedgerError::UnbalancedEntry {
                debit: dec!(100),
                credit: dec!(90),
            }
            .error_code(),
            "unbalanced_entry"
        );
        assert_eq!(LedgerError::MutuallyExclusive.error_code(), "mutually_exclusive");
        assert_eq!(LedgerError::InvalidReference.error_code(), "invalid_reference");
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(LedgerError::InsufficientLines.http_status_code(), 400);
        assert_eq!(LedgerError::InvalidReference.http_status_code(), 400);
        assert_eq!(
            LedgerError::NotFound(JournalEntryId::new(9)).http_status_code(),
            404
        );
        assert_eq!(
            LedgerError::Storage("disk full".to_string()).http_status_code(),
            500
        );
    }

    #[test]
    fn test_batch_tag_keeps_root_classification() {
        let err = LedgerError::MutuallyExclusive.at_index(3);
        assert_eq!(err.batch_index(), Some(3));
        assert!(matches!(err.root(), LedgerError::MutuallyExclusive));
        assert_eq!(err.error_code(), "mutually_exclusive");
        assert_eq!(err.http_status_code(), 400);
    }

    #[test]
    fn test_error_display() {
        let err = LedgerError::UnbalancedEntry {
            debit: dec!(100.00),
            credit: dec!(90.00),
        };
        assert_eq!(
            err.to_string(),
            "Journal entry is not balanced. Debit: 100.00, Credit: 90.00"
        );

        let err = LedgerError::MissingField { field: "accountId" }.at_index(1);
        assert_eq!(err.to_string(), "Entry 1: accountId is required");
    }

    #[test]
    fn test_field_violation_mapping() {
        let err = LedgerError::field("memo", FieldViolation::TooLong { max: 200 });
        assert_eq!(err.to_string(), "memo must be at most 200 characters");
        assert!(matches!(
            LedgerError::field("description", FieldViolation::Missing),
            LedgerError::MissingField { field: "description" }
        ));
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = LedgerError::InvalidReference.at_index(0).into();
        assert_eq!(app.status_code(), 400);
        assert_eq!(app.error_code(), "invalid_reference");

        let app: AppError = LedgerError::Storage("deadlock".into()).into();
        assert_eq!(app.status_code(), 500);
        assert_eq!(app.public_message(), "Failed to save changes");

        let app: AppError = LedgerError::InsufficientLines.into();
        assert_eq!(app.public_message(), "Journal entry must have at least 2 lines");
    }
}
