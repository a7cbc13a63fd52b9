//! Transaction domain types.

use bookwise_shared::types::AccountId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::TransactionError;
use crate::fields;

/// Maximum length of a transaction description.
pub const DESCRIPTION_MAX_LEN: usize = 200;
/// Maximum length of a category.
pub const CATEGORY_MAX_LEN: usize = 100;
/// Maximum length of a reference.
pub const REFERENCE_MAX_LEN: usize = 50;

/// Income or expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Money in; counts positive.
    Income,
    /// Money out; counts negative.
    Expense,
}

impl TransactionKind {
    /// Returns the stored type tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    /// Applies the kind's sign to an amount.
    #[must_use]
    pub fn signed_amount(self, amount: Decimal) -> Decimal {
        match self {
            Self::Income => amount,
            Self::Expense => -amount,
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = TransactionError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("Income") {
            Ok(Self::Income)
        } else if s.eq_ignore_ascii_case("Expense") {
            Ok(Self::Expense)
        } else {
            Err(TransactionError::InvalidKind(s.to_string()))
        }
    }
}

/// Transaction fields as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    /// Account the amount is posted against.
    pub account_id: AccountId,
    /// Date of the transaction; required.
    pub occurred_on: Option<NaiveDate>,
    /// Free-text description; required.
    pub description: String,
    /// Positive amount.
    pub amount: Decimal,
    /// Optional category label.
    pub category: Option<String>,
    /// Optional external reference.
    pub reference_no: Option<String>,
}

/// Validated transaction fields shared by both kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDetails {
    account_id: AccountId,
    occurred_on: NaiveDate,
    description: String,
    amount: Decimal,
    category: Option<String>,
    reference_no: Option<String>,
}

impl TransactionDetails {
    /// Validates a draft.
    ///
    /// # Errors
    ///
    /// - `MissingField` for a non-positive account id, missing date, or blank
    ///   description
    /// - `OutOfRange` for a non-positive or sub-cent amount, or text over its
    ///   length limit
    pub fn new(draft: &TransactionDraft) -> Result<Self, TransactionError> {
        if !draft.account_id.is_assigned() {
            return Err(TransactionError::MissingField { field: "accountId" });
        }
        let occurred_on = draft.occurred_on.ok_or(TransactionError::MissingField {
            field: "occurredOn",
        })?;
        let description = fields::required_text(&draft.description, DESCRIPTION_MAX_LEN)
            .map_err(|v| TransactionError::field("description", v))?;

        if draft.amount <= Decimal::ZERO {
            return Err(TransactionError::OutOfRange {
                field: "amount",
                reason: "must be greater than zero".to_string(),
            });
        }
        if !fields::fits_money_scale(draft.amount) {
            return Err(TransactionError::OutOfRange {
                field: "amount",
                reason: format!("must have at most {} decimal places", fields::MONEY_SCALE),
            });
        }
        if !fields::fits_money_precision(draft.amount) {
            return Err(TransactionError::OutOfRange {
                field: "amount",
                reason: format!(
                    "must have at most {} integer digits",
                    fields::MONEY_INTEGER_DIGITS
                ),
            });
        }

        let category = fields::optional_text(draft.category.as_deref(), CATEGORY_MAX_LEN)
            .map_err(|v| TransactionError::field("category", v))?;
        let reference_no = fields::optional_text(draft.reference_no.as_deref(), REFERENCE_MAX_LEN)
            .map_err(|v| TransactionError::field("referenceNo", v))?;

        Ok(Self {
            account_id: draft.account_id,
            occurred_on,
            description,
            amount: draft.amount,
            category,
            reference_no,
        })
    }

    /// Account the amount is posted against.
    #[must_use]
    pub const fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Date of the transaction.
    #[must_use]
    pub const fn occurred_on(&self) -> NaiveDate {
        self.occurred_on
    }

    /// Trimmed description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Positive amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Trimmed category, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Trimmed reference, if any.
    #[must_use]
    pub fn reference_no(&self) -> Option<&str> {
        self.reference_no.as_deref()
    }
}
