//! Field checks used by the request DTOs' `validator` derives.
//!
//! Text limits are measured on the trimmed value, the same text that gets
//! stored.

use std::borrow::Cow;

use bookwise_core::{account, ledger, transaction};
use validator::ValidationError;

fn max_trimmed(value: &str, max: usize, field: &str) -> Result<(), ValidationError> {
    if value.trim().chars().count() <= max {
        return Ok(());
    }
    Err(ValidationError::new("length").with_message(Cow::Owned(format!(
        "{field} must be at most {max} characters"
    ))))
}

pub(crate) fn account_code(value: &str) -> Result<(), ValidationError> {
    max_trimmed(value, account::CODE_MAX_LEN, "accountCode")
}

pub(crate) fn account_name(value: &str) -> Result<(), ValidationError> {
    max_trimmed(value, account::NAME_MAX_LEN, "name")
}

pub(crate) fn description(value: &str) -> Result<(), ValidationError> {
    max_trimmed(value, ledger::types::DESCRIPTION_MAX_LEN, "description")
}

pub(crate) fn reference_no(value: &str) -> Result<(), ValidationError> {
    max_trimmed(value, ledger::types::REFERENCE_MAX_LEN, "referenceNo")
}

pub(crate) fn memo(value: &str) -> Result<(), ValidationError> {
    max_trimmed(value, ledger::types::MEMO_MAX_LEN, "memo")
}

pub(crate) fn category(value: &str) -> Result<(), ValidationError> {
    max_trimmed(value, transaction::CATEGORY_MAX_LEN, "category")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_does_not_count() {
        let padded = format!("   {}   ", "C".repeat(20));
        assert!(account_code(&padded).is_ok());
    }

    #[test]
    fn test_long_value_is_rejected_with_field_name() {
        let err = description(&"d".repeat(201)).unwrap_err();
        assert_eq!(
            err.message.as_deref(),
            Some("description must be at most 200 characters")
        );
    }
}
