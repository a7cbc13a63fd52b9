//! Error-to-response mapping.
//!
//! Every failure leaves the API as `{"error": "<code>", "message": "<text>"}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bookwise_core::account::AccountError;
use bookwise_core::auth::UserError;
use bookwise_core::ledger::LedgerError;
use bookwise_core::transaction::TransactionError;
use bookwise_shared::AppError;
use serde_json::json;
use validator::{ValidationErrors, ValidationErrorsKind};

/// An [`AppError`] on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// Builds a 400 from request-shape validation failures.
    #[must_use]
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        Self(AppError::Validation(first_message(errors)))
    }

    /// Same as [`ApiError::from_validation`], prefixed with a batch index.
    #[must_use]
    pub fn from_batch_validation(index: usize, errors: &ValidationErrors) -> Self {
        Self(AppError::Validation(format!(
            "Entry {index}: {}",
            first_message(errors)
        )))
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        Self(err.into())
    }
}

impl From<TransactionError> for ApiError {
    fn from(err: TransactionError) -> Self {
        Self(err.into())
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        Self(err.into())
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.public_message()
            })),
        )
            .into_response()
    }
}

/// Picks one message out of a (possibly nested) validation report.
///
/// Fields are visited in name order and list items in index order, so the
/// same request always yields the same message.
fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in fields {
        match kind {
            ValidationErrorsKind::Field(list) => {
                if let Some(error) = list.first() {
                    return error
                        .message
                        .as_ref()
                        .map_or_else(|| format!("{field} is invalid"), |m| m.to_string());
                }
            }
            ValidationErrorsKind::Struct(inner) => return first_message(inner),
            ValidationErrorsKind::List(items) => {
                if let Some((index, inner)) = items.iter().next() {
                    return format!("{field}[{index}]: {}", first_message(inner));
                }
            }
        }
    }

    "Request is invalid".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookwise_shared::types::AccountId;
    use rstest::rstest;
    use validator::ValidationError;

    #[rstest]
    #[case(AppError::NotFound("x".into()), StatusCode::NOT_FOUND)]
    #[case(AppError::Conflict("x".into()), StatusCode::CONFLICT)]
    #[case(AppError::InvalidReference("x".into()), StatusCode::BAD_REQUEST)]
    #[case(AppError::Database("x".into()), StatusCode::INTERNAL_SERVER_ERROR)]
    fn test_status_mapping(#[case] err: AppError, #[case] expected: StatusCode) {
        assert_eq!(ApiError(err).into_response().status(), expected);
    }

    #[test]
    fn test_domain_errors_convert() {
        let in_use = ApiError::from(AccountError::InUse(AccountId::new(3)));
        assert_eq!(in_use.0.status_code(), 409);

        let bad_ref = ApiError::from(LedgerError::InvalidReference);
        assert_eq!(bad_ref.0.error_code(), "invalid_reference");
    }

    #[test]
    fn test_first_message_uses_custom_message() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "name",
            ValidationError::new("length").with_message("name is too long".into()),
        );
        errors.add("accountCode", ValidationError::new("length"));

        assert_eq!(first_message(&errors), "accountCode is invalid");
    }

    #[test]
    fn test_batch_validation_is_prefixed() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "description",
            ValidationError::new("length").with_message("too long".into()),
        );

        let err = ApiError::from_batch_validation(4, &errors);

        assert_eq!(err.0.public_message(), "Entry 4: too long");
    }
}
