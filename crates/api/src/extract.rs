//! Request body extraction with API-shaped rejections.

use axum::extract::{FromRequest, rejection::JsonRejection};
use bookwise_shared::AppError;

use crate::ApiError;

/// JSON request body whose rejections leave as a 400 `validation_error`.
///
/// Handlers take `Result<JsonBody<T>, ApiError>` and unwrap it after the
/// access check, so a caller without rights gets 403 whatever the body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }
}
