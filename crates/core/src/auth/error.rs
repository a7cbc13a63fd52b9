//! User administration errors.

use bookwise_shared::AppError;
use bookwise_shared::types::UserId;
use thiserror::Error;

/// Errors raised while reading or changing a user's access level.
#[derive(Debug, Error)]
pub enum UserError {
    /// The request carried no access level.
    #[error("AccessLevel is required.")]
    MissingAccessLevel,

    /// The access level is not one an administrator may assign.
    #[error("Invalid AccessLevel. Allowed: Registered, Bookkeeper, ReportViewer")]
    InvalidAccessLevel(String),

    /// No user with this id.
    #[error("User not found.")]
    NotFound(UserId),

    /// Administrators keep their level.
    #[error("Cannot change the admin account access level.")]
    AdminLocked,

    /// Storage failure.
    #[error("Failed to update user: {0}")]
    Storage(String),
}

impl UserError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingAccessLevel => "missing_field",
            Self::InvalidAccessLevel(_) => "invalid_access_level",
            Self::NotFound(_) => "not_found",
            Self::AdminLocked => "admin_locked",
            Self::Storage(_) => "storage_error",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::MissingAccessLevel | Self::InvalidAccessLevel(_) | Self::AdminLocked => 400,
            Self::NotFound(_) => 404,
            Self::Storage(_) => 500,
        }
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        let message = err.to_string();
        match err {
            UserError::MissingAccessLevel
            | UserError::InvalidAccessLevel(_)
            | UserError::AdminLocked => Self::Validation(message),
            UserError::NotFound(_) => Self::NotFound(message),
            UserError::Storage(_) => Self::Database(message),
        }
    }
}
