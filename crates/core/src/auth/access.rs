//! Access-level requests from administrators.

use bookwise_shared::AccessLevel;

use super::error::UserError;

/// Reads the level an administrator asked for.
///
/// # Errors
///
/// - `MissingAccessLevel` when absent or blank
/// - `InvalidAccessLevel` for Admin or any unknown name
pub fn requested_level(raw: Option<&str>) -> Result<AccessLevel, UserError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(UserError::MissingAccessLevel);
    }
    AccessLevel::parse_assignable(raw)
        .ok_or_else(|| UserError::InvalidAccessLevel(raw.to_string()))
}
