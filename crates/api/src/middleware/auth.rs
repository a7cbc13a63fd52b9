//! Authentication middleware and the role gate for protected routes.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{ApiError, AppState};
use bookwise_db::UserRepository;
use bookwise_shared::types::UserId;
use bookwise_shared::{AccessLevel, JwtError};

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Authentication middleware that validates JWT tokens.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the token using the JWT service
/// 3. Resolves the user's access level from their stored roles
/// 4. Stores the resulting [`AuthUser`] in request extensions for handlers
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(extract_bearer_token) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "missing_token",
                "message": "Authorization header with Bearer token is required"
            })),
        )
            .into_response();
    };

    let claims = match state.jwt_service.validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            let (error, message) = match e {
                JwtError::Expired => ("token_expired", "Token has expired"),
                _ => ("invalid_token", "Invalid or malformed token"),
            };

            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": error, "message": message })),
            )
                .into_response();
        }
    };

    let user_id = UserId::from_uuid(claims.user_id());
    let users = UserRepository::new((*state.db).clone());
    match users.access_level(user_id).await {
        Ok(Some(access_level)) => {
            request
                .extensions_mut()
                .insert(AuthUser::new(user_id, access_level));
            next.run(request).await
        }
        Ok(None) => {
            tracing::warn!(user_id = %user_id, "Token names an unknown user");
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "unknown_user",
                    "message": "Token does not belong to a known user"
                })),
            )
                .into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// The caller, as resolved by [`auth_middleware`].
///
/// ```ignore
/// async fn handler(auth: AuthUser) -> impl IntoResponse {
///     if let Err(response) = require_write(&auth) {
///         return response;
///     }
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    user_id: UserId,
    access_level: AccessLevel,
}

impl AuthUser {
    /// Creates an authenticated caller.
    #[must_use]
    pub const fn new(user_id: UserId, access_level: AccessLevel) -> Self {
        Self {
            user_id,
            access_level,
        }
    }

    /// Returns the caller's user ID.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns what the caller may do.
    #[must_use]
    pub const fn access_level(&self) -> AccessLevel {
        self.access_level
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "error": "unauthorized",
                        "message": "Authentication required"
                    })),
                )
            })
    }
}

/// Allows Admin, Bookkeeper, and ReportViewer.
pub fn require_read(auth: &AuthUser) -> Result<(), Response> {
    if auth.access_level().can_read() {
        Ok(())
    } else {
        Err(forbidden(auth))
    }
}

/// Allows Admin and Bookkeeper.
pub fn require_write(auth: &AuthUser) -> Result<(), Response> {
    if auth.access_level().can_write() {
        Ok(())
    } else {
        Err(forbidden(auth))
    }
}

/// Allows Admin only.
pub fn require_admin(auth: &AuthUser) -> Result<(), Response> {
    if auth.access_level() == AccessLevel::Admin {
        Ok(())
    } else {
        Err(forbidden(auth))
    }
}

fn forbidden(auth: &AuthUser) -> Response {
    tracing::warn!(
        user_id = %auth.user_id(),
        access_level = auth.access_level().as_str(),
        "Access level not permitted"
    );
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "error": "forbidden",
            "message": "Your role does not permit this action"
        })),
    )
        .into_response()
}
