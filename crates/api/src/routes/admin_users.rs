//! Administrator user management: list users and set their access level.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};
use bookwise_core::auth::requested_level;
use bookwise_db::{UserAccess, UserRepository};
use bookwise_shared::types::UserId;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    AppState,
    error::ApiError,
    extract::JsonBody,
    middleware::{AuthUser, require_admin},
};

/// Creates the admin user routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/users/{id}/access-level", put(set_access_level))
}

/// One user row.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRowResponse {
    /// User ID.
    pub id: UserId,
    /// Login email.
    pub email: String,
    /// Admin, Bookkeeper, ReportViewer, or Registered.
    pub access_level: &'static str,
}

impl From<UserAccess> for UserRowResponse {
    fn from(value: UserAccess) -> Self {
        Self {
            id: UserId::from_uuid(value.user.id),
            email: value.user.email,
            access_level: value.access_level.as_str(),
        }
    }
}

/// Request body for changing a user's access level.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAccessLevelRequest {
    /// Registered, Bookkeeper, or ReportViewer.
    pub access_level: Option<String>,
}

/// GET `/admin/users` - Every user by email, with their access level.
async fn list_users(State(state): State<AppState>, auth: AuthUser) -> Response {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let repo = UserRepository::new((*state.db).clone());
    match repo.list().await {
        Ok(users) => {
            let body: Vec<UserRowResponse> = users.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// PUT `/admin/users/{id}/access-level` - Grant Bookkeeper or ReportViewer,
/// or drop back to Registered.
async fn set_access_level(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<UserId>,
    payload: Result<JsonBody<SetAccessLevelRequest>, ApiError>,
) -> Response {
    if let Err(response) = require_admin(&auth) {
        return response;
    }
    let payload = match payload {
        Ok(JsonBody(payload)) => payload,
        Err(e) => return e.into_response(),
    };

    let level = match requested_level(payload.access_level.as_deref()) {
        Ok(level) => level,
        Err(e) => return ApiError::from(e).into_response(),
    };

    let repo = UserRepository::new((*state.db).clone());
    match repo.set_access_level(id, level).await {
        Ok(()) => {
            info!(user_id = %id, admin_id = %auth.user_id(), "Access level updated");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
