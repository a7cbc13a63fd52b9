//! Reports what the caller's role allows.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::{AppState, middleware::AuthUser};

/// Access level response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessLevelResponse {
    /// Admin, Bookkeeper, ReportViewer, or Registered.
    pub access_level: &'static str,
}

/// GET `/access-level`
async fn get_access_level(auth: AuthUser) -> Json<AccessLevelResponse> {
    Json(AccessLevelResponse {
        access_level: auth.access_level().as_str(),
    })
}

/// Creates access level routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/access-level", get(get_access_level))
}
