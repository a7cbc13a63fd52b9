//! Chart of accounts routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use bookwise_core::account::{AccountDetails, AccountType};
use bookwise_db::AccountRepository;
use bookwise_db::entities::accounts;
use bookwise_shared::types::AccountId;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    AppState,
    error::ApiError,
    extract::JsonBody,
    middleware::{AuthUser, require_read, require_write},
};

/// Creates the account routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route(
            "/accounts/{id}",
            get(get_account).put(update_account).delete(delete_account),
        )
}

/// Request body for creating or replacing an account.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccountRequest {
    /// Unique account code.
    #[serde(default)]
    #[validate(custom(function = "crate::validation::account_code"))]
    pub account_code: String,
    /// Display name.
    #[serde(default)]
    #[validate(custom(function = "crate::validation::account_name"))]
    pub name: String,
    /// Asset, Liability, Equity, Revenue, or Expense (any case).
    #[serde(default)]
    pub account_type: String,
}

impl AccountRequest {
    fn to_details(&self) -> Result<AccountDetails, ApiError> {
        self.validate()
            .map_err(|errors| ApiError::from_validation(&errors))?;
        let account_type: AccountType = self.account_type.parse()?;
        Ok(AccountDetails::new(
            &self.account_code,
            &self.name,
            account_type,
        )?)
    }
}

/// Response for an account.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    /// Account ID.
    pub id: i32,
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub name: String,
    /// Account type name.
    pub account_type: &'static str,
    /// Creation time.
    pub created_at: DateTimeWithTimeZone,
    /// Last update time, if any.
    pub updated_at: Option<DateTimeWithTimeZone>,
}

impl From<accounts::Model> for AccountResponse {
    fn from(model: accounts::Model) -> Self {
        Self {
            id: model.id,
            account_code: model.account_code,
            name: model.name,
            account_type: AccountType::from(model.account_type).as_str(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// GET `/accounts` - List accounts ordered by code.
async fn list_accounts(State(state): State<AppState>, auth: AuthUser) -> Response {
    if let Err(response) = require_read(&auth) {
        return response;
    }

    let repo = AccountRepository::new((*state.db).clone());
    match repo.list().await {
        Ok(accounts) => {
            let response: Vec<AccountResponse> =
                accounts.into_iter().map(AccountResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// GET `/accounts/{id}` - Get one account.
async fn get_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<AccountId>,
) -> Response {
    if let Err(response) = require_read(&auth) {
        return response;
    }

    let repo = AccountRepository::new((*state.db).clone());
    match repo.find_by_id(id).await {
        Ok(account) => (StatusCode::OK, Json(AccountResponse::from(account))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST `/accounts` - Create an account.
async fn create_account(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<JsonBody<AccountRequest>, ApiError>,
) -> Response {
    if let Err(response) = require_write(&auth) {
        return response;
    }
    let payload = match payload {
        Ok(JsonBody(payload)) => payload,
        Err(e) => return e.into_response(),
    };

    let details = match payload.to_details() {
        Ok(details) => details,
        Err(e) => return e.into_response(),
    };

    let repo = AccountRepository::new((*state.db).clone());
    match repo.create(&details).await {
        Ok(account) => (StatusCode::CREATED, Json(AccountResponse::from(account))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// PUT `/accounts/{id}` - Replace an account's code, name, and type.
async fn update_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<AccountId>,
    payload: Result<JsonBody<AccountRequest>, ApiError>,
) -> Response {
    if let Err(response) = require_write(&auth) {
        return response;
    }
    let payload = match payload {
        Ok(JsonBody(payload)) => payload,
        Err(e) => return e.into_response(),
    };

    let details = match payload.to_details() {
        Ok(details) => details,
        Err(e) => return e.into_response(),
    };

    let repo = AccountRepository::new((*state.db).clone());
    match repo.update(id, &details).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// DELETE `/accounts/{id}` - Delete an unreferenced account.
async fn delete_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<AccountId>,
) -> Response {
    if let Err(response) = require_write(&auth) {
        return response;
    }

    let repo = AccountRepository::new((*state.db).clone());
    match repo.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
