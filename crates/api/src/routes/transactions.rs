//! Income and expense transaction routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use bookwise_core::transaction::{TransactionDetails, TransactionDraft, TransactionKind};
use bookwise_db::TransactionRepository;
use bookwise_db::entities::transactions;
use bookwise_shared::types::{AccountId, TransactionId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    AppState,
    error::ApiError,
    extract::JsonBody,
    middleware::{AuthUser, require_read, require_write},
};

/// Creates the transaction routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}

/// Request body for creating or updating a transaction.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// Account the amount is posted against.
    #[serde(default)]
    pub account_id: i32,
    /// Income or Expense (any case). Ignored on update.
    pub transaction_type: Option<String>,
    /// Transaction date (YYYY-MM-DD).
    pub occurred_on: Option<NaiveDate>,
    /// Description.
    #[serde(default)]
    #[validate(custom(function = "crate::validation::description"))]
    pub description: String,
    /// Positive amount; string or number.
    #[serde(default)]
    pub amount: Decimal,
    /// Optional category label.
    #[validate(custom(function = "crate::validation::category"))]
    pub category: Option<String>,
    /// Optional external reference.
    #[validate(custom(function = "crate::validation::reference_no"))]
    pub reference_no: Option<String>,
}

impl TransactionRequest {
    fn kind(&self) -> Result<TransactionKind, ApiError> {
        Ok(self.transaction_type.as_deref().unwrap_or_default().parse()?)
    }

    fn to_details(&self) -> Result<TransactionDetails, ApiError> {
        self.validate()
            .map_err(|errors| ApiError::from_validation(&errors))?;
        Ok(TransactionDetails::new(&TransactionDraft {
            account_id: AccountId::new(self.account_id),
            occurred_on: self.occurred_on,
            description: self.description.clone(),
            amount: self.amount,
            category: self.category.clone(),
            reference_no: self.reference_no.clone(),
        })?)
    }
}

/// Response for a transaction.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: i32,
    /// Account ID.
    pub account_id: i32,
    /// "Income" or "Expense".
    pub transaction_type: &'static str,
    /// Transaction date.
    pub occurred_on: NaiveDate,
    /// Description.
    pub description: String,
    /// Unsigned amount.
    pub amount: Decimal,
    /// Amount with the sign implied by the type.
    pub signed_amount: Decimal,
    /// Category label.
    pub category: Option<String>,
    /// External reference.
    pub reference_no: Option<String>,
    /// Creation time.
    pub created_at: DateTimeWithTimeZone,
    /// Last update time, if any.
    pub updated_at: Option<DateTimeWithTimeZone>,
}

impl From<transactions::Model> for TransactionResponse {
    fn from(model: transactions::Model) -> Self {
        Self {
            id: model.id,
            account_id: model.account_id,
            transaction_type: model.kind().as_str(),
            occurred_on: model.occurred_on,
            signed_amount: model.signed_amount(),
            description: model.description,
            amount: model.amount,
            category: model.category,
            reference_no: model.reference_no,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// GET `/transactions` - List transactions, newest first.
async fn list_transactions(State(state): State<AppState>, auth: AuthUser) -> Response {
    if let Err(response) = require_read(&auth) {
        return response;
    }

    let repo = TransactionRepository::new((*state.db).clone());
    match repo.list().await {
        Ok(list) => {
            let response: Vec<TransactionResponse> =
                list.into_iter().map(TransactionResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// GET `/transactions/{id}` - Get one transaction.
async fn get_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TransactionId>,
) -> Response {
    if let Err(response) = require_read(&auth) {
        return response;
    }

    let repo = TransactionRepository::new((*state.db).clone());
    match repo.find_by_id(id).await {
        Ok(model) => (StatusCode::OK, Json(TransactionResponse::from(model))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST `/transactions` - Record an income or expense.
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<JsonBody<TransactionRequest>, ApiError>,
) -> Response {
    if let Err(response) = require_write(&auth) {
        return response;
    }
    let payload = match payload {
        Ok(JsonBody(payload)) => payload,
        Err(e) => return e.into_response(),
    };

    let prepared = payload
        .kind()
        .and_then(|kind| payload.to_details().map(|details| (kind, details)));
    let (kind, details) = match prepared {
        Ok(prepared) => prepared,
        Err(e) => return e.into_response(),
    };

    let repo = TransactionRepository::new((*state.db).clone());
    match repo.create(kind, &details).await {
        Ok(model) => (StatusCode::CREATED, Json(TransactionResponse::from(model))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// PUT `/transactions/{id}` - Replace a transaction's fields; the type is kept.
async fn update_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TransactionId>,
    payload: Result<JsonBody<TransactionRequest>, ApiError>,
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

    let repo = TransactionRepository::new((*state.db).clone());
    match repo.update(id, &details).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// DELETE `/transactions/{id}` - Delete a transaction.
async fn delete_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TransactionId>,
) -> Response {
    if let Err(response) = require_write(&auth) {
        return response;
    }

    let repo = TransactionRepository::new((*state.db).clone());
    match repo.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
