//! Journal entry routes, including the bulk import.
//!
//! Requests are shape-checked here; balancing, line rules, and account
//! existence are decided by [`LedgerService`].

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use bookwise_core::ledger::{JournalEntryDraft, JournalLineDraft, LedgerService};
use bookwise_db::{AccountRepository, JournalEntryRepository, JournalEntryWithLines};
use bookwise_shared::types::{AccountId, JournalEntryId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

use crate::{
    AppState,
    error::ApiError,
    extract::JsonBody,
    middleware::{AuthUser, require_read, require_write},
};

/// Creates the journal entry routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/journal-entries", get(list_entries).post(create_entry))
        .route("/journal-entries/bulk", post(create_entries_bulk))
        .route("/journal-entries/{id}", get(get_entry).delete(delete_entry))
}

/// One line of a journal entry request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JournalLineRequest {
    /// Account to post to.
    #[serde(default)]
    pub account_id: i32,
    /// Debit amount; string or number, defaults to zero.
    #[serde(default)]
    pub debit: Decimal,
    /// Credit amount; string or number, defaults to zero.
    #[serde(default)]
    pub credit: Decimal,
    /// Optional line memo.
    #[validate(custom(function = "crate::validation::memo"))]
    pub memo: Option<String>,
}

/// Request body for one journal entry.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntryRequest {
    /// Entry date (YYYY-MM-DD).
    pub occurred_on: Option<NaiveDate>,
    /// Entry description.
    #[serde(default)]
    #[validate(custom(function = "crate::validation::description"))]
    pub description: String,
    /// Optional external reference.
    #[validate(custom(function = "crate::validation::reference_no"))]
    pub reference_no: Option<String>,
    /// Entry lines, in posting order.
    #[serde(default)]
    #[validate(nested)]
    pub lines: Vec<JournalLineRequest>,
}

impl JournalEntryRequest {
    fn to_draft(&self) -> JournalEntryDraft {
        JournalEntryDraft {
            occurred_on: self.occurred_on,
            description: self.description.clone(),
            reference_no: self.reference_no.clone(),
            lines: self
                .lines
                .iter()
                .map(|line| JournalLineDraft {
                    account_id: AccountId::new(line.account_id),
                    debit: line.debit,
                    credit: line.credit,
                    memo: line.memo.clone(),
                })
                .collect(),
        }
    }
}

/// Request body for the bulk import.
#[derive(Debug, Deserialize)]
pub struct BulkJournalEntryRequest {
    /// Entries to commit together.
    #[serde(default)]
    pub entries: Vec<JournalEntryRequest>,
}

/// Response for a journal entry line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalLineResponse {
    /// Line ID.
    pub id: i32,
    /// Account ID.
    pub account_id: i32,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Line memo.
    pub memo: Option<String>,
}

/// Response for a journal entry with its lines.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntryResponse {
    /// Entry ID.
    pub id: i32,
    /// Entry date.
    pub occurred_on: NaiveDate,
    /// Description.
    pub description: String,
    /// External reference.
    pub reference_no: Option<String>,
    /// Sum of line debits.
    pub total_debit: Decimal,
    /// Sum of line credits.
    pub total_credit: Decimal,
    /// Creation time.
    pub created_at: DateTimeWithTimeZone,
    /// Last update time, if any.
    pub updated_at: Option<DateTimeWithTimeZone>,
    /// Lines in id order.
    pub lines: Vec<JournalLineResponse>,
}

impl From<JournalEntryWithLines> for JournalEntryResponse {
    fn from(value: JournalEntryWithLines) -> Self {
        let JournalEntryWithLines { entry, lines } = value;
        Self {
            id: entry.id,
            occurred_on: entry.occurred_on,
            description: entry.description,
            reference_no: entry.reference_no,
            total_debit: lines.iter().map(|l| l.debit).sum(),
            total_credit: lines.iter().map(|l| l.credit).sum(),
            created_at: entry.created_at,
            updated_at: entry.updated_at,
            lines: lines
                .into_iter()
                .map(|l| JournalLineResponse {
                    id: l.id,
                    account_id: l.account_id,
                    debit: l.debit,
                    credit: l.credit,
                    memo: l.memo,
                })
                .collect(),
        }
    }
}

/// GET `/journal-entries` - List entries, newest first, with their lines.
async fn list_entries(State(state): State<AppState>, auth: AuthUser) -> Response {
    if let Err(response) = require_read(&auth) {
        return response;
    }

    let repo = JournalEntryRepository::new((*state.db).clone());
    match repo.list().await {
        Ok(entries) => {
            let response: Vec<JournalEntryResponse> = entries
                .into_iter()
                .map(JournalEntryResponse::from)
                .collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// GET `/journal-entries/{id}` - Get one entry with its lines.
async fn get_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<JournalEntryId>,
) -> Response {
    if let Err(response) = require_read(&auth) {
        return response;
    }

    let repo = JournalEntryRepository::new((*state.db).clone());
    match repo.find_by_id(id).await {
        Ok(entry) => (StatusCode::OK, Json(JournalEntryResponse::from(entry))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST `/journal-entries` - Create one balanced entry.
async fn create_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<JsonBody<JournalEntryRequest>, ApiError>,
) -> Response {
    if let Err(response) = require_write(&auth) {
        return response;
    }
    let payload = match payload {
        Ok(JsonBody(payload)) => payload,
        Err(e) => return e.into_response(),
    };

    if let Err(errors) = payload.validate() {
        return ApiError::from_validation(&errors).into_response();
    }

    let accounts = AccountRepository::new((*state.db).clone());
    let journal = JournalEntryRepository::new((*state.db).clone());

    let id = match LedgerService::create_entry(&accounts, &journal, &payload.to_draft()).await {
        Ok(id) => id,
        Err(e) => {
            warn!(error = %e, "Rejected journal entry");
            return ApiError::from(e).into_response();
        }
    };

    info!(journal_entry_id = %id, user_id = %auth.user_id(), "Journal entry created");

    match journal.find_by_id(id).await {
        Ok(entry) => (StatusCode::CREATED, Json(JournalEntryResponse::from(entry))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST `/journal-entries/bulk` - Commit up to 500 entries, all or nothing.
async fn create_entries_bulk(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<JsonBody<BulkJournalEntryRequest>, ApiError>,
) -> Response {
    if let Err(response) = require_write(&auth) {
        return response;
    }
    let payload = match payload {
        Ok(JsonBody(payload)) => payload,
        Err(e) => return e.into_response(),
    };

    if let Err(e) = LedgerService::check_batch_size(payload.entries.len()) {
        return ApiError::from(e).into_response();
    }
    for (index, entry) in payload.entries.iter().enumerate() {
        if let Err(errors) = entry.validate() {
            return ApiError::from_batch_validation(index, &errors).into_response();
        }
    }

    let drafts: Vec<JournalEntryDraft> = payload
        .entries
        .iter()
        .map(JournalEntryRequest::to_draft)
        .collect();

    let accounts = AccountRepository::new((*state.db).clone());
    let journal = JournalEntryRepository::new((*state.db).clone());

    match LedgerService::commit_batch(&accounts, &journal, &drafts).await {
        Ok(result) => {
            info!(
                count = result.created_count,
                user_id = %auth.user_id(),
                "Journal entry batch committed"
            );
            (StatusCode::CREATED, Json(result)).into_response()
        }
        Err(e) => {
            warn!(error = %e, entries = drafts.len(), "Rejected journal entry batch");
            ApiError::from(e).into_response()
        }
    }
}

/// DELETE `/journal-entries/{id}` - Delete an entry and its lines.
async fn delete_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<JournalEntryId>,
) -> Response {
    if let Err(response) = require_write(&auth) {
        return response;
    }

    let repo = JournalEntryRepository::new((*state.db).clone());
    match repo.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
