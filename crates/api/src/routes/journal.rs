//! Journal entry routes: booking, listing, locking and storno.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::{AppState, response::error_response};
use belegwerk_core::ledger::{BookingInput, SourceType};
use belegwerk_db::entities::{journal_entries, sea_orm_active_enums};
use belegwerk_db::repositories::{
    EntryFilter, JournalRepository, LockRepository, UpdateEntryInput,
};
use belegwerk_shared::types::{PageRequest, PageResponse};
use belegwerk_shared::AppError;

/// Creates the journal routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/entries", get(list_entries))
        .route("/entries", post(create_entry))
        .route("/entries/{entry_id}", get(get_entry))
        .route("/entries/{entry_id}", patch(update_entry))
        .route("/entries/{entry_id}", delete(delete_entry))
        .route("/entries/{entry_id}/lock", post(lock_entry))
        .route("/entries/{entry_id}/storno", post(storno_entry))
        .route("/entries/lock-period", post(lock_period))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing entries.
#[derive(Debug, Deserialize)]
pub struct ListEntriesQuery {
    /// Filter by date range start (YYYY-MM-DD).
    pub from: Option<NaiveDate>,
    /// Filter by date range end (YYYY-MM-DD).
    pub to: Option<NaiveDate>,
    /// Filter by account on either side of the booking.
    pub account: Option<Uuid>,
    /// Filter by entry origin.
    pub source: Option<String>,
    /// Filter by lock state.
    pub locked: Option<bool>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size (default: 50, max: 100).
    pub per_page: Option<u32>,
}

/// Request body for creating a journal entry.
#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    /// Booking date (YYYY-MM-DD).
    pub booking_date: NaiveDate,
    pub debit_account_id: Uuid,
    pub credit_account_id: Uuid,
    pub amount: Decimal,
    pub description: String,
}

/// Request body for updating an unlocked entry.
#[derive(Debug, Deserialize)]
pub struct UpdateEntryRequest {
    pub booking_date: Option<NaiveDate>,
    pub debit_account_id: Option<Uuid>,
    pub credit_account_id: Option<Uuid>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
}

/// Request body for locking a whole period.
#[derive(Debug, Deserialize)]
pub struct LockPeriodRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Response for a journal entry.
#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub id: Uuid,
    /// `BEL-YYYY-NNNNNN`
    pub entry_number: String,
    pub booking_date: NaiveDate,
    pub debit_account_id: Uuid,
    pub credit_account_id: Uuid,
    pub amount: Decimal,
    pub description: String,
    pub source_type: sea_orm_active_enums::SourceType,
    pub reversal_of_entry_id: Option<Uuid>,
    pub locked: bool,
    pub locked_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<journal_entries::Model> for EntryResponse {
    fn from(entry: journal_entries::Model) -> Self {
        Self {
            id: entry.id,
            entry_number: entry.entry_number,
            booking_date: entry.booking_date,
            debit_account_id: entry.debit_account_id,
            credit_account_id: entry.credit_account_id,
            amount: entry.amount,
            description: entry.description,
            source_type: entry.source_type,
            reversal_of_entry_id: entry.reversal_of_entry_id,
            locked: entry.locked,
            locked_at: entry.locked_at.map(|t| t.to_rfc3339()),
            created_at: entry.created_at.to_rfc3339(),
            updated_at: entry.updated_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/entries` - List journal entries with filters and pagination.
async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<ListEntriesQuery>,
) -> impl IntoResponse {
    let source_type = match query.source.as_deref() {
        None => None,
        Some(raw) => match raw.parse::<SourceType>() {
            Ok(s) => Some(sea_orm_active_enums::SourceType::from(s)),
            Err(e) => return error_response(&AppError::Validation(e)),
        },
    };

    let filter = EntryFilter {
        date_from: query.from,
        date_to: query.to,
        account_id: query.account,
        source_type,
        locked: query.locked,
    };
    let page = PageRequest {
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(50),
    }
    .clamped();

    let repo = JournalRepository::new((*state.db).clone());
    match repo.list_entries(filter, page.clone()).await {
        Ok((entries, total)) => {
            let items: Vec<EntryResponse> = entries.into_iter().map(Into::into).collect();
            let response = PageResponse::new(items, page.page, page.per_page, total);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(&e.into()),
    }
}

/// POST `/entries` - Create a manual journal entry.
async fn create_entry(
    State(state): State<AppState>,
    Json(payload): Json<CreateEntryRequest>,
) -> impl IntoResponse {
    let repo = JournalRepository::new((*state.db).clone());
    let input = BookingInput {
        booking_date: payload.booking_date,
        debit_account_id: payload.debit_account_id,
        credit_account_id: payload.credit_account_id,
        amount: payload.amount,
        description: payload.description,
        source_type: SourceType::Manual,
        reversal_of_entry_id: None,
    };

    match repo.create_entry(input).await {
        Ok(entry) => {
            tracing::info!(entry_number = %entry.entry_number, "entry created");
            (StatusCode::CREATED, Json(EntryResponse::from(entry))).into_response()
        }
        Err(e) => error_response(&e.into()),
    }
}

/// GET `/entries/{entry_id}` - Get a single entry.
async fn get_entry(State(state): State<AppState>, Path(entry_id): Path<Uuid>) -> impl IntoResponse {
    let repo = JournalRepository::new((*state.db).clone());
    match repo.get_entry(entry_id).await {
        Ok(entry) => (StatusCode::OK, Json(EntryResponse::from(entry))).into_response(),
        Err(e) => error_response(&e.into()),
    }
}

/// PATCH `/entries/{entry_id}` - Update an unlocked entry.
async fn update_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
    Json(payload): Json<UpdateEntryRequest>,
) -> impl IntoResponse {
    let repo = JournalRepository::new((*state.db).clone());
    let input = UpdateEntryInput {
        booking_date: payload.booking_date,
        debit_account_id: payload.debit_account_id,
        credit_account_id: payload.credit_account_id,
        amount: payload.amount,
        description: payload.description,
    };

    match repo.update_entry(entry_id, input).await {
        Ok(entry) => (StatusCode::OK, Json(EntryResponse::from(entry))).into_response(),
        Err(e) => error_response(&e.into()),
    }
}

/// DELETE `/entries/{entry_id}` - Delete an unlocked entry.
async fn delete_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = JournalRepository::new((*state.db).clone());
    match repo.delete_entry(entry_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(&e.into()),
    }
}

/// POST `/entries/{entry_id}/lock` - Lock an entry (idempotent).
async fn lock_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = LockRepository::new((*state.db).clone());
    match repo.lock_entry(entry_id).await {
        Ok(entry) => {
            tracing::info!(entry_number = %entry.entry_number, "entry locked");
            (StatusCode::OK, Json(EntryResponse::from(entry))).into_response()
        }
        Err(e) => error_response(&e.into()),
    }
}

/// POST `/entries/{entry_id}/storno` - Reverse a locked entry.
async fn storno_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = JournalRepository::new((*state.db).clone());
    let today = Utc::now().date_naive();

    match repo.reverse_entry(entry_id, today).await {
        Ok(storno) => {
            tracing::info!(
                entry_number = %storno.entry_number,
                reverses = ?storno.reversal_of_entry_id,
                "storno created"
            );
            (StatusCode::CREATED, Json(EntryResponse::from(storno))).into_response()
        }
        Err(e) => error_response(&e.into()),
    }
}

/// POST `/entries/lock-period` - Lock every entry in a date range.
async fn lock_period(
    State(state): State<AppState>,
    Json(payload): Json<LockPeriodRequest>,
) -> impl IntoResponse {
    if payload.start_date > payload.end_date {
        return error_response(&AppError::Validation(
            "start_date must not be after end_date".to_string(),
        ));
    }

    let repo = LockRepository::new((*state.db).clone());
    match repo.lock_period(payload.start_date, payload.end_date).await {
        Ok(locked) => (StatusCode::OK, Json(json!({ "locked": locked }))).into_response(),
        Err(e) => error_response(&e.into()),
    }
}
