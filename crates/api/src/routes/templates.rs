//! Booking template routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::routes::journal::EntryResponse;
use crate::{AppState, response::error_response};
use belegwerk_core::ledger::{BookingInput, SourceType};
use belegwerk_db::repositories::{
    AccountRepository, CreateTemplateInput, JournalRepository, TemplateRepository,
};
use belegwerk_shared::AppError;

/// Creates the template routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/templates", get(list_templates))
        .route("/templates", post(create_template))
        .route("/templates/{template_id}", get(get_template))
        .route("/templates/{template_id}", delete(delete_template))
        .route("/templates/{template_id}/book", post(book_from_template))
}

/// Query parameters for listing templates.
#[derive(Debug, Deserialize)]
pub struct ListTemplatesQuery {
    /// Name substring filter.
    pub search: Option<String>,
}

/// Request body for creating a template. Accounts are referenced by their
/// SKR04 numbers.
#[derive(Debug, Deserialize)]
pub struct CreateTemplateRequest {
    pub name: String,
    pub debit_account_number: i32,
    pub credit_account_number: i32,
    pub default_amount: Option<Decimal>,
    pub default_description: Option<String>,
}

/// Request body for booking from a template. Fields override the template
/// defaults; amount and description become mandatory when the template has
/// no default.
#[derive(Debug, Deserialize)]
pub struct BookFromTemplateRequest {
    /// Booking date, defaults to today.
    pub booking_date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
}

/// GET `/templates` - List templates, most used first.
async fn list_templates(
    State(state): State<AppState>,
    Query(query): Query<ListTemplatesQuery>,
) -> impl IntoResponse {
    let repo = TemplateRepository::new((*state.db).clone());
    match repo.list_templates(query.search.as_deref()).await {
        Ok(templates) => (StatusCode::OK, Json(json!({ "templates": templates }))).into_response(),
        Err(e) => error_response(&e.into()),
    }
}

/// POST `/templates` - Create a booking template.
async fn create_template(
    State(state): State<AppState>,
    Json(payload): Json<CreateTemplateRequest>,
) -> impl IntoResponse {
    let repo = TemplateRepository::new((*state.db).clone());
    let input = CreateTemplateInput {
        name: payload.name,
        debit_account_number: payload.debit_account_number,
        credit_account_number: payload.credit_account_number,
        default_amount: payload.default_amount,
        default_description: payload.default_description,
    };

    match repo.create_template(input).await {
        Ok(template) => (StatusCode::CREATED, Json(template)).into_response(),
        Err(e) => error_response(&e.into()),
    }
}

/// GET `/templates/{template_id}` - Get a single template.
async fn get_template(
    State(state): State<AppState>,
    Path(template_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TemplateRepository::new((*state.db).clone());
    match repo.get_template(template_id).await {
        Ok(template) => (StatusCode::OK, Json(template)).into_response(),
        Err(e) => error_response(&e.into()),
    }
}

/// DELETE `/templates/{template_id}` - Delete a template.
async fn delete_template(
    State(state): State<AppState>,
    Path(template_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TemplateRepository::new((*state.db).clone());
    match repo.delete_template(template_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(&e.into()),
    }
}

/// POST `/templates/{template_id}/book` - Create a journal entry from a
/// template and bump its use counter.
async fn book_from_template(
    State(state): State<AppState>,
    Path(template_id): Path<Uuid>,
    Json(payload): Json<BookFromTemplateRequest>,
) -> impl IntoResponse {
    let templates = TemplateRepository::new((*state.db).clone());
    let template = match templates.get_template(template_id).await {
        Ok(t) => t,
        Err(e) => return error_response(&e.into()),
    };

    let Some(amount) = payload.amount.or(template.default_amount) else {
        return error_response(&AppError::Validation(
            "Template has no default amount, amount is required".to_string(),
        ));
    };
    let Some(description) = payload
        .description
        .or_else(|| template.default_description.clone())
    else {
        return error_response(&AppError::Validation(
            "Template has no default description, description is required".to_string(),
        ));
    };

    // Templates store numbers; resolve them against today's chart
    let accounts = AccountRepository::new((*state.db).clone());
    let debit = match accounts.get_by_number(template.debit_account_number).await {
        Ok(account) => account,
        Err(e) => return error_response(&e.into()),
    };
    let credit = match accounts.get_by_number(template.credit_account_number).await {
        Ok(account) => account,
        Err(e) => return error_response(&e.into()),
    };

    let input = BookingInput {
        booking_date: payload.booking_date.unwrap_or_else(|| Utc::now().date_naive()),
        debit_account_id: debit.id,
        credit_account_id: credit.id,
        amount,
        description,
        source_type: SourceType::Manual,
        reversal_of_entry_id: None,
    };

    let journal = JournalRepository::new((*state.db).clone());
    let entry = match journal.create_entry(input).await {
        Ok(entry) => entry,
        Err(e) => return error_response(&e.into()),
    };

    // Counter update is best-effort; the booking already exists
    if let Err(e) = templates.record_use(template_id).await {
        tracing::warn!(error = %e, "failed to bump template use count");
    }

    (StatusCode::CREATED, Json(EntryResponse::from(entry))).into_response()
}
