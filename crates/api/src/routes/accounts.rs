//! Chart of accounts routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{AppState, response::error_response};
use belegwerk_shared::AppError;
use belegwerk_db::entities::sea_orm_active_enums::AccountType;
use belegwerk_db::repositories::{
    AccountFilter, AccountRepository, CreateAccountInput, UpdateAccountInput,
};

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts", post(create_account))
        .route("/accounts/{account_id}", get(get_account))
        .route("/accounts/{account_id}", patch(update_account))
        .route("/accounts/{account_id}", delete(delete_account))
}

/// Query parameters for listing accounts.
#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
    /// Filter by account type (`ASSET`, `LIABILITY`, `REVENUE`, `EXPENSE`).
    #[serde(rename = "type")]
    pub account_type: Option<String>,
    /// When true, only active accounts are returned.
    #[serde(default)]
    pub active: bool,
}

/// Request body for creating an account.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Four-digit SKR04 number.
    pub account_number: i32,
    pub name: String,
    pub account_type: AccountType,
    pub vat_key: Option<String>,
}

/// Request body for updating an account.
#[derive(Debug, Deserialize)]
pub struct UpdateAccountRequest {
    pub name: Option<String>,
    /// `Some(None)` clears the VAT key.
    #[serde(default, with = "double_option")]
    pub vat_key: Option<Option<String>>,
    pub active: Option<bool>,
}

/// Distinguishes an absent field from an explicit `null`.
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(de: D) -> Result<Option<Option<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(de).map(Some)
    }
}

/// GET `/accounts` - List the chart of accounts.
async fn list_accounts(
    State(state): State<AppState>,
    Query(query): Query<ListAccountsQuery>,
) -> impl IntoResponse {
    let account_type = match query.account_type.as_deref() {
        None => None,
        Some(raw) => match raw.parse::<belegwerk_core::ledger::AccountType>() {
            Ok(t) => Some(AccountType::from(t)),
            Err(e) => return error_response(&AppError::Validation(e)),
        },
    };

    let repo = AccountRepository::new((*state.db).clone());
    let filter = AccountFilter {
        account_type,
        active_only: query.active,
    };

    match repo.list_accounts(filter).await {
        Ok(accounts) => (StatusCode::OK, Json(json!({ "accounts": accounts }))).into_response(),
        Err(e) => error_response(&e.into()),
    }
}

/// POST `/accounts` - Create a new account.
async fn create_account(
    State(state): State<AppState>,
    Json(payload): Json<CreateAccountRequest>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());
    let input = CreateAccountInput {
        account_number: payload.account_number,
        name: payload.name,
        account_type: payload.account_type,
        vat_key: payload.vat_key,
    };

    match repo.create_account(input).await {
        Ok(account) => (StatusCode::CREATED, Json(account)).into_response(),
        Err(e) => error_response(&e.into()),
    }
}

/// GET `/accounts/{account_id}` - Get a single account.
async fn get_account(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());
    match repo.get_account(account_id).await {
        Ok(account) => (StatusCode::OK, Json(account)).into_response(),
        Err(e) => error_response(&e.into()),
    }
}

/// PATCH `/accounts/{account_id}` - Update name, VAT key or active flag.
async fn update_account(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
    Json(payload): Json<UpdateAccountRequest>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());
    let input = UpdateAccountInput {
        name: payload.name,
        vat_key: payload.vat_key,
        active: payload.active,
    };

    match repo.update_account(account_id, input).await {
        Ok(account) => (StatusCode::OK, Json(account)).into_response(),
        Err(e) => error_response(&e.into()),
    }
}

/// DELETE `/accounts/{account_id}` - Delete an account without entries.
async fn delete_account(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());
    match repo.delete_account(account_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(&e.into()),
    }
}
