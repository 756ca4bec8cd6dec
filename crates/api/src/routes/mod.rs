//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod accounts;
pub mod export;
pub mod health;
pub mod journal;
pub mod reports;
pub mod templates;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(accounts::routes())
        .merge(journal::routes())
        .merge(templates::routes())
        .merge(reports::routes())
        .merge(export::routes())
}
