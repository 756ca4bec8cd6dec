//! DATEV export route.

use axum::{
    Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{AppState, response::error_response};
use belegwerk_core::datev::{self, DatevEntry};
use belegwerk_db::repositories::{LockRepository, ReportRepository};
use belegwerk_shared::AppError;

/// Creates the export routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/export/datev", get(datev_export))
}

/// Query parameters for the DATEV export.
#[derive(Debug, Deserialize)]
pub struct DatevQuery {
    /// Export range start (YYYY-MM-DD).
    pub start: NaiveDate,
    /// Export range end (YYYY-MM-DD).
    pub end: NaiveDate,
    /// Lock the whole range before exporting (Festschreibung).
    #[serde(default)]
    pub lock: bool,
    /// Restrict the export to locked entries. Defaults to true; unlocked
    /// entries may still change and should not be handed to the tax advisor.
    #[serde(default = "default_only_locked")]
    pub only_locked: bool,
}

fn default_only_locked() -> bool {
    true
}

/// GET `/export/datev` - Download the period as a DATEV Buchungsstapel.
async fn datev_export(
    State(state): State<AppState>,
    Query(query): Query<DatevQuery>,
) -> impl IntoResponse {
    if query.start > query.end {
        return error_response(&AppError::Validation(
            "start must not be after end".to_string(),
        ));
    }

    if query.lock {
        let locks = LockRepository::new((*state.db).clone());
        match locks.lock_period(query.start, query.end).await {
            Ok(locked) => tracing::info!(locked, "period locked for export"),
            Err(e) => return error_response(&e.into()),
        }
    }

    let repo = ReportRepository::new((*state.db).clone());
    let entries = match repo
        .entries_in_range(query.start, query.end, query.only_locked)
        .await
    {
        Ok(entries) => entries,
        Err(e) => return error_response(&e.into()),
    };
    let rows: Vec<DatevEntry> = entries.iter().map(|e| e.to_datev_entry()).collect();

    match datev::generate(&rows, query.start, query.end) {
        Ok(export) => {
            let disposition = format!("attachment; filename=\"{}\"", export.filename);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, export.mime_type.to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                export.bytes,
            )
                .into_response()
        }
        Err(e) => error_response(&e.into()),
    }
}
