//! BWA report routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{AppState, response::error_response};
use belegwerk_core::bwa::{self, BwaPeriod, BwaReport, Posting};
use belegwerk_db::repositories::ReportRepository;
use belegwerk_shared::AppError;

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/reports/bwa", get(bwa_report))
}

/// Query parameters for the BWA report.
#[derive(Debug, Deserialize)]
pub struct BwaQuery {
    /// Period start (YYYY-MM-DD).
    pub start: NaiveDate,
    /// Period end (YYYY-MM-DD).
    pub end: NaiveDate,
    /// Comparison period start; requires `compare_end`.
    pub compare_start: Option<NaiveDate>,
    /// Comparison period end; requires `compare_start`.
    pub compare_end: Option<NaiveDate>,
}

/// GET `/reports/bwa` - Betriebswirtschaftliche Auswertung for a period,
/// optionally with a comparison period.
async fn bwa_report(
    State(state): State<AppState>,
    Query(query): Query<BwaQuery>,
) -> impl IntoResponse {
    if query.start > query.end {
        return error_response(&AppError::Validation(
            "start must not be after end".to_string(),
        ));
    }

    let repo = ReportRepository::new((*state.db).clone());
    let current = match build_period(&repo, query.start, query.end).await {
        Ok(period) => period,
        Err(e) => return error_response(&e),
    };

    let comparison = match (query.compare_start, query.compare_end) {
        (None, None) => None,
        (Some(start), Some(end)) => {
            if start > end {
                return error_response(&AppError::Validation(
                    "compare_start must not be after compare_end".to_string(),
                ));
            }
            match build_period(&repo, start, end).await {
                Ok(period) => Some(period),
                Err(e) => return error_response(&e),
            }
        }
        _ => {
            return error_response(&AppError::Validation(
                "compare_start and compare_end must be given together".to_string(),
            ));
        }
    };

    let report = BwaReport {
        current,
        comparison,
    };
    (StatusCode::OK, Json(report)).into_response()
}

async fn build_period(
    repo: &ReportRepository,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<BwaPeriod, AppError> {
    let entries = repo.entries_in_range(start, end, false).await?;
    let postings: Vec<Posting> = entries.iter().map(|e| e.to_posting()).collect();
    Ok(bwa::build_period(start, end, &postings)?)
}