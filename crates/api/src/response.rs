//! Error mapping from [`AppError`] to JSON API responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{error, warn};

use belegwerk_shared::AppError;

/// Renders an application error as `{"error": CODE, "message": text}` with
/// the matching status code. Server-side failures are logged here so the
/// handlers do not have to.
pub fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        error!(error = %err, "request failed");
    } else {
        warn!(error = %err, "request rejected");
    }

    // Internal details stay in the log
    let message = if status.is_server_error() {
        "An error occurred".to_string()
    } else {
        err.to_string()
    };

    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": message,
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::NotFound("x".into()), StatusCode::NOT_FOUND)]
    #[case(AppError::Validation("x".into()), StatusCode::BAD_REQUEST)]
    #[case(AppError::Conflict("x".into()), StatusCode::CONFLICT)]
    #[case(AppError::Database("x".into()), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(AppError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR)]
    fn maps_status_codes(#[case] err: AppError, #[case] expected: StatusCode) {
        let response = error_response(&err);
        assert_eq!(response.status(), expected);
    }
}
