//! Error-to-response mapping.
//!
//! Handlers return `Result<_, ApiError>`; domain errors convert through
//! `kurs_shared::AppError`, whose classification decides the status code.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use kurs_core::numeric::NumericError;
use kurs_core::validate::CodeFormatError;
use kurs_db::repositories::{CurrencyError, RateError};
use kurs_shared::AppError;

/// Boundary error wrapper around the app-wide classification.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<CurrencyError> for ApiError {
    fn from(err: CurrencyError) -> Self {
        Self(err.into())
    }
}

impl From<RateError> for ApiError {
    fn from(err: RateError) -> Self {
        Self(err.into())
    }
}

impl From<NumericError> for ApiError {
    fn from(err: NumericError) -> Self {
        Self(err.into())
    }
}

impl From<CodeFormatError> for ApiError {
    fn from(err: CodeFormatError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }
        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.to_string(),
            })),
        )
            .into_response()
    }
}
