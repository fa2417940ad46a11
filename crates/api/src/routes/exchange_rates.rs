//! Exchange rate ledger routes.

use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kurs_core::numeric::{parse_positive_decimal, round_display};
use kurs_core::validate::{CodeFormatError, normalize_code, split_codepair};
use kurs_db::repositories::{CurrencyRepository, ExchangeRateRepository, RateRecord};

use crate::routes::currencies::CurrencyResponse;
use crate::{AppState, error::ApiError};

/// Creates the exchange rate routes (the mutating POST is registered
/// separately, behind the rate limiter).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/exchangeRates", get(list_exchange_rates))
        .route(
            "/exchangeRate/{codepair}",
            get(get_exchange_rate).patch(update_exchange_rate),
        )
}

/// Response for a stored exchange rate.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateResponse {
    /// Ledger id.
    pub id: i32,
    /// Base currency.
    pub base_currency: CurrencyResponse,
    /// Target currency.
    pub target_currency: CurrencyResponse,
    /// Stored rate, rendered with 6 fractional digits.
    pub rate: Decimal,
}

impl From<RateRecord> for ExchangeRateResponse {
    fn from(record: RateRecord) -> Self {
        Self {
            id: record.id,
            base_currency: record.base.into(),
            target_currency: record.target.into(),
            rate: round_display(record.rate),
        }
    }
}

/// Form body for creating an exchange rate.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExchangeRateRequest {
    /// Base currency code.
    pub base_currency_code: String,
    /// Target currency code.
    pub target_currency_code: String,
    /// Rate as a decimal string; ',' and '.' both work as the separator.
    pub rate: String,
}

/// Form body for updating an exchange rate.
#[derive(Debug, Deserialize)]
pub struct UpdateExchangeRateRequest {
    /// New rate as a decimal string.
    pub rate: String,
}

/// GET `/exchangeRates` - List all stored rates with their currencies.
async fn list_exchange_rates(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExchangeRateResponse>>, ApiError> {
    let repo = ExchangeRateRepository::new((*state.db).clone());
    let all = repo.list_all().await?;
    Ok(Json(all.into_iter().map(Into::into).collect()))
}

/// POST `/exchangeRates` - Add a new directed rate.
///
/// Both currencies must already exist in the catalog (404 otherwise);
/// the ordered pair must be new (409 otherwise).
pub(crate) async fn add_exchange_rate(
    State(state): State<AppState>,
    Form(form): Form<CreateExchangeRateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let base_code = normalize_code(&form.base_currency_code)?;
    let target_code = normalize_code(&form.target_currency_code)?;
    if base_code == target_code {
        return Err(CodeFormatError::SameCurrency.into());
    }
    let rate = parse_positive_decimal(&form.rate, &state.limits)?;

    let currencies = CurrencyRepository::new((*state.db).clone());
    let rates = ExchangeRateRepository::new((*state.db).clone());

    let base = currencies.get_by_code(&base_code).await?;
    let target = currencies.get_by_code(&target_code).await?;

    rates.add(&base, &target, rate).await?;
    let created = rates.get_by_pair(&base_code, &target_code).await?;
    Ok((
        StatusCode::CREATED,
        Json(ExchangeRateResponse::from(created)),
    ))
}

/// GET `/exchangeRate/{codepair}` - Fetch the exact directed pair.
async fn get_exchange_rate(
    State(state): State<AppState>,
    Path(codepair): Path<String>,
) -> Result<Json<ExchangeRateResponse>, ApiError> {
    let (base_code, target_code) = split_codepair(&codepair)?;
    let repo = ExchangeRateRepository::new((*state.db).clone());
    let record = repo.get_by_pair(&base_code, &target_code).await?;
    Ok(Json(record.into()))
}

/// PATCH `/exchangeRate/{codepair}` - Update the rate of the exact directed
/// pair in place.
async fn update_exchange_rate(
    State(state): State<AppState>,
    Path(codepair): Path<String>,
    Form(form): Form<UpdateExchangeRateRequest>,
) -> Result<Json<ExchangeRateResponse>, ApiError> {
    let (base_code, target_code) = split_codepair(&codepair)?;
    let rate = parse_positive_decimal(&form.rate, &state.limits)?;

    let repo = ExchangeRateRepository::new((*state.db).clone());
    let updated = repo.update(&base_code, &target_code, rate).await?;
    Ok(Json(updated.into()))
}
