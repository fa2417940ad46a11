//! Conversion route.

use axum::{Json, extract::Query, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kurs_core::conversion::convert_amount;
use kurs_core::numeric::{parse_positive_decimal, round_display};
use kurs_core::validate::normalize_code;
use kurs_db::repositories::{CurrencyRepository, ExchangeRateRepository};
use kurs_db::resolver::RateResolver;

use crate::routes::currencies::CurrencyResponse;
use crate::{AppState, error::ApiError};

/// Query parameters for a conversion.
#[derive(Debug, Deserialize)]
pub struct ConvertQuery {
    /// Source currency code.
    pub from: String,
    /// Target currency code.
    pub to: String,
    /// Amount as a decimal string.
    pub amount: String,
}

/// Response for a conversion.
///
/// All numeric fields carry exactly 6 fractional digits.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedResponse {
    /// The from-currency.
    pub base_currency: CurrencyResponse,
    /// The to-currency.
    pub target_currency: CurrencyResponse,
    /// The effective rate.
    pub rate: Decimal,
    /// The input amount.
    pub amount: Decimal,
    /// `rate * amount`.
    pub converted_amount: Decimal,
}

/// GET `/exchange?from&to&amount` - Convert an amount between currencies.
///
/// The effective rate is resolved through the direct/inverse/cross chain;
/// `from == to` is allowed and resolves to 1.
pub(crate) async fn convert(
    State(state): State<AppState>,
    Query(query): Query<ConvertQuery>,
) -> Result<Json<ConvertedResponse>, ApiError> {
    let from = normalize_code(&query.from)?;
    let to = normalize_code(&query.to)?;
    let amount = parse_positive_decimal(&query.amount, &state.limits)?;

    let resolver = RateResolver::new(
        ExchangeRateRepository::new((*state.db).clone()),
        CurrencyRepository::new((*state.db).clone()),
        state.reference_currency.as_ref(),
    );
    let resolved = resolver.resolve(&from, &to).await?;

    // Multiply at canonical precision; round only the presented fields.
    let conversion = convert_amount(resolved.rate, amount)?;

    Ok(Json(ConvertedResponse {
        base_currency: resolved.base.into(),
        target_currency: resolved.target.into(),
        rate: round_display(conversion.rate),
        amount: round_display(conversion.amount),
        converted_amount: round_display(conversion.converted_amount),
    }))
}
