//! Currency catalog routes.

use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};

use kurs_core::validate::{normalize_code, validate_name, validate_sign};
use kurs_db::CurrencyRepository;
use kurs_db::entities::currencies;

use crate::{AppState, error::ApiError};

/// Creates the currency routes (the mutating route is registered separately,
/// behind the rate limiter).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/currencies", get(list_currencies))
        .route("/currency/{code}", get(get_currency))
}

/// Response for a currency.
#[derive(Debug, Serialize)]
pub struct CurrencyResponse {
    /// Catalog id.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Canonical 3-letter code.
    pub code: String,
    /// Display symbol.
    pub sign: String,
}

impl From<currencies::Model> for CurrencyResponse {
    fn from(model: currencies::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            code: model.code,
            sign: model.sign,
        }
    }
}

/// Form body for creating a currency.
#[derive(Debug, Deserialize)]
pub struct CreateCurrencyRequest {
    /// Display name, 3-50 letters and spaces.
    pub name: String,
    /// 3-letter code, normalized to uppercase.
    pub code: String,
    /// Display symbol, 1-10 characters.
    pub sign: String,
}

/// GET `/currencies` - List all currencies in insertion order.
async fn list_currencies(
    State(state): State<AppState>,
) -> Result<Json<Vec<CurrencyResponse>>, ApiError> {
    let repo = CurrencyRepository::new((*state.db).clone());
    let all = repo.list_all().await?;
    Ok(Json(all.into_iter().map(Into::into).collect()))
}

/// POST `/currencies` - Add a new currency.
pub(crate) async fn add_currency(
    State(state): State<AppState>,
    Form(form): Form<CreateCurrencyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = form.name.trim();
    let sign = form.sign.trim();
    validate_name(name)?;
    validate_sign(sign)?;
    let code = normalize_code(&form.code)?;

    let repo = CurrencyRepository::new((*state.db).clone());
    let created = repo.add(name, &code, sign).await?;
    Ok((StatusCode::CREATED, Json(CurrencyResponse::from(created))))
}

/// GET `/currency/{code}` - Fetch one currency by code.
async fn get_currency(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<CurrencyResponse>, ApiError> {
    let code = normalize_code(&code)?;
    let repo = CurrencyRepository::new((*state.db).clone());
    let currency = repo.get_by_code(&code).await?;
    Ok(Json(currency.into()))
}
