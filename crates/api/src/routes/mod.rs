//! API route definitions.

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::AppState;
use crate::middleware::rate_limit::rate_limit_middleware;

pub mod currencies;
pub mod exchange;
pub mod exchange_rates;
pub mod health;

/// Creates the API router with all routes.
///
/// The mutating and conversion endpoints go through the rate limiter; reads
/// do not.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes(state: AppState) -> Router<AppState> {
    let throttled = Router::new()
        .route("/currencies", post(currencies::add_currency))
        .route("/exchangeRates", post(exchange_rates::add_exchange_rate))
        .route("/exchange", get(exchange::convert))
        .layer(middleware::from_fn_with_state(state, rate_limit_middleware));

    Router::new()
        .merge(health::routes())
        .merge(currencies::routes())
        .merge(exchange_rates::routes())
        .merge(throttled)
}
