//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for currencies, exchange rates, and conversion
//! - Error-to-status mapping
//! - Fixed-window rate limiting for mutating and conversion endpoints

pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use kurs_core::numeric::NumericLimits;
use kurs_shared::AppConfig;

use crate::middleware::rate_limit::RateLimiter;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Bounds for user-supplied rates and amounts.
    pub limits: NumericLimits,
    /// Reference currency code for cross-rate resolution.
    pub reference_currency: Arc<str>,
    /// Shared fixed-window rate limiter.
    pub rate_limiter: RateLimiter,
}

impl AppState {
    /// Builds the state from configuration and an established connection.
    #[must_use]
    pub fn new(db: DatabaseConnection, config: &AppConfig) -> Self {
        Self {
            db: Arc::new(db),
            limits: NumericLimits {
                scale: config.numeric.scale,
                integer_digits: config.numeric.integer_digits,
            },
            reference_currency: Arc::from(config.exchange.reference_currency.as_str()),
            rate_limiter: RateLimiter::new(
                config.rate_limit.times,
                std::time::Duration::from_secs(config.rate_limit.window_secs),
            ),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
