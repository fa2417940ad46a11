//! Fixed-window rate limiting.
//!
//! Applied to the mutating and conversion endpoints: at most `times` requests
//! per `window` per route path, enforced in-process.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::Json;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use dashmap::DashMap;
use serde_json::json;
use tracing::warn;

use crate::AppState;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Shared fixed-window counter keyed by route path.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    times: u32,
    window: Duration,
    windows: Arc<DashMap<String, Window>>,
}

impl RateLimiter {
    /// Creates a limiter allowing `times` requests per `window`.
    #[must_use]
    pub fn new(times: u32, window: Duration) -> Self {
        Self {
            times,
            window,
            windows: Arc::new(DashMap::new()),
        }
    }

    /// Records a hit for `key` and reports whether it is within the limit.
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut entry = self.windows.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.duration_since(entry.started) >= self.window {
            entry.started = now;
            entry.count = 0;
        }
        entry.count += 1;
        entry.count <= self.times
    }
}

/// Middleware rejecting requests over the configured limit with 429.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let key = request.uri().path().to_string();
    if !state.rate_limiter.check(&key) {
        warn!(path = %key, "Rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "error": "RATE_LIMITED",
                "message": "Too many requests, try again later",
            })),
        )
            .into_response();
    }
    next.run(request).await
}
