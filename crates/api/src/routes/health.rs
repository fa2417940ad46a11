//! Service health route.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

/// Liveness report for the conversion service.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service name.
    pub service: &'static str,
    /// Always "ok" when the process can answer at all.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
}

fn snapshot() -> HealthResponse {
    HealthResponse {
        service: "kurs",
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }
}

/// GET `/health` - Liveness probe. Does not touch the database, so it stays
/// green while Postgres is down.
async fn health() -> Json<HealthResponse> {
    Json(snapshot())
}

/// Creates the health route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_payload_names_the_service() {
        let json = serde_json::to_value(snapshot()).unwrap();
        assert_eq!(json["service"], "kurs");
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }
}
