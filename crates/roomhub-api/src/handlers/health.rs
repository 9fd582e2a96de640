//! Health check handler.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use roomhub_core::traits::CacheProvider;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

fn describe(result: Result<bool, roomhub_core::AppError>, backend: &str) -> (bool, String) {
    match result {
        Ok(true) => (true, "connected".to_string()),
        Ok(false) => (false, "unavailable".to_string()),
        Err(e) => {
            warn!(backend, error = %e, "Health check failed");
            (false, "unavailable".to_string())
        }
    }
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let (db_ok, database) = describe(state.database.health_check().await, "database");
    let (cache_ok, cache) = describe(state.cache.health_check().await, "cache");

    Json(HealthResponse {
        status: if db_ok && cache_ok { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
        cache,
    })
}
