//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{AiCheck, DatabaseCheck, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: database connected
/// - **503 Service Unavailable**: database disconnected or not checked yet
///
/// The database status comes from the health tracker, which probes at most
/// once per interval; this endpoint never adds load beyond that. Cache and AI
/// details are informational and do not affect the status.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "connected", "checked_secs_ago": 4 },
///     "cache": { "backend": "memory", "entries": 12, "hits": 40, "misses": 12, ... },
///     "ai": { "configured": true, "provider": "openai" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let status = state.health.status().await;
    let checked_secs_ago = state
        .health
        .last_checked()
        .map(|at| at.elapsed().as_secs());

    let healthy = status.is_connected();

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks {
            database: DatabaseCheck {
                status,
                checked_secs_ago,
            },
            cache: state.cache.stats(),
            ai: AiCheck {
                configured: state.generator.is_configured(),
                provider: state.generator.provider_name(),
            },
        },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
