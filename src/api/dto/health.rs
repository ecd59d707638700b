//! DTOs for health check endpoint.

use serde::Serialize;

use crate::infrastructure::cache::CacheStats;
use crate::infrastructure::health::ConnectionStatus;

/// Health check response with component status.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub checks: HealthChecks,
}

/// Health status for each system component.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: DatabaseCheck,
    pub cache: CacheStats,
    pub ai: AiCheck,
}

#[derive(Debug, Serialize)]
pub struct DatabaseCheck {
    pub status: ConnectionStatus,

    /// Seconds since the last check started; absent before the first one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_secs_ago: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct AiCheck {
    pub configured: bool,
    pub provider: &'static str,
}
