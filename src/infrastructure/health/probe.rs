//! Reachability probes for the remote data gateway.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::error::AppError;

/// A cheap, idempotent request that tells whether the gateway answers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Issues the probe request.
    ///
    /// # Errors
    ///
    /// Any error means the gateway is considered unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Probes PostgreSQL with `SELECT 1`.
pub struct PgHealthProbe {
    pool: Arc<PgPool>,
}

impl PgHealthProbe {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthProbe for PgHealthProbe {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| {
                AppError::unavailable("Database unreachable", json!({ "reason": e.to_string() }))
            })?;

        Ok(())
    }
}
