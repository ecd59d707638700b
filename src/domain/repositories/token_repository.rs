//! Repository trait for API token authentication.

use crate::domain::entities::CurrentUser;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// API token metadata.
///
/// Only the HMAC-SHA256 hash of a token is stored; the raw value is shown once
/// when the token is created.
#[derive(Debug, Clone)]
pub struct ApiToken {
    pub id: i64,
    pub user_id: Uuid,
    pub name: String,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
}

/// Repository interface for API token management.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTokenRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Resolves a token hash to the user it belongs to.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(user))` if the token exists and is not revoked
    /// - `Ok(None)` if the token is unknown or revoked
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_active(&self, token_hash: &str) -> Result<Option<CurrentUser>, AppError>;

    /// Updates the `last_used_at` timestamp for a token.
    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError>;

    /// Creates a new API token for a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a token with the same hash already exists.
    /// Returns [`AppError::Validation`] if the user does not exist.
    async fn create_token(
        &self,
        user_id: Uuid,
        name: &str,
        token_hash: &str,
    ) -> Result<ApiToken, AppError>;

    /// Lists all tokens, newest first.
    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<ApiToken>, AppError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<ApiToken>, AppError>;

    /// Revokes a token. Returns `false` if it was missing or already revoked.
    async fn revoke_token(&self, id: i64) -> Result<bool, AppError>;
}
