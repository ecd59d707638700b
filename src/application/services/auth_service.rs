//! Authentication service for API token validation.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::CurrentUser;
use crate::domain::repositories::TokenRepository;
use crate::error::AppError;
use crate::utils::token::hash_token;

/// Resolves Bearer tokens to the user they were issued for.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before the
/// lookup. A database dump alone is not enough to verify or forge tokens.
pub struct AuthService {
    repository: Arc<dyn TokenRepository>,
    signing_secret: String,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - token repository for DB operations
    /// - `signing_secret` - HMAC key; must match the one used by the admin CLI
    pub fn new(repository: Arc<dyn TokenRepository>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Authenticates a raw token and returns its owner.
    ///
    /// Updating `last_used_at` is best-effort: a failure there is logged and
    /// does not reject the request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or revoked.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<CurrentUser, AppError> {
        let token_hash = hash_token(&self.signing_secret, token);

        let user = self
            .repository
            .find_active(&token_hash)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "Invalid or revoked token" }),
                )
            })?;

        if let Err(e) = self.repository.update_last_used(&token_hash).await {
            tracing::warn!("Failed to update token last_used_at: {}", e);
        }

        Ok(user)
    }
}
