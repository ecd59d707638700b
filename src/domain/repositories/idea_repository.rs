//! Repository trait for the idea vault.

use crate::domain::entities::{Idea, IdeaPatch, NewIdea};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for ideas.
///
/// Every lookup is scoped to the owning user: an idea belonging to someone
/// else is reported exactly like a missing one.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgIdeaRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdeaRepository: Send + Sync {
    /// Lists the user's ideas, newest first, optionally filtered by category.
    async fn list_by_user(
        &self,
        user_id: Uuid,
        category: Option<String>,
    ) -> Result<Vec<Idea>, AppError>;

    /// Finds one of the user's ideas.
    async fn find_by_id(&self, user_id: Uuid, id: i64) -> Result<Option<Idea>, AppError>;

    /// Distinct categories used by the user's ideas, sorted.
    async fn categories(&self, user_id: Uuid) -> Result<Vec<String>, AppError>;

    async fn create(&self, idea: NewIdea) -> Result<Idea, AppError>;

    /// Applies a partial update. Returns `None` if the idea does not exist
    /// for this user.
    async fn update(
        &self,
        user_id: Uuid,
        id: i64,
        patch: IdeaPatch,
    ) -> Result<Option<Idea>, AppError>;

    /// Deletes one of the user's ideas. Returns `false` if nothing matched.
    async fn delete(&self, user_id: Uuid, id: i64) -> Result<bool, AppError>;
}
