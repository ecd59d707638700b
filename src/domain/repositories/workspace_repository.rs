//! Repository trait for workspace read models.

use crate::domain::entities::{ActivityItem, DashboardStats};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkspaceRepository: Send + Sync {
    /// Counts the user's ideas, validated ideas, documents and team memberships.
    async fn dashboard_stats(&self, user_id: Uuid) -> Result<DashboardStats, AppError>;

    /// Latest ideas, documents and team messages touched by the user, newest
    /// first, at most `limit` items.
    async fn recent_activity(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ActivityItem>, AppError>;
}
