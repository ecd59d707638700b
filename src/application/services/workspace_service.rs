//! Workspace dashboard service.

use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{ActivityItem, DashboardStats};
use crate::domain::repositories::WorkspaceRepository;
use crate::error::AppError;
use crate::infrastructure::cache::ReadThroughCache;
use crate::infrastructure::cache::namespace::{
    DASHBOARD_STATS_TTL, GET_DASHBOARD_STATS, GET_RECENT_ACTIVITY, RECENT_ACTIVITY_TTL,
};

pub const DEFAULT_ACTIVITY_LIMIT: i64 = 10;
pub const MAX_ACTIVITY_LIMIT: i64 = 50;

/// Read-only service behind the dashboard.
///
/// Nothing here writes; the idea, document and team services invalidate the
/// `workspace` namespace when they change what these counters are built from.
pub struct WorkspaceService {
    repository: Arc<dyn WorkspaceRepository>,
    cache: Arc<ReadThroughCache>,
}

impl WorkspaceService {
    pub fn new(repository: Arc<dyn WorkspaceRepository>, cache: Arc<ReadThroughCache>) -> Self {
        Self { repository, cache }
    }

    pub async fn dashboard_stats(&self, user_id: Uuid) -> Result<DashboardStats, AppError> {
        self.cache
            .get_or_fetch(
                GET_DASHBOARD_STATS,
                &json!({ "user_id": user_id }),
                Some(DASHBOARD_STATS_TTL),
                || self.repository.dashboard_stats(user_id),
            )
            .await
    }

    /// Newest activity across ideas, documents and team messages.
    ///
    /// `limit` defaults to 10.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `limit` is outside `1..=50`.
    pub async fn recent_activity(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<ActivityItem>, AppError> {
        let limit = limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT);
        if !(1..=MAX_ACTIVITY_LIMIT).contains(&limit) {
            return Err(AppError::bad_request(
                "Invalid limit",
                json!({ "limit": limit, "min": 1, "max": MAX_ACTIVITY_LIMIT }),
            ));
        }

        self.cache
            .get_or_fetch(
                GET_RECENT_ACTIVITY,
                &json!({ "user_id": user_id, "limit": limit }),
                Some(RECENT_ACTIVITY_TTL),
                || self.repository.recent_activity(user_id, limit),
            )
            .await
    }
}
