//! Admin panel service.

use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Profile, SystemStats, UserRole};
use crate::domain::repositories::AdminRepository;
use crate::error::AppError;
use crate::infrastructure::cache::namespace::{
    ADMIN, GET_SYSTEM_STATS, GET_USERS, SYSTEM_STATS_TTL, USERS_TTL,
};
use crate::infrastructure::cache::{CacheStats, ReadThroughCache};

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// One page of the user list.
#[derive(Debug, Clone)]
pub struct UsersPage {
    pub items: Vec<Profile>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

/// Service behind `/api/admin`.
///
/// Callers are expected to have passed the admin check already.
pub struct AdminService {
    repository: Arc<dyn AdminRepository>,
    cache: Arc<ReadThroughCache>,
}

impl AdminService {
    pub fn new(repository: Arc<dyn AdminRepository>, cache: Arc<ReadThroughCache>) -> Self {
        Self { repository, cache }
    }

    pub async fn system_stats(&self) -> Result<SystemStats, AppError> {
        self.cache
            .get_or_fetch(GET_SYSTEM_STATS, &json!({}), Some(SYSTEM_STATS_TTL), || {
                self.repository.system_stats()
            })
            .await
    }

    /// Lists users, oldest account first.
    ///
    /// # Arguments
    ///
    /// - `page` - 1-based page number, default 1
    /// - `page_size` - default 20, at most 100
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if either value is out of range.
    pub async fn list_users(
        &self,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<UsersPage, AppError> {
        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        if page < 1 || !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(AppError::bad_request(
                "Invalid pagination",
                json!({
                    "page": page,
                    "page_size": page_size,
                    "max_page_size": MAX_PAGE_SIZE
                }),
            ));
        }

        let offset = (page - 1).saturating_mul(page_size);
        let (items, total) = self
            .cache
            .get_or_fetch(
                GET_USERS,
                &json!({ "page": page, "page_size": page_size }),
                Some(USERS_TTL),
                || self.repository.list_profiles(offset, page_size),
            )
            .await?;

        Ok(UsersPage {
            items,
            total,
            page,
            page_size,
        })
    }

    /// Changes a user's role.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] if an admin targets their own account.
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn set_role(
        &self,
        actor_id: Uuid,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<Profile, AppError> {
        if actor_id == user_id {
            return Err(AppError::forbidden(
                "Admins cannot change their own role",
                json!({ "user_id": user_id }),
            ));
        }

        let profile = self
            .repository
            .set_role(user_id, role)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "user_id": user_id })))?;

        self.cache.invalidate(ADMIN);
        tracing::info!("User {} is now {} (changed by {})", user_id, role, actor_id);

        Ok(profile)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drops every cache entry. Returns how many were removed.
    pub fn clear_cache(&self, actor_id: Uuid) -> usize {
        let removed = self.cache.clear_all();
        tracing::warn!("Cache cleared by admin {} ({} entries)", actor_id, removed);
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockAdminRepository;
    use chrono::Utc;
    use std::time::Duration;

    fn test_cache() -> Arc<ReadThroughCache> {
        Arc::new(ReadThroughCache::in_memory(Duration::from_secs(300)))
    }

    fn profile(id: Uuid, role: UserRole) -> Profile {
        Profile {
            id,
            email: "founder@example.com".to_string(),
            display_name: None,
            role,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_list_users_translates_page_to_offset() {
        let mut mock_repo = MockAdminRepository::new();
        mock_repo
            .expect_list_profiles()
            .withf(|offset, limit| *offset == 40 && *limit == 20)
            .times(1)
            .returning(|_, _| Ok((vec![], 41)));

        let service = AdminService::new(Arc::new(mock_repo), test_cache());

        let page = service.list_users(Some(3), None).await.unwrap();

        assert_eq!(page.total, 41);
        assert_eq!(page.page, 3);
        assert_eq!(page.page_size, DEFAULT_PAGE_SIZE);
    }

    #[tokio::test]
    async fn test_list_users_rejects_bad_paging() {
        let service = AdminService::new(Arc::new(MockAdminRepository::new()), test_cache());

        for (page, size) in [(Some(0), None), (None, Some(0)), (None, Some(101))] {
            let result = service.list_users(page, size).await;
            assert!(matches!(result, Err(AppError::Validation { .. })));
        }
    }

    #[tokio::test]
    async fn test_set_role_invalidates_admin_reads() {
        let admin = Uuid::new_v4();
        let target = Uuid::new_v4();
        let mut mock_repo = MockAdminRepository::new();

        mock_repo
            .expect_system_stats()
            .times(2)
            .returning(|| Ok(SystemStats::default()));
        mock_repo
            .expect_set_role()
            .times(1)
            .returning(|id, role| Ok(Some(profile(id, role))));

        let service = AdminService::new(Arc::new(mock_repo), test_cache());

        service.system_stats().await.unwrap();
        service.system_stats().await.unwrap();

        let updated = service
            .set_role(admin, target, UserRole::Admin)
            .await
            .unwrap();
        assert_eq!(updated.role, UserRole::Admin);

        service.system_stats().await.unwrap();
    }

    #[tokio::test]
    async fn test_admin_cannot_change_own_role() {
        let mut mock_repo = MockAdminRepository::new();
        mock_repo.expect_set_role().never();

        let service = AdminService::new(Arc::new(mock_repo), test_cache());
        let admin = Uuid::new_v4();

        let result = service.set_role(admin, admin, UserRole::User).await;

        assert!(matches!(result, Err(AppError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_set_role_for_unknown_user() {
        let mut mock_repo = MockAdminRepository::new();
        mock_repo.expect_set_role().returning(|_, _| Ok(None));

        let service = AdminService::new(Arc::new(mock_repo), test_cache());

        let result = service
            .set_role(Uuid::new_v4(), Uuid::new_v4(), UserRole::Admin)
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_clear_cache_reports_removed_entries() {
        let mut mock_repo = MockAdminRepository::new();
        mock_repo
            .expect_system_stats()
            .times(1)
            .returning(|| Ok(SystemStats::default()));

        let service = AdminService::new(Arc::new(mock_repo), test_cache());

        service.system_stats().await.unwrap();
        assert_eq!(service.cache_stats().entries, 1);

        assert_eq!(service.clear_cache(Uuid::new_v4()), 1);
        assert_eq!(service.clear_cache(Uuid::new_v4()), 0);
        assert_eq!(service.cache_stats().entries, 0);
    }
}
