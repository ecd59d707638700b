//! Repository trait for administrator queries.

use crate::domain::entities::{Profile, SystemStats, UserRole};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn system_stats(&self) -> Result<SystemStats, AppError>;

    /// One page of profiles ordered by creation time, plus the total count.
    async fn list_profiles(&self, offset: i64, limit: i64)
    -> Result<(Vec<Profile>, i64), AppError>;

    async fn find_profile(&self, id: Uuid) -> Result<Option<Profile>, AppError>;

    /// Changes a user's role. Returns `None` if the user does not exist.
    async fn set_role(&self, id: Uuid, role: UserRole) -> Result<Option<Profile>, AppError>;
}
