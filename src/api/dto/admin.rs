//! DTOs for the admin endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::services::UsersPage;
use crate::domain::entities::{Profile, UserRole};

#[derive(Debug, Serialize)]
pub struct UserItem {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<Profile> for UserItem {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            display_name: profile.display_name,
            role: profile.role,
            created_at: profile.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub items: Vec<UserItem>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

impl From<UsersPage> for UserListResponse {
    fn from(page: UsersPage) -> Self {
        Self {
            items: page.items.into_iter().map(UserItem::from).collect(),
            total: page.total,
            page: page.page,
            page_size: page.page_size,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub role: UserRole,
}

#[derive(Debug, Serialize)]
pub struct CacheClearResponse {
    pub removed: usize,
}
