//! Handlers for the admin panel. Routed behind the admin check.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;

use crate::api::dto::admin::{CacheClearResponse, SetRoleRequest, UserItem, UserListResponse};
use crate::api::dto::pagination::PaginationParams;
use crate::domain::entities::{CurrentUser, SystemStats};
use crate::error::AppError;
use crate::infrastructure::cache::CacheStats;
use crate::state::AppState;

/// `GET /api/admin/stats`
pub async fn system_stats_handler(
    State(state): State<AppState>,
) -> Result<Json<SystemStats>, AppError> {
    let stats = state.admin_service.system_stats().await?;
    Ok(Json(stats))
}

/// Lists users.
///
/// # Endpoint
///
/// `GET /api/admin/users?page=1&page_size=20`
///
/// # Errors
///
/// Returns 400 if `page` < 1 or `page_size` is outside 1-100.
pub async fn list_users_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<UserListResponse>, AppError> {
    let page = state
        .admin_service
        .list_users(params.page, params.page_size)
        .await?;

    Ok(Json(page.into()))
}

/// `PATCH /api/admin/users/{id}/role`
pub async fn set_role_handler(
    Path(user_id): Path<Uuid>,
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentUser>,
    Json(payload): Json<SetRoleRequest>,
) -> Result<Json<UserItem>, AppError> {
    let profile = state
        .admin_service
        .set_role(admin.id, user_id, payload.role)
        .await?;

    Ok(Json(profile.into()))
}

/// `GET /api/admin/cache` - hit, miss and entry counters.
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.admin_service.cache_stats())
}

/// `DELETE /api/admin/cache` - drops every cached entry.
pub async fn clear_cache_handler(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentUser>,
) -> Json<CacheClearResponse> {
    Json(CacheClearResponse {
        removed: state.admin_service.clear_cache(admin.id),
    })
}
