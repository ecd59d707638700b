//! Handlers for the workspace dashboard.

use axum::{
    Extension, Json,
    extract::{Query, State},
};

use crate::api::dto::workspace::{ActivityQuery, ActivityResponse};
use crate::domain::entities::{CurrentUser, DashboardStats};
use crate::error::AppError;
use crate::state::AppState;

/// Dashboard counters for the caller.
///
/// # Endpoint
///
/// `GET /api/workspace/stats`
///
/// # Response
///
/// ```json
/// { "ideas": 12, "validated_ideas": 3, "documents": 7, "teams": 2 }
/// ```
pub async fn dashboard_stats_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<DashboardStats>, AppError> {
    let stats = state.workspace_service.dashboard_stats(user.id).await?;
    Ok(Json(stats))
}

/// Newest ideas, documents and team messages touching the caller.
///
/// # Endpoint
///
/// `GET /api/workspace/activity?limit=10`
///
/// # Errors
///
/// Returns 400 if `limit` is outside 1-50.
pub async fn recent_activity_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<ActivityResponse>, AppError> {
    let items = state
        .workspace_service
        .recent_activity(user.id, query.limit)
        .await?;

    Ok(Json(ActivityResponse { items }))
}
