//! Handlers for the idea vault.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::idea::{
    CategoriesResponse, CreateIdeaRequest, IdeaItem, IdeaListQuery, IdeaListResponse,
    UpdateIdeaRequest,
};
use crate::application::services::IdeaDraft;
use crate::domain::entities::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's ideas, optionally filtered by category.
///
/// # Endpoint
///
/// `GET /api/ideas?category=fintech`
pub async fn list_ideas_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<IdeaListQuery>,
) -> Result<Json<IdeaListResponse>, AppError> {
    let ideas = state.idea_service.list_ideas(user.id, query.category).await?;

    Ok(Json(IdeaListResponse {
        items: ideas.into_iter().map(IdeaItem::from).collect(),
    }))
}

/// `GET /api/ideas/categories`
pub async fn idea_categories_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<CategoriesResponse>, AppError> {
    let items = state.idea_service.categories(user.id).await?;
    Ok(Json(CategoriesResponse { items }))
}

/// `GET /api/ideas/{id}`
pub async fn get_idea_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<IdeaItem>, AppError> {
    let idea = state.idea_service.get_idea(user.id, id).await?;
    Ok(Json(idea.into()))
}

/// Creates an idea.
///
/// # Endpoint
///
/// `POST /api/ideas`
///
/// # Errors
///
/// Returns 400 if a field is out of range or the category is not a slug.
pub async fn create_idea_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateIdeaRequest>,
) -> Result<(StatusCode, Json<IdeaItem>), AppError> {
    payload.validate()?;

    let idea = state
        .idea_service
        .create_idea(
            user.id,
            IdeaDraft {
                title: payload.title,
                description: payload.description,
                category: payload.category,
                status: payload.status,
                score: payload.score,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(idea.into())))
}

/// Partially updates an idea.
///
/// # Endpoint
///
/// `PATCH /api/ideas/{id}`
///
/// All fields are optional. `score: null` clears the score.
///
/// # Errors
///
/// Returns 400 if the body is empty or a field is invalid.
/// Returns 404 if the idea does not exist for the caller.
pub async fn update_idea_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<UpdateIdeaRequest>,
) -> Result<Json<IdeaItem>, AppError> {
    payload.validate()?;

    let idea = state
        .idea_service
        .update_idea(user.id, id, payload.into())
        .await?;

    Ok(Json(idea.into()))
}

/// `DELETE /api/ideas/{id}`
pub async fn delete_idea_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<StatusCode, AppError> {
    state.idea_service.delete_idea(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
