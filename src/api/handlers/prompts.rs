//! Handlers for AI generation.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::document::DocumentItem;
use crate::api::dto::prompt::{BrainstormRequest, BrainstormResponse, MvpPromptRequest};
use crate::application::services::MvpOptions;
use crate::domain::entities::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Suggests startup ideas for a topic.
///
/// # Endpoint
///
/// `POST /api/ideaforge/brainstorm`
///
/// # Request Body
///
/// ```json
/// { "topic": "tools for indie game studios", "count": 5 }
/// ```
///
/// # Errors
///
/// Returns 503 if AI is not configured or the provider fails.
pub async fn brainstorm_handler(
    State(state): State<AppState>,
    Json(payload): Json<BrainstormRequest>,
) -> Result<Json<BrainstormResponse>, AppError> {
    payload.validate()?;

    let ideas = state
        .prompt_service
        .brainstorm(&payload.topic, payload.count)
        .await?;

    Ok(Json(BrainstormResponse { ideas }))
}

/// Generates an MVP prompt for an idea and stores it as a document.
///
/// # Endpoint
///
/// `POST /api/ideas/{id}/mvp-prompt`
///
/// # Errors
///
/// Returns 404 if the idea is not the caller's.
/// Returns 503 if AI is not configured or the provider fails.
pub async fn mvp_prompt_handler(
    Path(idea_id): Path<i64>,
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    payload: Option<Json<MvpPromptRequest>>,
) -> Result<(StatusCode, Json<DocumentItem>), AppError> {
    let Json(payload) = payload.unwrap_or_default();
    payload.validate()?;

    let document = state
        .prompt_service
        .mvp_prompt(
            user.id,
            idea_id,
            MvpOptions {
                target_platform: payload.target_platform,
                notes: payload.notes,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(document.into())))
}
