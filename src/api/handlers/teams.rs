//! Handlers for teams, memberships and team chat.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::team::{
    AddMemberRequest, CreateTeamRequest, MemberItem, MemberListResponse, MessageItem,
    MessageListResponse, MessagesQuery, PostMessageRequest, TeamItem, TeamListResponse,
};
use crate::domain::entities::{CurrentUser, TeamRole};
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/teams` - teams the caller belongs to.
pub async fn list_teams_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<TeamListResponse>, AppError> {
    let teams = state.team_service.list_teams(user.id).await?;

    Ok(Json(TeamListResponse {
        items: teams.into_iter().map(TeamItem::from).collect(),
    }))
}

/// Creates a team with the caller as owner.
///
/// # Endpoint
///
/// `POST /api/teams`
pub async fn create_team_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<TeamItem>), AppError> {
    payload.validate()?;

    let team = state.team_service.create_team(user.id, &payload.name).await?;

    Ok((StatusCode::CREATED, Json(team.into())))
}

/// `GET /api/teams/{id}/members` - members only.
pub async fn list_members_handler(
    Path(team_id): Path<i64>,
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<MemberListResponse>, AppError> {
    let members = state.team_service.list_members(user.id, team_id).await?;

    Ok(Json(MemberListResponse {
        items: members.into_iter().map(MemberItem::from).collect(),
    }))
}

/// Adds a member.
///
/// # Endpoint
///
/// `POST /api/teams/{id}/members`
///
/// # Errors
///
/// Returns 403 if the caller is not an owner or admin of the team.
/// Returns 409 if the user is already a member.
pub async fn add_member_handler(
    Path(team_id): Path<i64>,
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<AddMemberRequest>,
) -> Result<(StatusCode, Json<MemberItem>), AppError> {
    let member = state
        .team_service
        .add_member(
            user.id,
            team_id,
            payload.user_id,
            payload.role.unwrap_or(TeamRole::Member),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(member.into())))
}

/// Removes a member, or leaves the team when `user_id` is the caller.
///
/// # Endpoint
///
/// `DELETE /api/teams/{id}/members/{user_id}`
///
/// # Errors
///
/// Returns 403 when removing the owner or when a plain member removes someone else.
pub async fn remove_member_handler(
    Path((team_id, member_id)): Path<(i64, Uuid)>,
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<StatusCode, AppError> {
    state
        .team_service
        .remove_member(user.id, team_id, member_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/teams/{id}/messages?limit=50` - oldest first.
pub async fn list_messages_handler(
    Path(team_id): Path<i64>,
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<MessagesQuery>,
) -> Result<Json<MessageListResponse>, AppError> {
    let messages = state
        .team_service
        .list_messages(user.id, team_id, query.limit)
        .await?;

    Ok(Json(MessageListResponse {
        items: messages.into_iter().map(MessageItem::from).collect(),
    }))
}

/// `POST /api/teams/{id}/messages`
pub async fn post_message_handler(
    Path(team_id): Path<i64>,
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<PostMessageRequest>,
) -> Result<(StatusCode, Json<MessageItem>), AppError> {
    payload.validate()?;

    let message = state
        .team_service
        .post_message(user.id, team_id, &payload.body)
        .await?;

    Ok((StatusCode::CREATED, Json(message.into())))
}
