//! Team space service: teams, memberships and team chat.

use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Team, TeamMember, TeamMessage, TeamRole};
use crate::domain::repositories::TeamRepository;
use crate::error::AppError;
use crate::infrastructure::cache::ReadThroughCache;
use crate::infrastructure::cache::namespace::{
    GET_MEMBERS, GET_MESSAGES, GET_SYSTEM_STATS, GET_TEAMS, MESSAGES_TTL, TEAM_SPACE, TEAMS_TTL,
    WORKSPACE,
};

const MAX_TEAM_NAME_LEN: usize = 100;
const MAX_MESSAGE_LEN: usize = 4000;
pub const DEFAULT_MESSAGE_LIMIT: i64 = 50;
pub const MAX_MESSAGE_LIMIT: i64 = 200;

/// Service for teams and their chat.
///
/// Access rules:
///
/// - Only members can list members, read messages or post
/// - Only owners and admins can add or remove members
/// - The owner cannot be removed; any member can leave
///
/// Membership is always checked against the database, never the cache.
pub struct TeamService {
    repository: Arc<dyn TeamRepository>,
    cache: Arc<ReadThroughCache>,
}

impl TeamService {
    pub fn new(repository: Arc<dyn TeamRepository>, cache: Arc<ReadThroughCache>) -> Self {
        Self { repository, cache }
    }

    pub async fn list_teams(&self, user_id: Uuid) -> Result<Vec<Team>, AppError> {
        self.cache
            .get_or_fetch(
                GET_TEAMS,
                &json!({ "user_id": user_id }),
                Some(TEAMS_TTL),
                || self.repository.list_for_user(user_id),
            )
            .await
    }

    /// Creates a team owned by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the name is blank or longer than 100 chars.
    pub async fn create_team(&self, owner_id: Uuid, name: &str) -> Result<Team, AppError> {
        let name = name.trim();
        if name.is_empty() || name.chars().count() > MAX_TEAM_NAME_LEN {
            return Err(AppError::bad_request(
                "Team name must be 1-100 characters",
                json!({ "field": "name" }),
            ));
        }

        let team = self.repository.create(name, owner_id).await?;

        self.cache
            .invalidate_all_of(&[TEAM_SPACE, WORKSPACE, GET_SYSTEM_STATS]);
        tracing::info!("Team {} created by {}", team.id, owner_id);

        Ok(team)
    }

    pub async fn list_members(
        &self,
        user_id: Uuid,
        team_id: i64,
    ) -> Result<Vec<TeamMember>, AppError> {
        self.require_member(team_id, user_id).await?;

        self.cache
            .get_or_fetch(
                GET_MEMBERS,
                &json!({ "team_id": team_id }),
                Some(TEAMS_TTL),
                || self.repository.list_members(team_id),
            )
            .await
    }

    /// Adds a user to a team.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] if the caller is not an owner or admin.
    /// Returns [`AppError::Validation`] if `role` is `owner`.
    /// Returns [`AppError::Conflict`] if the user is already a member.
    pub async fn add_member(
        &self,
        actor_id: Uuid,
        team_id: i64,
        user_id: Uuid,
        role: TeamRole,
    ) -> Result<TeamMember, AppError> {
        if role == TeamRole::Owner {
            return Err(AppError::bad_request(
                "A team has exactly one owner",
                json!({ "role": role.as_str() }),
            ));
        }

        let actor = self.require_member(team_id, actor_id).await?;
        if !actor.role.can_manage_members() {
            return Err(forbidden_to_manage(team_id));
        }

        let member = self.repository.add_member(team_id, user_id, role).await?;

        self.cache.invalidate_all_of(&[TEAM_SPACE, WORKSPACE]);

        Ok(member)
    }

    /// Removes a member from a team.
    ///
    /// Owners and admins may remove anyone except the owner. Any member may
    /// remove themselves.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] if the target is the owner or the caller
    /// may not manage members.
    /// Returns [`AppError::NotFound`] if the target is not a member.
    pub async fn remove_member(
        &self,
        actor_id: Uuid,
        team_id: i64,
        user_id: Uuid,
    ) -> Result<(), AppError> {
        let team = self.find_team(team_id).await?;
        if team.owner_id == user_id {
            return Err(AppError::forbidden(
                "The team owner cannot be removed",
                json!({ "team_id": team_id }),
            ));
        }

        let actor = self.require_member(team_id, actor_id).await?;
        if actor_id != user_id && !actor.role.can_manage_members() {
            return Err(forbidden_to_manage(team_id));
        }

        if !self.repository.remove_member(team_id, user_id).await? {
            return Err(AppError::not_found(
                "Member not found",
                json!({ "team_id": team_id, "user_id": user_id }),
            ));
        }

        self.cache.invalidate_all_of(&[TEAM_SPACE, WORKSPACE]);

        Ok(())
    }

    /// Recent messages, oldest first. `limit` defaults to 50 and may be at most 200.
    pub async fn list_messages(
        &self,
        user_id: Uuid,
        team_id: i64,
        limit: Option<i64>,
    ) -> Result<Vec<TeamMessage>, AppError> {
        let limit = limit.unwrap_or(DEFAULT_MESSAGE_LIMIT);
        if !(1..=MAX_MESSAGE_LIMIT).contains(&limit) {
            return Err(AppError::bad_request(
                "Invalid limit",
                json!({ "limit": limit, "min": 1, "max": MAX_MESSAGE_LIMIT }),
            ));
        }

        self.require_member(team_id, user_id).await?;

        self.cache
            .get_or_fetch(
                GET_MESSAGES,
                &json!({ "team_id": team_id, "limit": limit }),
                Some(MESSAGES_TTL),
                || self.repository.list_messages(team_id, limit),
            )
            .await
    }

    /// Posts a message to a team's chat.
    ///
    /// Invalidates message lists and the workspace activity feed, which
    /// includes the author's messages.
    pub async fn post_message(
        &self,
        author_id: Uuid,
        team_id: i64,
        body: &str,
    ) -> Result<TeamMessage, AppError> {
        let body = body.trim();
        if body.is_empty() || body.chars().count() > MAX_MESSAGE_LEN {
            return Err(AppError::bad_request(
                "Message must be 1-4000 characters",
                json!({ "field": "body" }),
            ));
        }

        self.require_member(team_id, author_id).await?;

        let message = self
            .repository
            .post_message(team_id, author_id, body)
            .await?;

        self.cache.invalidate_all_of(&[GET_MESSAGES, WORKSPACE]);

        Ok(message)
    }

    async fn find_team(&self, team_id: i64) -> Result<Team, AppError> {
        self.repository
            .find_by_id(team_id)
            .await?
            .ok_or_else(|| AppError::not_found("Team not found", json!({ "team_id": team_id })))
    }

    /// Returns the caller's membership.
    ///
    /// A missing team is reported as not found; an existing team the caller
    /// does not belong to is forbidden.
    async fn require_member(&self, team_id: i64, user_id: Uuid) -> Result<TeamMember, AppError> {
        if let Some(member) = self.repository.membership(team_id, user_id).await? {
            return Ok(member);
        }

        self.find_team(team_id).await?;

        Err(AppError::forbidden(
            "Not a member of this team",
            json!({ "team_id": team_id }),
        ))
    }
}

fn forbidden_to_manage(team_id: i64) -> AppError {
    AppError::forbidden(
        "Only team owners and admins can manage members",
        json!({ "team_id": team_id }),
    )
}
