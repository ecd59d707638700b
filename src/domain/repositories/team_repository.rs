//! Repository trait for teams, memberships and team chat.

use crate::domain::entities::{Team, TeamMember, TeamMessage, TeamRole};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for teams.
///
/// Access rules (who may read or post) are enforced by
/// [`crate::application::services::TeamService`], not here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Teams the user belongs to, in any role.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Team>, AppError>;

    /// Creates a team and registers `owner_id` as its owner in one transaction.
    async fn create(&self, name: &str, owner_id: Uuid) -> Result<Team, AppError>;

    async fn find_by_id(&self, team_id: i64) -> Result<Option<Team>, AppError>;

    /// The user's membership in a team, if any.
    async fn membership(
        &self,
        team_id: i64,
        user_id: Uuid,
    ) -> Result<Option<TeamMember>, AppError>;

    async fn list_members(&self, team_id: i64) -> Result<Vec<TeamMember>, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the user already belongs to the team.
    /// Returns [`AppError::Validation`] if the user does not exist.
    async fn add_member(
        &self,
        team_id: i64,
        user_id: Uuid,
        role: TeamRole,
    ) -> Result<TeamMember, AppError>;

    /// Returns `false` if the user was not a member.
    async fn remove_member(&self, team_id: i64, user_id: Uuid) -> Result<bool, AppError>;

    /// Newest `limit` messages, returned oldest first.
    async fn list_messages(&self, team_id: i64, limit: i64)
    -> Result<Vec<TeamMessage>, AppError>;

    async fn post_message(
        &self,
        team_id: i64,
        author_id: Uuid,
        body: &str,
    ) -> Result<TeamMessage, AppError>;
}
