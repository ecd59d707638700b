//! DTOs for teams, members and team chat.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::{Team, TeamMember, TeamMessage, TeamRole};

#[derive(Debug, Serialize)]
pub struct TeamItem {
    pub id: i64,
    pub name: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<Team> for TeamItem {
    fn from(team: Team) -> Self {
        Self {
            id: team.id,
            name: team.name,
            owner_id: team.owner_id,
            created_at: team.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TeamListResponse {
    pub items: Vec<TeamItem>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct MemberItem {
    pub user_id: Uuid,
    pub role: TeamRole,
    pub joined_at: DateTime<Utc>,
}

impl From<TeamMember> for MemberItem {
    fn from(member: TeamMember) -> Self {
        Self {
            user_id: member.user_id,
            role: member.role,
            joined_at: member.joined_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MemberListResponse {
    pub items: Vec<MemberItem>,
}

/// Request body for `POST /api/teams/{id}/members`. Role defaults to `member`.
#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    pub user_id: Uuid,
    pub role: Option<TeamRole>,
}

#[derive(Debug, Serialize)]
pub struct MessageItem {
    pub id: i64,
    pub author_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<TeamMessage> for MessageItem {
    fn from(message: TeamMessage) -> Self {
        Self {
            id: message.id,
            author_id: message.author_id,
            body: message.body,
            created_at: message.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageListResponse {
    pub items: Vec<MessageItem>,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PostMessageRequest {
    #[validate(length(min = 1, max = 4000))]
    pub body: String,
}
