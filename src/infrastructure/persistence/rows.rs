//! Row types returned by SQL queries and their conversion into entities.
//!
//! Enum columns are stored as `TEXT` guarded by `CHECK` constraints and parsed
//! here. A value that fails to parse means the row was written outside the
//! application; it surfaces as an internal error.

use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::entities::{
    ActivityItem, ActivityKind, CurrentUser, Document, Idea, Plan, Profile, Subscription, Team,
    TeamMember, TeamMessage, UnknownVariant,
};
use crate::domain::repositories::ApiToken;
use crate::error::AppError;

fn corrupt(e: UnknownVariant) -> AppError {
    tracing::error!("Unexpected value in database row: {}", e);
    AppError::internal("Corrupt database row", json!({ "reason": e.to_string() }))
}

#[derive(Debug, FromRow)]
pub(super) struct IdeaRow {
    id: i64,
    user_id: Uuid,
    title: String,
    description: String,
    category: String,
    status: String,
    score: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<IdeaRow> for Idea {
    type Error = AppError;

    fn try_from(row: IdeaRow) -> Result<Self, Self::Error> {
        Ok(Idea {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            category: row.category,
            status: row.status.parse().map_err(corrupt)?,
            score: row.score,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct TeamRow {
    pub(super) id: i64,
    name: String,
    owner_id: Uuid,
    created_at: DateTime<Utc>,
}

impl From<TeamRow> for Team {
    fn from(row: TeamRow) -> Self {
        Team {
            id: row.id,
            name: row.name,
            owner_id: row.owner_id,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub(super) struct TeamMemberRow {
    team_id: i64,
    user_id: Uuid,
    role: String,
    joined_at: DateTime<Utc>,
}

impl TryFrom<TeamMemberRow> for TeamMember {
    type Error = AppError;

    fn try_from(row: TeamMemberRow) -> Result<Self, Self::Error> {
        Ok(TeamMember {
            team_id: row.team_id,
            user_id: row.user_id,
            role: row.role.parse().map_err(corrupt)?,
            joined_at: row.joined_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct TeamMessageRow {
    id: i64,
    team_id: i64,
    author_id: Uuid,
    body: String,
    created_at: DateTime<Utc>,
}

impl From<TeamMessageRow> for TeamMessage {
    fn from(row: TeamMessageRow) -> Self {
        TeamMessage {
            id: row.id,
            team_id: row.team_id,
            author_id: row.author_id,
            body: row.body,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub(super) struct DocumentRow {
    id: i64,
    user_id: Uuid,
    idea_id: Option<i64>,
    title: String,
    kind: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DocumentRow> for Document {
    type Error = AppError;

    fn try_from(row: DocumentRow) -> Result<Self, Self::Error> {
        Ok(Document {
            id: row.id,
            user_id: row.user_id,
            idea_id: row.idea_id,
            title: row.title,
            kind: row.kind.parse().map_err(corrupt)?,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct PlanRow {
    code: String,
    name: String,
    monthly_price_cents: i32,
    max_ideas: Option<i32>,
}

impl From<PlanRow> for Plan {
    fn from(row: PlanRow) -> Self {
        Plan {
            code: row.code,
            name: row.name,
            monthly_price_cents: row.monthly_price_cents,
            max_ideas: row.max_ideas,
        }
    }
}

#[derive(Debug, FromRow)]
pub(super) struct SubscriptionRow {
    user_id: Uuid,
    plan_code: String,
    status: String,
    current_period_end: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = AppError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        Ok(Subscription {
            user_id: row.user_id,
            plan_code: row.plan_code,
            status: row.status.parse().map_err(corrupt)?,
            current_period_end: row.current_period_end,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct ProfileRow {
    id: Uuid,
    email: String,
    display_name: Option<String>,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = AppError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        Ok(Profile {
            id: row.id,
            email: row.email,
            display_name: row.display_name,
            role: row.role.parse().map_err(corrupt)?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct CurrentUserRow {
    id: Uuid,
    role: String,
}

impl TryFrom<CurrentUserRow> for CurrentUser {
    type Error = AppError;

    fn try_from(row: CurrentUserRow) -> Result<Self, Self::Error> {
        Ok(CurrentUser {
            id: row.id,
            role: row.role.parse().map_err(corrupt)?,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct ApiTokenRow {
    id: i64,
    user_id: Uuid,
    name: String,
    token_hash: String,
    created_at: DateTime<Utc>,
    last_used_at: Option<DateTime<Utc>>,
    revoked_at: Option<DateTime<Utc>>,
}

impl From<ApiTokenRow> for ApiToken {
    fn from(row: ApiTokenRow) -> Self {
        ApiToken {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            token_hash: row.token_hash,
            created_at: row.created_at,
            last_used_at: row.last_used_at,
            revoked_at: row.revoked_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub(super) struct ActivityRow {
    kind: String,
    title: String,
    at: DateTime<Utc>,
}

impl TryFrom<ActivityRow> for ActivityItem {
    type Error = AppError;

    fn try_from(row: ActivityRow) -> Result<Self, Self::Error> {
        let kind = match row.kind.as_str() {
            "idea" => ActivityKind::Idea,
            "document" => ActivityKind::Document,
            "message" => ActivityKind::Message,
            other => return Err(corrupt(UnknownVariant::new("activity kind", other))),
        };

        Ok(ActivityItem {
            kind,
            title: row.title,
            at: row.at,
        })
    }
}

/// Converts every row, failing on the first one that does not convert.
pub(super) fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, AppError>
where
    T: TryFrom<R, Error = AppError>,
{
    rows.into_iter().map(T::try_from).collect()
}
