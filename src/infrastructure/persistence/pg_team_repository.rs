//! PostgreSQL implementation of the team repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use super::rows::{TeamMemberRow, TeamMessageRow, TeamRow, convert_all};
use crate::domain::entities::{Team, TeamMember, TeamMessage, TeamRole};
use crate::domain::repositories::TeamRepository;
use crate::error::AppError;

/// PostgreSQL repository for teams, memberships and messages.
pub struct PgTeamRepository {
    pool: Arc<PgPool>,
}

impl PgTeamRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PgTeamRepository {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Team>, AppError> {
        let rows: Vec<TeamRow> = sqlx::query_as(
            r#"
            SELECT t.id, t.name, t.owner_id, t.created_at
            FROM teams t
            JOIN team_members m ON m.team_id = t.id
            WHERE m.user_id = $1
            ORDER BY t.created_at DESC, t.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Team::from).collect())
    }

    async fn create(&self, name: &str, owner_id: Uuid) -> Result<Team, AppError> {
        let mut tx = self.pool.begin().await?;

        let row: TeamRow = sqlx::query_as(
            r#"
            INSERT INTO teams (name, owner_id)
            VALUES ($1, $2)
            RETURNING id, name, owner_id, created_at
            "#,
        )
        .bind(name)
        .bind(owner_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO team_members (team_id, user_id, role) VALUES ($1, $2, 'owner')")
            .bind(row.id)
            .bind(owner_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, team_id: i64) -> Result<Option<Team>, AppError> {
        let row: Option<TeamRow> =
            sqlx::query_as("SELECT id, name, owner_id, created_at FROM teams WHERE id = $1")
                .bind(team_id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(Team::from))
    }

    async fn membership(
        &self,
        team_id: i64,
        user_id: Uuid,
    ) -> Result<Option<TeamMember>, AppError> {
        let row: Option<TeamMemberRow> = sqlx::query_as(
            r#"
            SELECT team_id, user_id, role, joined_at
            FROM team_members
            WHERE team_id = $1 AND user_id = $2
            "#,
        )
        .bind(team_id)
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(TeamMember::try_from).transpose()
    }

    async fn list_members(&self, team_id: i64) -> Result<Vec<TeamMember>, AppError> {
        let rows: Vec<TeamMemberRow> = sqlx::query_as(
            r#"
            SELECT team_id, user_id, role, joined_at
            FROM team_members
            WHERE team_id = $1
            ORDER BY joined_at, user_id
            "#,
        )
        .bind(team_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        convert_all(rows)
    }

    async fn add_member(
        &self,
        team_id: i64,
        user_id: Uuid,
        role: TeamRole,
    ) -> Result<TeamMember, AppError> {
        let row: TeamMemberRow = sqlx::query_as(
            r#"
            INSERT INTO team_members (team_id, user_id, role)
            VALUES ($1, $2, $3)
            RETURNING team_id, user_id, role, joined_at
            "#,
        )
        .bind(team_id)
        .bind(user_id)
        .bind(role.as_str())
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn remove_member(&self, team_id: i64, user_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM team_members WHERE team_id = $1 AND user_id = $2")
            .bind(team_id)
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_messages(
        &self,
        team_id: i64,
        limit: i64,
    ) -> Result<Vec<TeamMessage>, AppError> {
        let rows: Vec<TeamMessageRow> = sqlx::query_as(
            r#"
            SELECT id, team_id, author_id, body, created_at
            FROM (
                SELECT id, team_id, author_id, body, created_at
                FROM team_messages
                WHERE team_id = $1
                ORDER BY created_at DESC, id DESC
                LIMIT $2
            ) latest
            ORDER BY created_at, id
            "#,
        )
        .bind(team_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(TeamMessage::from).collect())
    }

    async fn post_message(
        &self,
        team_id: i64,
        author_id: Uuid,
        body: &str,
    ) -> Result<TeamMessage, AppError> {
        let row: TeamMessageRow = sqlx::query_as(
            r#"
            INSERT INTO team_messages (team_id, author_id, body)
            VALUES ($1, $2, $3)
            RETURNING id, team_id, author_id, body, created_at
            "#,
        )
        .bind(team_id)
        .bind(author_id)
        .bind(body)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }
}
