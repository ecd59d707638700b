//! PostgreSQL implementation of the workspace read models.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use uuid::Uuid;

use super::rows::{ActivityRow, convert_all};
use crate::domain::entities::{ActivityItem, DashboardStats};
use crate::domain::repositories::WorkspaceRepository;
use crate::error::AppError;

pub struct PgWorkspaceRepository {
    pool: Arc<PgPool>,
}

impl PgWorkspaceRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct DashboardRow {
    ideas: i64,
    validated_ideas: i64,
    documents: i64,
    teams: i64,
}

#[async_trait]
impl WorkspaceRepository for PgWorkspaceRepository {
    async fn dashboard_stats(&self, user_id: Uuid) -> Result<DashboardStats, AppError> {
        let row: DashboardRow = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM ideas WHERE user_id = $1) AS ideas,
                (SELECT COUNT(*) FROM ideas WHERE user_id = $1 AND status = 'validated')
                    AS validated_ideas,
                (SELECT COUNT(*) FROM documents WHERE user_id = $1) AS documents,
                (SELECT COUNT(*) FROM team_members WHERE user_id = $1) AS teams
            "#,
        )
        .bind(user_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(DashboardStats {
            ideas: row.ideas,
            validated_ideas: row.validated_ideas,
            documents: row.documents,
            teams: row.teams,
        })
    }

    async fn recent_activity(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ActivityItem>, AppError> {
        let rows: Vec<ActivityRow> = sqlx::query_as(
            r#"
            SELECT kind, title, at
            FROM (
                SELECT 'idea'::text AS kind, title, updated_at AS at
                FROM ideas WHERE user_id = $1
                UNION ALL
                SELECT 'document'::text, title, updated_at
                FROM documents WHERE user_id = $1
                UNION ALL
                SELECT 'message'::text, LEFT(body, 80), created_at
                FROM team_messages WHERE author_id = $1
            ) activity
            ORDER BY at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        convert_all(rows)
    }
}
