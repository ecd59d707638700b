//! PostgreSQL implementation of the idea repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use super::rows::{IdeaRow, convert_all};
use crate::domain::entities::{Idea, IdeaPatch, NewIdea};
use crate::domain::repositories::IdeaRepository;
use crate::error::AppError;

const IDEA_COLUMNS: &str =
    "id, user_id, title, description, category, status, score, created_at, updated_at";

/// PostgreSQL repository for ideas.
pub struct PgIdeaRepository {
    pool: Arc<PgPool>,
}

impl PgIdeaRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdeaRepository for PgIdeaRepository {
    async fn list_by_user(
        &self,
        user_id: Uuid,
        category: Option<String>,
    ) -> Result<Vec<Idea>, AppError> {
        let rows: Vec<IdeaRow> = sqlx::query_as(&format!(
            r#"
            SELECT {IDEA_COLUMNS}
            FROM ideas
            WHERE user_id = $1
              AND ($2::text IS NULL OR category = $2)
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(user_id)
        .bind(category)
        .fetch_all(self.pool.as_ref())
        .await?;

        convert_all(rows)
    }

    async fn find_by_id(&self, user_id: Uuid, id: i64) -> Result<Option<Idea>, AppError> {
        let row: Option<IdeaRow> = sqlx::query_as(&format!(
            "SELECT {IDEA_COLUMNS} FROM ideas WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Idea::try_from).transpose()
    }

    async fn categories(&self, user_id: Uuid) -> Result<Vec<String>, AppError> {
        let categories = sqlx::query_scalar(
            r#"
            SELECT DISTINCT category
            FROM ideas
            WHERE user_id = $1
            ORDER BY category
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(categories)
    }

    async fn create(&self, idea: NewIdea) -> Result<Idea, AppError> {
        let row: IdeaRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO ideas (user_id, title, description, category, status, score)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {IDEA_COLUMNS}
            "#
        ))
        .bind(idea.user_id)
        .bind(idea.title)
        .bind(idea.description)
        .bind(idea.category)
        .bind(idea.status.as_str())
        .bind(idea.score)
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: i64,
        patch: IdeaPatch,
    ) -> Result<Option<Idea>, AppError> {
        let row: Option<IdeaRow> = sqlx::query_as(&format!(
            r#"
            UPDATE ideas
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                category = COALESCE($5, category),
                status = COALESCE($6, status),
                score = CASE WHEN $7 THEN $8 ELSE score END,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {IDEA_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(user_id)
        .bind(patch.title)
        .bind(patch.description)
        .bind(patch.category)
        .bind(patch.status.map(|s| s.as_str()))
        .bind(patch.score.is_some())
        .bind(patch.score.flatten())
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Idea::try_from).transpose()
    }

    async fn delete(&self, user_id: Uuid, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM ideas WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
