//! PostgreSQL implementation of administrator queries.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use uuid::Uuid;

use super::rows::{ProfileRow, convert_all};
use crate::domain::entities::{Profile, SystemStats, UserRole};
use crate::domain::repositories::AdminRepository;
use crate::error::AppError;

const PROFILE_COLUMNS: &str = "id, email, display_name, role, created_at";

pub struct PgAdminRepository {
    pool: Arc<PgPool>,
}

impl PgAdminRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct SystemStatsRow {
    users: i64,
    ideas: i64,
    documents: i64,
    teams: i64,
    active_subscriptions: i64,
}

#[async_trait]
impl AdminRepository for PgAdminRepository {
    async fn system_stats(&self) -> Result<SystemStats, AppError> {
        let row: SystemStatsRow = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM profiles) AS users,
                (SELECT COUNT(*) FROM ideas) AS ideas,
                (SELECT COUNT(*) FROM documents) AS documents,
                (SELECT COUNT(*) FROM teams) AS teams,
                (SELECT COUNT(*) FROM subscriptions
                 WHERE status IN ('active', 'trialing')) AS active_subscriptions
            "#,
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(SystemStats {
            users: row.users,
            ideas: row.ideas,
            documents: row.documents,
            teams: row.teams,
            active_subscriptions: row.active_subscriptions,
        })
    }

    async fn list_profiles(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Profile>, i64), AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
            .fetch_one(self.pool.as_ref())
            .await?;

        let rows: Vec<ProfileRow> = sqlx::query_as(&format!(
            r#"
            SELECT {PROFILE_COLUMNS}
            FROM profiles
            ORDER BY created_at, id
            OFFSET $1 LIMIT $2
            "#
        ))
        .bind(offset)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok((convert_all(rows)?, total))
    }

    async fn find_profile(&self, id: Uuid) -> Result<Option<Profile>, AppError> {
        let row: Option<ProfileRow> =
            sqlx::query_as(&format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        row.map(Profile::try_from).transpose()
    }

    async fn set_role(&self, id: Uuid, role: UserRole) -> Result<Option<Profile>, AppError> {
        let row: Option<ProfileRow> = sqlx::query_as(&format!(
            "UPDATE profiles SET role = $2 WHERE id = $1 RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(id)
        .bind(role.as_str())
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Profile::try_from).transpose()
    }
}
