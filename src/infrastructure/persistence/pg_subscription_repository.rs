//! PostgreSQL implementation of the subscription repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use super::rows::{PlanRow, SubscriptionRow};
use crate::domain::entities::{Plan, Subscription};
use crate::domain::repositories::SubscriptionRepository;
use crate::error::AppError;

const SUBSCRIPTION_COLUMNS: &str = "user_id, plan_code, status, current_period_end, updated_at";

pub struct PgSubscriptionRepository {
    pool: Arc<PgPool>,
}

impl PgSubscriptionRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    async fn list_plans(&self) -> Result<Vec<Plan>, AppError> {
        let rows: Vec<PlanRow> = sqlx::query_as(
            r#"
            SELECT code, name, monthly_price_cents, max_ideas
            FROM plans
            ORDER BY monthly_price_cents, code
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Plan::from).collect())
    }

    async fn find_plan(&self, code: &str) -> Result<Option<Plan>, AppError> {
        let row: Option<PlanRow> = sqlx::query_as(
            "SELECT code, name, monthly_price_cents, max_ideas FROM plans WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Plan::from))
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Subscription>, AppError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(&format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Subscription::try_from).transpose()
    }

    async fn upsert(&self, user_id: Uuid, plan_code: &str) -> Result<Subscription, AppError> {
        let row: SubscriptionRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO subscriptions (user_id, plan_code, status, current_period_end, updated_at)
            VALUES ($1, $2, 'active', NOW() + INTERVAL '1 month', NOW())
            ON CONFLICT (user_id) DO UPDATE
            SET plan_code = EXCLUDED.plan_code,
                status = 'active',
                current_period_end = EXCLUDED.current_period_end,
                updated_at = NOW()
            RETURNING {SUBSCRIPTION_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(plan_code)
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn cancel(&self, user_id: Uuid) -> Result<Option<Subscription>, AppError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(&format!(
            r#"
            UPDATE subscriptions
            SET status = 'canceled', updated_at = NOW()
            WHERE user_id = $1
            RETURNING {SUBSCRIPTION_COLUMNS}
            "#
        ))
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Subscription::try_from).transpose()
    }
}
