//! Repository trait for plans and subscriptions.

use crate::domain::entities::{Plan, Subscription};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// All plans ordered by price.
    async fn list_plans(&self) -> Result<Vec<Plan>, AppError>;

    async fn find_plan(&self, code: &str) -> Result<Option<Plan>, AppError>;

    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Subscription>, AppError>;

    /// Creates or replaces the user's subscription with an active one on
    /// `plan_code`.
    async fn upsert(&self, user_id: Uuid, plan_code: &str) -> Result<Subscription, AppError>;

    /// Marks the user's subscription canceled. Returns `None` if the user has
    /// no subscription.
    async fn cancel(&self, user_id: Uuid) -> Result<Option<Subscription>, AppError>;
}
