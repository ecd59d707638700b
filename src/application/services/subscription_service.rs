//! Subscription plans and the caller's subscription.

use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Plan, Subscription};
use crate::domain::repositories::SubscriptionRepository;
use crate::error::AppError;
use crate::infrastructure::cache::ReadThroughCache;
use crate::infrastructure::cache::namespace::{
    ADMIN, CURRENT_SUBSCRIPTION_TTL, GET_CURRENT_SUBSCRIPTION, GET_PLANS, PLANS_TTL, SUBSCRIPTIONS,
};

/// Service for plans and subscriptions.
///
/// Plan changes also invalidate `admin`, since the active subscription count
/// shown to admins depends on them.
pub struct SubscriptionService {
    repository: Arc<dyn SubscriptionRepository>,
    cache: Arc<ReadThroughCache>,
}

impl SubscriptionService {
    pub fn new(repository: Arc<dyn SubscriptionRepository>, cache: Arc<ReadThroughCache>) -> Self {
        Self { repository, cache }
    }

    pub async fn list_plans(&self) -> Result<Vec<Plan>, AppError> {
        self.cache
            .get_or_fetch(GET_PLANS, &json!({}), Some(PLANS_TTL), || {
                self.repository.list_plans()
            })
            .await
    }

    /// The caller's subscription.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the caller has never subscribed.
    pub async fn current(&self, user_id: Uuid) -> Result<Subscription, AppError> {
        let subscription: Option<Subscription> = self
            .cache
            .get_or_fetch(
                GET_CURRENT_SUBSCRIPTION,
                &json!({ "user_id": user_id }),
                Some(CURRENT_SUBSCRIPTION_TTL),
                || self.repository.find_by_user(user_id),
            )
            .await?;

        subscription.ok_or_else(|| no_subscription(user_id))
    }

    /// Moves the caller to `plan_code`, creating the subscription if needed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if no plan has that code.
    pub async fn change_plan(
        &self,
        user_id: Uuid,
        plan_code: &str,
    ) -> Result<Subscription, AppError> {
        let plan_code = plan_code.trim();
        if self.repository.find_plan(plan_code).await?.is_none() {
            return Err(AppError::bad_request(
                "Unknown plan",
                json!({ "plan_code": plan_code }),
            ));
        }

        let subscription = self.repository.upsert(user_id, plan_code).await?;

        self.invalidate();
        tracing::info!("User {} moved to plan {}", user_id, plan_code);

        Ok(subscription)
    }

    /// Marks the caller's subscription as canceled.
    pub async fn cancel(&self, user_id: Uuid) -> Result<Subscription, AppError> {
        let subscription = self
            .repository
            .cancel(user_id)
            .await?
            .ok_or_else(|| no_subscription(user_id))?;

        self.invalidate();
        tracing::info!("User {} canceled their subscription", user_id);

        Ok(subscription)
    }

    fn invalidate(&self) {
        self.cache.invalidate_all_of(&[SUBSCRIPTIONS, ADMIN]);
    }
}

fn no_subscription(user_id: Uuid) -> AppError {
    AppError::not_found("No subscription", json!({ "user_id": user_id }))
}
