//! DTOs for plans and subscriptions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Plan, Subscription, SubscriptionStatus};

#[derive(Debug, Serialize)]
pub struct PlanItem {
    pub code: String,
    pub name: String,
    pub monthly_price_cents: i32,
    /// `null` means unlimited.
    pub max_ideas: Option<i32>,
}

impl From<Plan> for PlanItem {
    fn from(plan: Plan) -> Self {
        Self {
            code: plan.code,
            name: plan.name,
            monthly_price_cents: plan.monthly_price_cents,
            max_ideas: plan.max_ideas,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlanListResponse {
    pub items: Vec<PlanItem>,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionItem {
    pub plan_code: String,
    pub status: SubscriptionStatus,
    pub current_period_end: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl From<Subscription> for SubscriptionItem {
    fn from(sub: Subscription) -> Self {
        Self {
            plan_code: sub.plan_code,
            status: sub.status,
            current_period_end: sub.current_period_end,
            updated_at: sub.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePlanRequest {
    #[validate(length(min = 1, max = 50))]
    pub plan_code: String,
}
