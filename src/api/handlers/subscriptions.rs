//! Handlers for plans and the caller's subscription.

use axum::{Extension, Json, extract::State};
use validator::Validate;

use crate::api::dto::subscription::{
    ChangePlanRequest, PlanItem, PlanListResponse, SubscriptionItem,
};
use crate::domain::entities::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/plans`
pub async fn list_plans_handler(
    State(state): State<AppState>,
) -> Result<Json<PlanListResponse>, AppError> {
    let plans = state.subscription_service.list_plans().await?;

    Ok(Json(PlanListResponse {
        items: plans.into_iter().map(PlanItem::from).collect(),
    }))
}

/// `GET /api/subscription` - 404 if the caller never subscribed.
pub async fn current_subscription_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<SubscriptionItem>, AppError> {
    let subscription = state.subscription_service.current(user.id).await?;
    Ok(Json(subscription.into()))
}

/// Moves the caller to another plan.
///
/// # Endpoint
///
/// `PUT /api/subscription`
///
/// # Errors
///
/// Returns 400 if the plan code is unknown.
pub async fn change_plan_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ChangePlanRequest>,
) -> Result<Json<SubscriptionItem>, AppError> {
    payload.validate()?;

    let subscription = state
        .subscription_service
        .change_plan(user.id, &payload.plan_code)
        .await?;

    Ok(Json(subscription.into()))
}

/// `DELETE /api/subscription` - marks the subscription canceled.
pub async fn cancel_subscription_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<SubscriptionItem>, AppError> {
    let subscription = state.subscription_service.cancel(user.id).await?;
    Ok(Json(subscription.into()))
}
