//! API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`]. Admin endpoints additionally require the
//! `admin` role.

use crate::api::handlers::{
    add_member_handler, brainstorm_handler, cache_stats_handler, cancel_subscription_handler,
    change_plan_handler, clear_cache_handler, create_document_handler, create_idea_handler,
    create_team_handler, current_subscription_handler, dashboard_stats_handler,
    delete_document_handler, delete_idea_handler, get_document_handler, get_idea_handler,
    idea_categories_handler, list_documents_handler, list_ideas_handler, list_members_handler,
    list_messages_handler, list_plans_handler, list_teams_handler, list_users_handler,
    mvp_prompt_handler, post_message_handler, recent_activity_handler, remove_member_handler,
    set_role_handler, system_stats_handler, update_document_handler, update_idea_handler,
};
use crate::api::middleware::auth;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

/// Routes available to every authenticated user.
///
/// # Endpoints
///
/// - `GET/POST /ideas`, `GET /ideas/categories`, `GET/PATCH/DELETE /ideas/{id}`
/// - `POST /ideas/{id}/mvp-prompt`, `POST /ideaforge/brainstorm`
/// - `GET /workspace/stats`, `GET /workspace/activity`
/// - `GET/POST /teams`, `GET/POST /teams/{id}/members`,
///   `DELETE /teams/{id}/members/{user_id}`, `GET/POST /teams/{id}/messages`
/// - `GET/POST /documents`, `GET/PATCH/DELETE /documents/{id}`
/// - `GET /plans`, `GET/PUT/DELETE /subscription`
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/ideas", get(list_ideas_handler).post(create_idea_handler))
        .route("/ideas/categories", get(idea_categories_handler))
        .route(
            "/ideas/{id}",
            get(get_idea_handler)
                .patch(update_idea_handler)
                .delete(delete_idea_handler),
        )
        .route("/ideas/{id}/mvp-prompt", post(mvp_prompt_handler))
        .route("/ideaforge/brainstorm", post(brainstorm_handler))
        .route("/workspace/stats", get(dashboard_stats_handler))
        .route("/workspace/activity", get(recent_activity_handler))
        .route("/teams", get(list_teams_handler).post(create_team_handler))
        .route(
            "/teams/{id}/members",
            get(list_members_handler).post(add_member_handler),
        )
        .route(
            "/teams/{id}/members/{user_id}",
            delete(remove_member_handler),
        )
        .route(
            "/teams/{id}/messages",
            get(list_messages_handler).post(post_message_handler),
        )
        .route(
            "/documents",
            get(list_documents_handler).post(create_document_handler),
        )
        .route(
            "/documents/{id}",
            get(get_document_handler)
                .patch(update_document_handler)
                .delete(delete_document_handler),
        )
        .route("/plans", get(list_plans_handler))
        .route(
            "/subscription",
            get(current_subscription_handler)
                .put(change_plan_handler)
                .delete(cancel_subscription_handler),
        )
}

/// Admin panel routes, mounted under `/admin`.
///
/// Expects [`auth::layer`] to run first; [`auth::require_admin`] then rejects
/// non-admins with 403.
///
/// # Endpoints
///
/// - `GET    /stats`            - System counters
/// - `GET    /users`            - Paginated user list
/// - `PATCH  /users/{id}/role`  - Change a user's role
/// - `GET    /cache`            - Cache statistics
/// - `DELETE /cache`            - Clear the cache
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(system_stats_handler))
        .route("/users", get(list_users_handler))
        .route("/users/{id}/role", patch(set_role_handler))
        .route(
            "/cache",
            get(cache_stats_handler).delete(clear_cache_handler),
        )
        .route_layer(middleware::from_fn(auth::require_admin))
}
