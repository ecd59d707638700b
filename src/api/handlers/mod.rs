//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.
//! Handlers stay thin: extract, validate the DTO, call one service method,
//! convert the result.

pub mod admin;
pub mod documents;
pub mod health;
pub mod ideas;
pub mod prompts;
pub mod subscriptions;
pub mod teams;
pub mod workspace;

pub use admin::{
    cache_stats_handler, clear_cache_handler, list_users_handler, set_role_handler,
    system_stats_handler,
};
pub use documents::{
    create_document_handler, delete_document_handler, get_document_handler,
    list_documents_handler, update_document_handler,
};
pub use health::health_handler;
pub use ideas::{
    create_idea_handler, delete_idea_handler, get_idea_handler, idea_categories_handler,
    list_ideas_handler, update_idea_handler,
};
pub use prompts::{brainstorm_handler, mvp_prompt_handler};
pub use subscriptions::{
    cancel_subscription_handler, change_plan_handler, current_subscription_handler,
    list_plans_handler,
};
pub use teams::{
    add_member_handler, create_team_handler, list_members_handler, list_messages_handler,
    list_teams_handler, post_message_handler, remove_member_handler,
};
pub use workspace::{dashboard_stats_handler, recent_activity_handler};
