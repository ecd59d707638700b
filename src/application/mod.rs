//! Application layer services implementing business logic.
//!
//! Services validate input, enforce ownership and membership rules, and put
//! repeated reads behind the shared [`crate::infrastructure::cache::ReadThroughCache`].
//! Every write goes straight to the repository and then invalidates the
//! cache namespaces it affects.
//!
//! # Available Services
//!
//! - [`services::idea_service::IdeaService`] - Idea vault CRUD and categories
//! - [`services::workspace_service::WorkspaceService`] - Dashboard counters and activity feed
//! - [`services::team_service::TeamService`] - Teams, members and team chat
//! - [`services::document_service::DocumentService`] - Documents linked to ideas
//! - [`services::subscription_service::SubscriptionService`] - Plans and subscriptions
//! - [`services::prompt_service::PromptService`] - IdeaForge brainstorm and MVP prompts
//! - [`services::admin_service::AdminService`] - System statistics, users and cache control
//! - [`services::auth_service::AuthService`] - API token authentication

pub mod services;
