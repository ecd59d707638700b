//! Business logic services for the application layer.

pub mod admin_service;
pub mod auth_service;
pub mod document_service;
pub mod idea_service;
pub mod prompt_service;
pub mod subscription_service;
pub mod team_service;
pub mod workspace_service;

pub use admin_service::{AdminService, UsersPage};
pub use auth_service::AuthService;
pub use document_service::DocumentService;
pub use idea_service::{IdeaDraft, IdeaService};
pub use prompt_service::{MvpOptions, PromptService};
pub use subscription_service::SubscriptionService;
pub use team_service::TeamService;
pub use workspace_service::WorkspaceService;
