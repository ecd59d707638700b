//! Repository trait definitions for the domain layer.
//!
//! Traits define the data-access contract; PostgreSQL implementations live in
//! `crate::infrastructure::persistence`. Mocks are generated with `mockall`
//! for unit tests.
//!
//! # Available Repositories
//!
//! - [`IdeaRepository`] - Idea vault CRUD, scoped to the owner
//! - [`WorkspaceRepository`] - Dashboard counters and activity feed
//! - [`TeamRepository`] - Teams, members and messages
//! - [`DocumentRepository`] - Document CRUD, scoped to the owner
//! - [`SubscriptionRepository`] - Plans and subscriptions
//! - [`AdminRepository`] - System statistics and user management
//! - [`TokenRepository`] - API token authentication

pub mod admin_repository;
pub mod document_repository;
pub mod idea_repository;
pub mod subscription_repository;
pub mod team_repository;
pub mod token_repository;
pub mod workspace_repository;

pub use admin_repository::AdminRepository;
pub use document_repository::DocumentRepository;
pub use idea_repository::IdeaRepository;
pub use subscription_repository::SubscriptionRepository;
pub use team_repository::TeamRepository;
pub use token_repository::{ApiToken, TokenRepository};
pub use workspace_repository::WorkspaceRepository;

#[cfg(test)]
pub use admin_repository::MockAdminRepository;
#[cfg(test)]
pub use document_repository::MockDocumentRepository;
#[cfg(test)]
pub use idea_repository::MockIdeaRepository;
#[cfg(test)]
pub use subscription_repository::MockSubscriptionRepository;
#[cfg(test)]
pub use team_repository::MockTeamRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use workspace_repository::MockWorkspaceRepository;
