//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx
//! runtime-checked queries mapped onto `FromRow` row types.
//!
//! # Repositories
//!
//! - [`PgIdeaRepository`] - Idea vault
//! - [`PgWorkspaceRepository`] - Dashboard counters and activity feed
//! - [`PgTeamRepository`] - Teams, members and messages
//! - [`PgDocumentRepository`] - Documents
//! - [`PgSubscriptionRepository`] - Plans and subscriptions
//! - [`PgAdminRepository`] - System statistics and profiles
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_admin_repository;
pub mod pg_document_repository;
pub mod pg_idea_repository;
pub mod pg_subscription_repository;
pub mod pg_team_repository;
pub mod pg_token_repository;
pub mod pg_workspace_repository;
mod rows;

pub use pg_admin_repository::PgAdminRepository;
pub use pg_document_repository::PgDocumentRepository;
pub use pg_idea_repository::PgIdeaRepository;
pub use pg_subscription_repository::PgSubscriptionRepository;
pub use pg_team_repository::PgTeamRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_workspace_repository::PgWorkspaceRepository;
