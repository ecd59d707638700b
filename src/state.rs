//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{
    AdminService, AuthService, DocumentService, IdeaService, PromptService, SubscriptionService,
    TeamService, WorkspaceService,
};
use crate::domain::repositories::{
    AdminRepository, DocumentRepository, IdeaRepository, SubscriptionRepository, TeamRepository,
    TokenRepository, WorkspaceRepository,
};
use crate::infrastructure::ai::TextGenerator;
use crate::infrastructure::cache::ReadThroughCache;
use crate::infrastructure::health::HealthTracker;
use crate::infrastructure::persistence::{
    PgAdminRepository, PgDocumentRepository, PgIdeaRepository, PgSubscriptionRepository,
    PgTeamRepository, PgTokenRepository, PgWorkspaceRepository,
};

/// The full set of repositories the services are built from.
#[derive(Clone)]
pub struct Repositories {
    pub ideas: Arc<dyn IdeaRepository>,
    pub workspace: Arc<dyn WorkspaceRepository>,
    pub teams: Arc<dyn TeamRepository>,
    pub documents: Arc<dyn DocumentRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub admin: Arc<dyn AdminRepository>,
    pub tokens: Arc<dyn TokenRepository>,
}

impl Repositories {
    /// PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        Self {
            ideas: Arc::new(PgIdeaRepository::new(pool.clone())),
            workspace: Arc::new(PgWorkspaceRepository::new(pool.clone())),
            teams: Arc::new(PgTeamRepository::new(pool.clone())),
            documents: Arc::new(PgDocumentRepository::new(pool.clone())),
            subscriptions: Arc::new(PgSubscriptionRepository::new(pool.clone())),
            admin: Arc::new(PgAdminRepository::new(pool.clone())),
            tokens: Arc::new(PgTokenRepository::new(pool)),
        }
    }
}

/// Services plus the shared cache and health tracker.
///
/// Cloned per request by axum; every field is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub idea_service: Arc<IdeaService>,
    pub workspace_service: Arc<WorkspaceService>,
    pub team_service: Arc<TeamService>,
    pub document_service: Arc<DocumentService>,
    pub subscription_service: Arc<SubscriptionService>,
    pub prompt_service: Arc<PromptService>,
    pub admin_service: Arc<AdminService>,
    pub auth_service: Arc<AuthService>,
    pub cache: Arc<ReadThroughCache>,
    pub health: Arc<HealthTracker>,
    pub generator: Arc<dyn TextGenerator>,
}

impl AppState {
    /// Wires every service to the given repositories and the one shared cache.
    pub fn new(
        repositories: Repositories,
        cache: Arc<ReadThroughCache>,
        health: Arc<HealthTracker>,
        generator: Arc<dyn TextGenerator>,
        token_signing_secret: String,
    ) -> Self {
        let Repositories {
            ideas,
            workspace,
            teams,
            documents,
            subscriptions,
            admin,
            tokens,
        } = repositories;

        Self {
            idea_service: Arc::new(IdeaService::new(ideas.clone(), cache.clone())),
            workspace_service: Arc::new(WorkspaceService::new(workspace, cache.clone())),
            team_service: Arc::new(TeamService::new(teams, cache.clone())),
            document_service: Arc::new(DocumentService::new(
                documents.clone(),
                ideas.clone(),
                cache.clone(),
            )),
            subscription_service: Arc::new(SubscriptionService::new(subscriptions, cache.clone())),
            prompt_service: Arc::new(PromptService::new(
                generator.clone(),
                ideas,
                documents,
                cache.clone(),
            )),
            admin_service: Arc::new(AdminService::new(admin, cache.clone())),
            auth_service: Arc::new(AuthService::new(tokens, token_signing_secret)),
            cache,
            health,
            generator,
        }
    }
}
