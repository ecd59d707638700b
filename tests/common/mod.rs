#![allow(dead_code)]

//! In-memory repositories and an app builder for handler tests.

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use chrono::{Duration as ChronoDuration, Utc};
use prompthero_ready::domain::entities::{
    ActivityItem, ActivityKind, CurrentUser, DashboardStats, Document, DocumentKind,
    DocumentPatch, Idea, IdeaPatch, IdeaStatus, NewDocument, NewIdea, Plan, Profile,
    Subscription, SubscriptionStatus, SystemStats, Team, TeamMember, TeamMessage, TeamRole,
    UserRole,
};
use prompthero_ready::domain::repositories::{
    AdminRepository, ApiToken, DocumentRepository, IdeaRepository, SubscriptionRepository,
    TeamRepository, TokenRepository, WorkspaceRepository,
};
use prompthero_ready::error::AppError;
use prompthero_ready::infrastructure::ai::{GenerationParams, TextGenerator};
use prompthero_ready::infrastructure::cache::ReadThroughCache;
use prompthero_ready::infrastructure::health::{HealthProbe, HealthTracker};
use prompthero_ready::state::{AppState, Repositories};
use prompthero_ready::utils::token::hash_token;
use serde_json::json;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

pub const SIGNING_SECRET: &str = "test-signing-secret";
pub const USER_TOKEN: &str = "user-token-0123456789";
pub const OTHER_TOKEN: &str = "other-token-0123456789";
pub const ADMIN_TOKEN: &str = "admin-token-0123456789";

#[derive(Default)]
struct Tables {
    profiles: Vec<Profile>,
    tokens: Vec<ApiToken>,
    ideas: Vec<Idea>,
    teams: Vec<Team>,
    members: Vec<TeamMember>,
    messages: Vec<TeamMessage>,
    documents: Vec<Document>,
    plans: Vec<Plan>,
    subscriptions: Vec<Subscription>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Every repository over one set of in-memory tables.
///
/// Read counters let tests observe whether a request reached the store or
/// was answered from the cache.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    pub idea_list_reads: AtomicUsize,
    pub dashboard_reads: AtomicUsize,
    pub system_stats_reads: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        let store = Self::default();
        {
            let mut tables = store.tables.lock().unwrap();
            tables.plans = vec![
                plan("free", "Free", 0, Some(5)),
                plan("pro", "Pro", 1900, Some(100)),
                plan("team", "Team", 4900, None),
            ];
        }
        store
    }

    pub fn add_profile(&self, email: &str, role: UserRole) -> Uuid {
        let id = Uuid::new_v4();
        let mut tables = self.tables.lock().unwrap();
        // Spread creation times so ordering is deterministic.
        let offset = tables.profiles.len() as i64;
        tables.profiles.push(Profile {
            id,
            email: email.to_string(),
            display_name: None,
            role,
            created_at: Utc::now() - ChronoDuration::minutes(60 - offset),
        });
        id
    }

    pub fn add_token(&self, user_id: Uuid, raw: &str) {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        tables.tokens.push(ApiToken {
            id,
            user_id,
            name: format!("token-{id}"),
            token_hash: hash_token(SIGNING_SECRET, raw),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        });
    }

    pub fn revoke_all_tokens(&self) {
        let mut tables = self.tables.lock().unwrap();
        for token in tables.tokens.iter_mut() {
            token.revoked_at = Some(Utc::now());
        }
    }

    pub fn token_last_used(&self, raw: &str) -> Option<chrono::DateTime<Utc>> {
        let hash = hash_token(SIGNING_SECRET, raw);
        let tables = self.tables.lock().unwrap();
        tables
            .tokens
            .iter()
            .find(|t| t.token_hash == hash)
            .and_then(|t| t.last_used_at)
    }

    /// Inserts an idea behind the services' back, as another process would.
    pub fn insert_idea_directly(&self, user_id: Uuid, title: &str, category: &str) -> i64 {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        let now = Utc::now();
        tables.ideas.push(Idea {
            id,
            user_id,
            title: title.to_string(),
            description: String::new(),
            category: category.to_string(),
            status: IdeaStatus::Draft,
            score: None,
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub fn reads(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

fn plan(code: &str, name: &str, price: i32, max_ideas: Option<i32>) -> Plan {
    Plan {
        code: code.to_string(),
        name: name.to_string(),
        monthly_price_cents: price,
        max_ideas,
    }
}

#[async_trait]
impl IdeaRepository for InMemoryStore {
    async fn list_by_user(
        &self,
        user_id: Uuid,
        category: Option<String>,
    ) -> Result<Vec<Idea>, AppError> {
        self.idea_list_reads.fetch_add(1, Ordering::SeqCst);
        let tables = self.tables.lock().unwrap();
        let mut ideas: Vec<Idea> = tables
            .ideas
            .iter()
            .filter(|i| i.user_id == user_id)
            .filter(|i| category.as_deref().is_none_or(|c| i.category == c))
            .cloned()
            .collect();
        ideas.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(ideas)
    }

    async fn find_by_id(&self, user_id: Uuid, id: i64) -> Result<Option<Idea>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .ideas
            .iter()
            .find(|i| i.id == id && i.user_id == user_id)
            .cloned())
    }

    async fn categories(&self, user_id: Uuid) -> Result<Vec<String>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut categories: Vec<String> = tables
            .ideas
            .iter()
            .filter(|i| i.user_id == user_id)
            .map(|i| i.category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    async fn create(&self, idea: NewIdea) -> Result<Idea, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        let now = Utc::now();
        let idea = Idea {
            id,
            user_id: idea.user_id,
            title: idea.title,
            description: idea.description,
            category: idea.category,
            status: idea.status,
            score: idea.score,
            created_at: now,
            updated_at: now,
        };
        tables.ideas.push(idea.clone());
        Ok(idea)
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: i64,
        patch: IdeaPatch,
    ) -> Result<Option<Idea>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(idea) = tables
            .ideas
            .iter_mut()
            .find(|i| i.id == id && i.user_id == user_id)
        else {
            return Ok(None);
        };

        if let Some(title) = patch.title {
            idea.title = title;
        }
        if let Some(description) = patch.description {
            idea.description = description;
        }
        if let Some(category) = patch.category {
            idea.category = category;
        }
        if let Some(status) = patch.status {
            idea.status = status;
        }
        if let Some(score) = patch.score {
            idea.score = score;
        }
        idea.updated_at = Utc::now();

        Ok(Some(idea.clone()))
    }

    async fn delete(&self, user_id: Uuid, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.ideas.len();
        tables
            .ideas
            .retain(|i| !(i.id == id && i.user_id == user_id));
        let removed = tables.ideas.len() != before;
        if removed {
            for document in tables.documents.iter_mut() {
                if document.idea_id == Some(id) {
                    document.idea_id = None;
                }
            }
        }
        Ok(removed)
    }
}

#[async_trait]
impl WorkspaceRepository for InMemoryStore {
    async fn dashboard_stats(&self, user_id: Uuid) -> Result<DashboardStats, AppError> {
        self.dashboard_reads.fetch_add(1, Ordering::SeqCst);
        let tables = self.tables.lock().unwrap();
        let own_ideas = tables.ideas.iter().filter(|i| i.user_id == user_id);

        Ok(DashboardStats {
            ideas: own_ideas.clone().count() as i64,
            validated_ideas: own_ideas
                .filter(|i| i.status == IdeaStatus::Validated)
                .count() as i64,
            documents: tables
                .documents
                .iter()
                .filter(|d| d.user_id == user_id)
                .count() as i64,
            teams: tables
                .members
                .iter()
                .filter(|m| m.user_id == user_id)
                .count() as i64,
        })
    }

    async fn recent_activity(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ActivityItem>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut items: Vec<ActivityItem> = tables
            .ideas
            .iter()
            .filter(|i| i.user_id == user_id)
            .map(|i| ActivityItem {
                kind: ActivityKind::Idea,
                title: i.title.clone(),
                at: i.updated_at,
            })
            .chain(
                tables
                    .documents
                    .iter()
                    .filter(|d| d.user_id == user_id)
                    .map(|d| ActivityItem {
                        kind: ActivityKind::Document,
                        title: d.title.clone(),
                        at: d.updated_at,
                    }),
            )
            .chain(
                tables
                    .messages
                    .iter()
                    .filter(|m| m.author_id == user_id)
                    .map(|m| ActivityItem {
                        kind: ActivityKind::Message,
                        title: m.body.chars().take(80).collect(),
                        at: m.created_at,
                    }),
            )
            .collect();
        items.sort_by(|a, b| b.at.cmp(&a.at));
        items.truncate(limit.max(0) as usize);
        Ok(items)
    }
}

#[async_trait]
impl TeamRepository for InMemoryStore {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Team>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .teams
            .iter()
            .filter(|t| {
                tables
                    .members
                    .iter()
                    .any(|m| m.team_id == t.id && m.user_id == user_id)
            })
            .cloned()
            .collect())
    }

    async fn create(&self, name: &str, owner_id: Uuid) -> Result<Team, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        let now = Utc::now();
        let team = Team {
            id,
            name: name.to_string(),
            owner_id,
            created_at: now,
        };
        tables.teams.push(team.clone());
        tables.members.push(TeamMember {
            team_id: id,
            user_id: owner_id,
            role: TeamRole::Owner,
            joined_at: now,
        });
        Ok(team)
    }

    async fn find_by_id(&self, team_id: i64) -> Result<Option<Team>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.teams.iter().find(|t| t.id == team_id).cloned())
    }

    async fn membership(
        &self,
        team_id: i64,
        user_id: Uuid,
    ) -> Result<Option<TeamMember>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .members
            .iter()
            .find(|m| m.team_id == team_id && m.user_id == user_id)
            .cloned())
    }

    async fn list_members(&self, team_id: i64) -> Result<Vec<TeamMember>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .members
            .iter()
            .filter(|m| m.team_id == team_id)
            .cloned()
            .collect())
    }

    async fn add_member(
        &self,
        team_id: i64,
        user_id: Uuid,
        role: TeamRole,
    ) -> Result<TeamMember, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .members
            .iter()
            .any(|m| m.team_id == team_id && m.user_id == user_id)
        {
            return Err(AppError::conflict(
                "Resource already exists",
                json!({ "constraint": "team_members_pkey" }),
            ));
        }
        let member = TeamMember {
            team_id,
            user_id,
            role,
            joined_at: Utc::now(),
        };
        tables.members.push(member.clone());
        Ok(member)
    }

    async fn remove_member(&self, team_id: i64, user_id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.members.len();
        tables
            .members
            .retain(|m| !(m.team_id == team_id && m.user_id == user_id));
        Ok(tables.members.len() != before)
    }

    async fn list_messages(
        &self,
        team_id: i64,
        limit: i64,
    ) -> Result<Vec<TeamMessage>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut messages: Vec<TeamMessage> = tables
            .messages
            .iter()
            .filter(|m| m.team_id == team_id)
            .cloned()
            .collect();
        let skip = messages.len().saturating_sub(limit.max(0) as usize);
        Ok(messages.split_off(skip))
    }

    async fn post_message(
        &self,
        team_id: i64,
        author_id: Uuid,
        body: &str,
    ) -> Result<TeamMessage, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        let message = TeamMessage {
            id,
            team_id,
            author_id,
            body: body.to_string(),
            created_at: Utc::now(),
        };
        tables.messages.push(message.clone());
        Ok(message)
    }
}

#[async_trait]
impl DocumentRepository for InMemoryStore {
    async fn list_by_user(
        &self,
        user_id: Uuid,
        kind: Option<DocumentKind>,
    ) -> Result<Vec<Document>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut documents: Vec<Document> = tables
            .documents
            .iter()
            .filter(|d| d.user_id == user_id && kind.is_none_or(|k| d.kind == k))
            .cloned()
            .collect();
        documents.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(documents)
    }

    async fn find_by_id(&self, user_id: Uuid, id: i64) -> Result<Option<Document>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .documents
            .iter()
            .find(|d| d.id == id && d.user_id == user_id)
            .cloned())
    }

    async fn create(&self, document: NewDocument) -> Result<Document, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        let now = Utc::now();
        let document = Document {
            id,
            user_id: document.user_id,
            idea_id: document.idea_id,
            title: document.title,
            kind: document.kind,
            content: document.content,
            created_at: now,
            updated_at: now,
        };
        tables.documents.push(document.clone());
        Ok(document)
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: i64,
        patch: DocumentPatch,
    ) -> Result<Option<Document>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(document) = tables
            .documents
            .iter_mut()
            .find(|d| d.id == id && d.user_id == user_id)
        else {
            return Ok(None);
        };

        if let Some(title) = patch.title {
            document.title = title;
        }
        if let Some(content) = patch.content {
            document.content = content;
        }
        if let Some(idea_id) = patch.idea_id {
            document.idea_id = idea_id;
        }
        document.updated_at = Utc::now();

        Ok(Some(document.clone()))
    }

    async fn delete(&self, user_id: Uuid, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.documents.len();
        tables
            .documents
            .retain(|d| !(d.id == id && d.user_id == user_id));
        Ok(tables.documents.len() != before)
    }
}

#[async_trait]
impl SubscriptionRepository for InMemoryStore {
    async fn list_plans(&self) -> Result<Vec<Plan>, AppError> {
        Ok(self.tables.lock().unwrap().plans.clone())
    }

    async fn find_plan(&self, code: &str) -> Result<Option<Plan>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.plans.iter().find(|p| p.code == code).cloned())
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Subscription>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .subscriptions
            .iter()
            .find(|s| s.user_id == user_id)
            .cloned())
    }

    async fn upsert(&self, user_id: Uuid, plan_code: &str) -> Result<Subscription, AppError> {
        let mut tables = self.tables.lock().unwrap();
        tables.subscriptions.retain(|s| s.user_id != user_id);
        let subscription = Subscription {
            user_id,
            plan_code: plan_code.to_string(),
            status: SubscriptionStatus::Active,
            current_period_end: Some(Utc::now() + ChronoDuration::days(30)),
            updated_at: Utc::now(),
        };
        tables.subscriptions.push(subscription.clone());
        Ok(subscription)
    }

    async fn cancel(&self, user_id: Uuid) -> Result<Option<Subscription>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(subscription) = tables
            .subscriptions
            .iter_mut()
            .find(|s| s.user_id == user_id)
        else {
            return Ok(None);
        };
        subscription.status = SubscriptionStatus::Canceled;
        subscription.updated_at = Utc::now();
        Ok(Some(subscription.clone()))
    }
}

#[async_trait]
impl AdminRepository for InMemoryStore {
    async fn system_stats(&self) -> Result<SystemStats, AppError> {
        self.system_stats_reads.fetch_add(1, Ordering::SeqCst);
        let tables = self.tables.lock().unwrap();
        Ok(SystemStats {
            users: tables.profiles.len() as i64,
            ideas: tables.ideas.len() as i64,
            documents: tables.documents.len() as i64,
            teams: tables.teams.len() as i64,
            active_subscriptions: tables
                .subscriptions
                .iter()
                .filter(|s| s.status == SubscriptionStatus::Active)
                .count() as i64,
        })
    }

    async fn list_profiles(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Profile>, i64), AppError> {
        let tables = self.tables.lock().unwrap();
        let mut profiles = tables.profiles.clone();
        profiles.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        let total = profiles.len() as i64;
        let page = profiles
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn find_profile(&self, id: Uuid) -> Result<Option<Profile>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn set_role(&self, id: Uuid, role: UserRole) -> Result<Option<Profile>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(profile) = tables.profiles.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        profile.role = role;
        Ok(Some(profile.clone()))
    }
}

#[async_trait]
impl TokenRepository for InMemoryStore {
    async fn find_active(&self, token_hash: &str) -> Result<Option<CurrentUser>, AppError> {
        let tables = self.tables.lock().unwrap();
        let Some(token) = tables
            .tokens
            .iter()
            .find(|t| t.token_hash == token_hash && t.revoked_at.is_none())
        else {
            return Ok(None);
        };
        Ok(tables
            .profiles
            .iter()
            .find(|p| p.id == token.user_id)
            .map(|p| CurrentUser {
                id: p.id,
                role: p.role,
            }))
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(token) = tables.tokens.iter_mut().find(|t| t.token_hash == token_hash) {
            token.last_used_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn create_token(
        &self,
        user_id: Uuid,
        name: &str,
        token_hash: &str,
    ) -> Result<ApiToken, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        let token = ApiToken {
            id,
            user_id,
            name: name.to_string(),
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        };
        tables.tokens.push(token.clone());
        Ok(token)
    }

    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError> {
        Ok(self.tables.lock().unwrap().tokens.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ApiToken>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.tokens.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<ApiToken>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.tokens.iter().find(|t| t.name == name).cloned())
    }

    async fn revoke_token(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().unwrap();
        match tables
            .tokens
            .iter_mut()
            .find(|t| t.id == id && t.revoked_at.is_none())
        {
            Some(token) => {
                token.revoked_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Probe whose answer the test controls.
pub struct SwitchProbe {
    pub reachable: AtomicBool,
    pub calls: AtomicUsize,
}

impl SwitchProbe {
    pub fn new(reachable: bool) -> Self {
        Self {
            reachable: AtomicBool::new(reachable),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl HealthProbe for SwitchProbe {
    async fn ping(&self) -> Result<(), AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.reachable.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::unavailable("Database unreachable", json!({})))
        }
    }
}

/// Generator that answers every prompt with a fixed reply.
pub struct CannedGenerator {
    pub reply: String,
}

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(
        &self,
        _prompt: &str,
        _params: &GenerationParams,
    ) -> Result<String, AppError> {
        Ok(self.reply.clone())
    }

    fn is_configured(&self) -> bool {
        true
    }

    fn provider_name(&self) -> &'static str {
        "canned"
    }
}

/// A wired application over [`InMemoryStore`].
pub struct TestApp {
    pub state: AppState,
    pub store: Arc<InMemoryStore>,
    pub probe: Arc<SwitchProbe>,
    pub user_id: Uuid,
    pub other_id: Uuid,
    pub admin_id: Uuid,
}

impl TestApp {
    /// Three users (`USER_TOKEN`, `OTHER_TOKEN`, `ADMIN_TOKEN`), a reachable
    /// database, and a canned AI reply.
    pub fn new() -> Self {
        Self::with_generator(Arc::new(CannedGenerator {
            reply: "1. Invoice chaser for freelancers\n2. Shift swap app for nurses\n3. Carbon receipts for SMBs".to_string(),
        }))
    }

    pub fn with_generator(generator: Arc<dyn TextGenerator>) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let user_id = store.add_profile("founder@example.com", UserRole::User);
        let other_id = store.add_profile("cofounder@example.com", UserRole::User);
        let admin_id = store.add_profile("ops@example.com", UserRole::Admin);
        store.add_token(user_id, USER_TOKEN);
        store.add_token(other_id, OTHER_TOKEN);
        store.add_token(admin_id, ADMIN_TOKEN);

        let repositories = Repositories {
            ideas: store.clone(),
            workspace: store.clone(),
            teams: store.clone(),
            documents: store.clone(),
            subscriptions: store.clone(),
            admin: store.clone(),
            tokens: store.clone(),
        };

        let probe = Arc::new(SwitchProbe::new(true));
        let health = Arc::new(HealthTracker::new(
            probe.clone(),
            Duration::from_secs(30),
            Duration::from_secs(5),
        ));

        let state = AppState::new(
            repositories,
            Arc::new(ReadThroughCache::in_memory(Duration::from_secs(300))),
            health,
            generator,
            SIGNING_SECRET.to_string(),
        );

        Self {
            state,
            store,
            probe,
            user_id,
            other_id,
            admin_id,
        }
    }

    /// `/api` routes with authentication, without rate limiting.
    ///
    /// The rate limiter keys on the peer address, which `TestServer` does not
    /// provide.
    pub fn api_server(&self) -> TestServer {
        use axum::middleware;
        use prompthero_ready::api::middleware::auth;
        use prompthero_ready::api::routes::{admin_routes, protected_routes};

        let api = protected_routes()
            .nest("/admin", admin_routes())
            .route_layer(middleware::from_fn_with_state(
                self.state.clone(),
                auth::layer,
            ));

        let app = Router::new()
            .nest("/api", api)
            .with_state(self.state.clone());

        TestServer::new(app).unwrap()
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
