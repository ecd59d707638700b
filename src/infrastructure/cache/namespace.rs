//! Operation names, namespaces and TTLs used by the application services.
//!
//! Operation names follow `<namespace>.<operation>`. Writes invalidate by
//! namespace, so every operation in a namespace is dropped together.

use std::time::Duration;

pub const IDEA_VAULT: &str = "ideaVault";
pub const WORKSPACE: &str = "workspace";
pub const TEAM_SPACE: &str = "teamSpace";
pub const DOCS: &str = "docs";
pub const SUBSCRIPTIONS: &str = "subscriptions";
pub const ADMIN: &str = "admin";

pub const GET_IDEAS: &str = "ideaVault.getIdeas";
pub const GET_IDEA_CATEGORIES: &str = "ideaVault.getIdeaCategories";
pub const GET_DASHBOARD_STATS: &str = "workspace.getDashboardStats";
pub const GET_RECENT_ACTIVITY: &str = "workspace.getRecentActivity";
pub const GET_TEAMS: &str = "teamSpace.getTeams";
pub const GET_MEMBERS: &str = "teamSpace.getMembers";
pub const GET_MESSAGES: &str = "teamSpace.getMessages";
pub const GET_DOCUMENTS: &str = "docs.getDocuments";
pub const GET_PLANS: &str = "subscriptions.getPlans";
pub const GET_CURRENT_SUBSCRIPTION: &str = "subscriptions.getCurrent";
pub const GET_SYSTEM_STATS: &str = "admin.getSystemStats";
pub const GET_USERS: &str = "admin.getUsers";

// Seconds for chatty data, minutes for near-static lookups.
pub const IDEAS_TTL: Duration = Duration::from_secs(30);
pub const IDEA_CATEGORIES_TTL: Duration = Duration::from_secs(10 * 60);
pub const DASHBOARD_STATS_TTL: Duration = Duration::from_secs(60);
pub const RECENT_ACTIVITY_TTL: Duration = Duration::from_secs(10);
pub const TEAMS_TTL: Duration = Duration::from_secs(60);
pub const MESSAGES_TTL: Duration = Duration::from_secs(5);
pub const DOCUMENTS_TTL: Duration = Duration::from_secs(60);
pub const PLANS_TTL: Duration = Duration::from_secs(30 * 60);
pub const CURRENT_SUBSCRIPTION_TTL: Duration = Duration::from_secs(5 * 60);
pub const SYSTEM_STATS_TTL: Duration = Duration::from_secs(60);
pub const USERS_TTL: Duration = Duration::from_secs(30);
