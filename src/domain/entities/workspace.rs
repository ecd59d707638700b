//! Read models for the workspace dashboard and the admin panel.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Per-user counters shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub ideas: i64,
    pub validated_ideas: i64,
    pub documents: i64,
    pub teams: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Idea,
    Document,
    Message,
}

/// One entry of the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityItem {
    pub kind: ActivityKind,
    pub title: String,
    pub at: DateTime<Utc>,
}

/// System-wide counters for administrators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SystemStats {
    pub users: i64,
    pub ideas: i64,
    pub documents: i64,
    pub teams: i64,
    pub active_subscriptions: i64,
}
