//! Core domain entities of the founder workspace.
//!
//! Entities are plain data. Each feature area has its own module:
//!
//! - [`idea`] - Ideas tracked in the idea vault
//! - [`team`] - Teams, memberships and team chat
//! - [`document`] - Pitch decks, plans, MVP prompts and notes
//! - [`subscription`] - Plans and per-user subscriptions
//! - [`profile`] - User profiles and the authenticated caller
//! - [`workspace`] - Dashboard counters, activity feed and admin statistics
//!
//! Creation and partial-update inputs use separate structs (`NewIdea`,
//! `IdeaPatch`, ...), the same way for every entity.

pub mod document;
pub mod idea;
pub mod profile;
pub mod subscription;
pub mod team;
pub mod workspace;

pub use document::{Document, DocumentKind, DocumentPatch, NewDocument};
pub use idea::{Idea, IdeaPatch, IdeaStatus, NewIdea};
pub use profile::{CurrentUser, Profile, UserRole};
pub use subscription::{Plan, Subscription, SubscriptionStatus};
pub use team::{Team, TeamMember, TeamMessage, TeamRole};
pub use workspace::{ActivityItem, ActivityKind, DashboardStats, SystemStats};

use thiserror::Error;

/// A stored or submitted value does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
