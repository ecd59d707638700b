//! Idea entity tracked in the idea vault.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::UnknownVariant;

/// Validation progress of an idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdeaStatus {
    Draft,
    Validating,
    Validated,
    Archived,
}

impl IdeaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Validating => "validating",
            Self::Validated => "validated",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for IdeaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdeaStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "validating" => Ok(Self::Validating),
            "validated" => Ok(Self::Validated),
            "archived" => Ok(Self::Archived),
            other => Err(UnknownVariant::new("idea status", other)),
        }
    }
}

/// A startup idea owned by a single user.
///
/// Ideas are private: only the owner can read or modify them.
#[derive(Debug, Clone, PartialEq)]
pub struct Idea {
    pub id: i64,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    /// Lowercase slug such as `fintech` or `dev tools`.
    pub category: String,
    pub status: IdeaStatus,
    /// Validation score in `0..=100`, if one was assigned.
    pub score: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating a new idea.
#[derive(Debug, Clone)]
pub struct NewIdea {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: IdeaStatus,
    pub score: Option<i32>,
}

/// Partial update of an idea. `None` leaves a field unchanged.
///
/// `score: Some(None)` clears the score.
#[derive(Debug, Clone, Default)]
pub struct IdeaPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: Option<IdeaStatus>,
    pub score: Option<Option<i32>>,
}

impl IdeaPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.status.is_none()
            && self.score.is_none()
    }
}
