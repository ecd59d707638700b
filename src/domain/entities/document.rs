//! Documents created in the workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::UnknownVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    PitchDeck,
    BusinessPlan,
    MvpPrompt,
    Note,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PitchDeck => "pitch_deck",
            Self::BusinessPlan => "business_plan",
            Self::MvpPrompt => "mvp_prompt",
            Self::Note => "note",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pitch_deck" => Ok(Self::PitchDeck),
            "business_plan" => Ok(Self::BusinessPlan),
            "mvp_prompt" => Ok(Self::MvpPrompt),
            "note" => Ok(Self::Note),
            other => Err(UnknownVariant::new("document kind", other)),
        }
    }
}

/// A document owned by a single user, optionally linked to one of their ideas.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: i64,
    pub user_id: Uuid,
    pub idea_id: Option<i64>,
    pub title: String,
    pub kind: DocumentKind,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewDocument {
    pub user_id: Uuid,
    pub idea_id: Option<i64>,
    pub title: String,
    pub kind: DocumentKind,
    pub content: String,
}

/// Partial update of a document. `idea_id: Some(None)` unlinks the idea.
#[derive(Debug, Clone, Default)]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub idea_id: Option<Option<i64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_match_storage() {
        assert_eq!(DocumentKind::MvpPrompt.as_str(), "mvp_prompt");
        assert_eq!(
            "business_plan".parse::<DocumentKind>().unwrap(),
            DocumentKind::BusinessPlan
        );
        assert_eq!(
            serde_json::to_value(DocumentKind::PitchDeck).unwrap(),
            serde_json::json!("pitch_deck")
        );
    }
}
