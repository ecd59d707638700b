//! AI-assisted features: IdeaForge brainstorming and MVP prompt generation.

use regex::Regex;
use serde_json::json;
use std::fmt::Write as _;
use std::sync::{Arc, LazyLock};
use uuid::Uuid;

use crate::domain::entities::{Document, DocumentKind, NewDocument};
use crate::domain::repositories::{DocumentRepository, IdeaRepository};
use crate::error::AppError;
use crate::infrastructure::ai::{GenerationParams, TextGenerator};
use crate::infrastructure::cache::ReadThroughCache;
use crate::infrastructure::cache::namespace::{DOCS, GET_SYSTEM_STATS, WORKSPACE};

/// Bullets (`-`, `*`, `•`), numbering (`1. `, `2) `) and markdown headings.
///
/// Numbering needs trailing whitespace, so a leading `2030:` or `3.5x` stays.
static LIST_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*•]+\s*|\d+[.)]\s+|#+\s*)").expect("valid list prefix regex")
});

pub const DEFAULT_IDEA_COUNT: u8 = 5;
pub const MAX_IDEA_COUNT: u8 = 10;
const MAX_TOPIC_LEN: usize = 500;
const MAX_DOCUMENT_TITLE_LEN: usize = 200;

const BRAINSTORM_TEMPERATURE: f32 = 0.9;
const MVP_TEMPERATURE: f32 = 0.4;

/// Options for an MVP prompt beyond the idea itself.
#[derive(Debug, Clone, Default)]
pub struct MvpOptions {
    pub target_platform: Option<String>,
    pub notes: Option<String>,
}

/// Service for AI generation.
///
/// Generation results are never cached. The MVP prompt is stored as a document,
/// which invalidates `docs` and `workspace` like any other document write.
pub struct PromptService {
    generator: Arc<dyn TextGenerator>,
    ideas: Arc<dyn IdeaRepository>,
    documents: Arc<dyn DocumentRepository>,
    cache: Arc<ReadThroughCache>,
}

impl PromptService {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        ideas: Arc<dyn IdeaRepository>,
        documents: Arc<dyn DocumentRepository>,
        cache: Arc<ReadThroughCache>,
    ) -> Self {
        Self {
            generator,
            ideas,
            documents,
            cache,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_configured()
    }

    /// Suggests startup ideas around a topic.
    ///
    /// # Arguments
    ///
    /// - `topic` - free-form theme, 1-500 chars
    /// - `count` - number of ideas, 1-10, default 5
    ///
    /// # Returns
    ///
    /// At most `count` suggestions, one per non-empty line of the reply, with
    /// list markers stripped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on bad input.
    /// Returns [`AppError::Unavailable`] if the generator fails or the reply
    /// contains no usable line.
    pub async fn brainstorm(&self, topic: &str, count: Option<u8>) -> Result<Vec<String>, AppError> {
        let topic = topic.trim();
        if topic.is_empty() || topic.chars().count() > MAX_TOPIC_LEN {
            return Err(AppError::bad_request(
                "Topic must be 1-500 characters",
                json!({ "field": "topic" }),
            ));
        }

        let count = count.unwrap_or(DEFAULT_IDEA_COUNT);
        if !(1..=MAX_IDEA_COUNT).contains(&count) {
            return Err(AppError::bad_request(
                "Count must be between 1 and 10",
                json!({ "count": count }),
            ));
        }

        let prompt = brainstorm_prompt(topic, count);
        let params = GenerationParams {
            temperature: Some(BRAINSTORM_TEMPERATURE),
            ..Default::default()
        };

        let reply = self.generator.generate(&prompt, &params).await?;
        let ideas = parse_list(&reply, count as usize);

        if ideas.is_empty() {
            return Err(AppError::unavailable(
                "AI provider returned no ideas",
                json!({ "provider": self.generator.provider_name() }),
            ));
        }

        tracing::debug!("Brainstorm produced {} of {} ideas", ideas.len(), count);

        Ok(ideas)
    }

    /// Generates an MVP build prompt for one of the caller's ideas and saves
    /// it as an `mvp_prompt` document linked to the idea.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the idea is not the caller's.
    /// Returns [`AppError::Unavailable`] if the generator fails.
    pub async fn mvp_prompt(
        &self,
        user_id: Uuid,
        idea_id: i64,
        options: MvpOptions,
    ) -> Result<Document, AppError> {
        let idea = self
            .ideas
            .find_by_id(user_id, idea_id)
            .await?
            .ok_or_else(|| AppError::not_found("Idea not found", json!({ "id": idea_id })))?;

        let prompt = mvp_request(
            &idea.title,
            &idea.category,
            &idea.description,
            &options,
        );
        let params = GenerationParams {
            temperature: Some(MVP_TEMPERATURE),
            ..Default::default()
        };

        let content = self.generator.generate(&prompt, &params).await?;

        let title: String = format!("MVP prompt: {}", idea.title)
            .chars()
            .take(MAX_DOCUMENT_TITLE_LEN)
            .collect();

        let document = self
            .documents
            .create(NewDocument {
                user_id,
                idea_id: Some(idea.id),
                title,
                kind: DocumentKind::MvpPrompt,
                content,
            })
            .await?;

        self.cache
            .invalidate_all_of(&[DOCS, WORKSPACE, GET_SYSTEM_STATS]);
        tracing::info!(
            "MVP prompt document {} generated for idea {}",
            document.id,
            idea.id
        );

        Ok(document)
    }
}

fn brainstorm_prompt(topic: &str, count: u8) -> String {
    format!(
        "Suggest {count} distinct startup ideas about: {topic}\n\
         Reply with exactly one idea per line, formatted as \
         \"<name>: <one-sentence pitch>\". No introduction, no numbering."
    )
}

fn mvp_request(title: &str, category: &str, description: &str, options: &MvpOptions) -> String {
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "Write a detailed prompt that an AI coding assistant can follow to build \
         the minimum viable product for this startup idea."
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Idea: {title}");
    let _ = writeln!(prompt, "Category: {category}");
    if !description.trim().is_empty() {
        let _ = writeln!(prompt, "Description: {}", description.trim());
    }
    if let Some(platform) = non_blank(&options.target_platform) {
        let _ = writeln!(prompt, "Target platform: {platform}");
    }
    if let Some(notes) = non_blank(&options.notes) {
        let _ = writeln!(prompt, "Additional notes: {notes}");
    }
    let _ = writeln!(prompt);
    let _ = write!(
        prompt,
        "Cover: core user stories, the smallest feature set worth shipping, \
         data model, suggested tech stack and a step-by-step build plan."
    );

    prompt
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Splits a generated reply into list items.
fn parse_list(reply: &str, limit: usize) -> Vec<String> {
    reply
        .lines()
        .map(|line| LIST_PREFIX.replace(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Idea, IdeaStatus};
    use crate::domain::repositories::{MockDocumentRepository, MockIdeaRepository};
    use crate::infrastructure::ai::MockTextGenerator;
    use chrono::Utc;
    use std::time::Duration;

    fn test_cache() -> Arc<ReadThroughCache> {
        Arc::new(ReadThroughCache::in_memory(Duration::from_secs(300)))
    }

    fn service(
        generator: MockTextGenerator,
        ideas: MockIdeaRepository,
        documents: MockDocumentRepository,
    ) -> PromptService {
        PromptService::new(
            Arc::new(generator),
            Arc::new(ideas),
            Arc::new(documents),
            test_cache(),
        )
    }

    fn idea(id: i64, user_id: Uuid) -> Idea {
        Idea {
            id,
            user_id,
            title: "Recipe swap".to_string(),
            description: "Trade home recipes with neighbours".to_string(),
            category: "food".to_string(),
            status: IdeaStatus::Draft,
            score: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_parse_list_strips_markers() {
        let reply = "1. Alpha: first\n2) Beta: second\n\n- Gamma\n* Delta\n• Epsilon\n## Zeta\n";

        assert_eq!(
            parse_list(reply, 10),
            vec!["Alpha: first", "Beta: second", "Gamma", "Delta", "Epsilon", "Zeta"]
        );
    }

    #[test]
    fn test_parse_list_truncates() {
        assert_eq!(parse_list("a\nb\nc\nd", 2), vec!["a", "b"]);
    }

    #[test]
    fn test_parse_list_keeps_numbers_inside_text() {
        assert_eq!(parse_list("10x faster invoicing", 1), vec!["10x faster invoicing"]);
    }

    #[test]
    fn test_parse_list_keeps_leading_numbers_that_are_not_markers() {
        let reply = "1. 2030: carbon ledger\n2030: carbon ledger\n3.5x cheaper payroll\n4) 24/7 tutor";

        assert_eq!(
            parse_list(reply, 10),
            vec![
                "2030: carbon ledger",
                "2030: carbon ledger",
                "3.5x cheaper payroll",
                "24/7 tutor"
            ]
        );
    }

    #[test]
    fn test_mvp_request_skips_blank_options() {
        let options = MvpOptions {
            target_platform: Some("  ".to_string()),
            notes: Some("B2B only".to_string()),
        };

        let prompt = mvp_request("Recipe swap", "food", "", &options);

        assert!(prompt.contains("Idea: Recipe swap"));
        assert!(prompt.contains("Additional notes: B2B only"));
        assert!(!prompt.contains("Target platform"));
        assert!(!prompt.contains("Description"));
    }

    #[tokio::test]
    async fn test_brainstorm_validates_input() {
        let mut generator = MockTextGenerator::new();
        generator.expect_generate().never();

        let service = service(
            generator,
            MockIdeaRepository::new(),
            MockDocumentRepository::new(),
        );

        assert!(matches!(
            service.brainstorm("  ", None).await,
            Err(AppError::Validation { .. })
        ));
        assert!(matches!(
            service.brainstorm("fintech", Some(0)).await,
            Err(AppError::Validation { .. })
        ));
        assert!(matches!(
            service.brainstorm("fintech", Some(11)).await,
            Err(AppError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_brainstorm_returns_requested_count() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .withf(|prompt, params| {
                prompt.contains("Suggest 3 distinct startup ideas about: climate")
                    && params.temperature == Some(BRAINSTORM_TEMPERATURE)
            })
            .times(1)
            .returning(|_, _| Ok("1. One\n2. Two\n3. Three\n4. Four".to_string()));

        let service = service(
            generator,
            MockIdeaRepository::new(),
            MockDocumentRepository::new(),
        );

        let ideas = service.brainstorm(" climate ", Some(3)).await.unwrap();

        assert_eq!(ideas, vec!["One", "Two", "Three"]);
    }

    #[tokio::test]
    async fn test_brainstorm_with_empty_reply_is_unavailable() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .returning(|_, _| Ok("-\n\n  ".to_string()));
        generator.expect_provider_name().return_const("openai");

        let service = service(
            generator,
            MockIdeaRepository::new(),
            MockDocumentRepository::new(),
        );

        assert!(matches!(
            service.brainstorm("fintech", None).await,
            Err(AppError::Unavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_mvp_prompt_for_foreign_idea_is_not_found() {
        let mut generator = MockTextGenerator::new();
        generator.expect_generate().never();

        let mut ideas = MockIdeaRepository::new();
        ideas.expect_find_by_id().returning(|_, _| Ok(None));

        let service = service(generator, ideas, MockDocumentRepository::new());

        let result = service
            .mvp_prompt(Uuid::new_v4(), 1, MvpOptions::default())
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_mvp_prompt_saved_as_document() {
        let user = Uuid::new_v4();

        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .withf(|prompt, _| prompt.contains("Target platform: iOS"))
            .times(1)
            .returning(|_, _| Ok("Build a SwiftUI app...".to_string()));

        let mut ideas = MockIdeaRepository::new();
        ideas
            .expect_find_by_id()
            .returning(|user_id, id| Ok(Some(idea(id, user_id))));

        let mut documents = MockDocumentRepository::new();
        documents
            .expect_create()
            .withf(|doc| doc.kind == DocumentKind::MvpPrompt && doc.idea_id == Some(7))
            .times(1)
            .returning(|doc| {
                Ok(Document {
                    id: 11,
                    user_id: doc.user_id,
                    idea_id: doc.idea_id,
                    title: doc.title,
                    kind: doc.kind,
                    content: doc.content,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let service = service(generator, ideas, documents);

        let options = MvpOptions {
            target_platform: Some("iOS".to_string()),
            notes: None,
        };
        let document = service.mvp_prompt(user, 7, options).await.unwrap();

        assert_eq!(document.title, "MVP prompt: Recipe swap");
        assert_eq!(document.content, "Build a SwiftUI app...");
    }

    #[tokio::test]
    async fn test_generator_failure_saves_nothing() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .returning(|_, _| Err(AppError::unavailable("AI provider unreachable", json!({}))));

        let mut ideas = MockIdeaRepository::new();
        ideas
            .expect_find_by_id()
            .returning(|user_id, id| Ok(Some(idea(id, user_id))));

        let mut documents = MockDocumentRepository::new();
        documents.expect_create().never();

        let service = service(generator, ideas, documents);

        let result = service
            .mvp_prompt(Uuid::new_v4(), 7, MvpOptions::default())
            .await;

        assert!(matches!(result, Err(AppError::Unavailable { .. })));
    }
}
