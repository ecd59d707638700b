//! Idea vault service.

use regex::Regex;
use serde_json::json;
use std::sync::{Arc, LazyLock};
use uuid::Uuid;

use crate::domain::entities::{Idea, IdeaPatch, IdeaStatus, NewIdea};
use crate::domain::repositories::IdeaRepository;
use crate::error::AppError;
use crate::infrastructure::cache::ReadThroughCache;
use crate::infrastructure::cache::namespace::{
    DOCS, GET_IDEA_CATEGORIES, GET_IDEAS, GET_SYSTEM_STATS, IDEA_CATEGORIES_TTL, IDEA_VAULT,
    IDEAS_TTL, WORKSPACE,
};

static CATEGORY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9 -]*$").expect("valid category regex"));

const MAX_CATEGORY_LEN: usize = 50;

/// Input for a new idea, already checked for field lengths.
#[derive(Debug, Clone)]
pub struct IdeaDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: Option<IdeaStatus>,
    pub score: Option<i32>,
}

/// Service for the per-user idea vault.
///
/// List and category reads go through the read-through cache; every write
/// invalidates the `ideaVault` and `workspace` namespaces, since dashboard
/// counters and the activity feed are derived from ideas. Creating or
/// deleting an idea also drops the admin system stats, and deleting one
/// unlinks its documents, so `docs` goes too.
pub struct IdeaService {
    repository: Arc<dyn IdeaRepository>,
    cache: Arc<ReadThroughCache>,
}

impl IdeaService {
    pub fn new(repository: Arc<dyn IdeaRepository>, cache: Arc<ReadThroughCache>) -> Self {
        Self { repository, cache }
    }

    /// Lists the caller's ideas, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `category` is not a valid slug.
    pub async fn list_ideas(
        &self,
        user_id: Uuid,
        category: Option<String>,
    ) -> Result<Vec<Idea>, AppError> {
        let category = category.map(|c| normalize_category(&c)).transpose()?;
        let params = json!({ "user_id": user_id, "category": category });

        self.cache
            .get_or_fetch(GET_IDEAS, &params, Some(IDEAS_TTL), || {
                self.repository.list_by_user(user_id, category)
            })
            .await
    }

    /// Distinct categories of the caller's ideas.
    pub async fn categories(&self, user_id: Uuid) -> Result<Vec<String>, AppError> {
        self.cache
            .get_or_fetch(
                GET_IDEA_CATEGORIES,
                &json!({ "user_id": user_id }),
                Some(IDEA_CATEGORIES_TTL),
                || self.repository.categories(user_id),
            )
            .await
    }

    /// Retrieves one of the caller's ideas.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the idea does not exist or belongs to
    /// another user.
    pub async fn get_idea(&self, user_id: Uuid, id: i64) -> Result<Idea, AppError> {
        self.repository
            .find_by_id(user_id, id)
            .await?
            .ok_or_else(|| idea_not_found(id))
    }

    /// Creates an idea owned by the caller.
    ///
    /// New ideas start as `draft` unless a status is given.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the title is blank, the category is
    /// not a slug, or the score is outside `0..=100`.
    pub async fn create_idea(&self, user_id: Uuid, draft: IdeaDraft) -> Result<Idea, AppError> {
        let title = normalize_title(&draft.title)?;
        let category = normalize_category(&draft.category)?;
        if let Some(score) = draft.score {
            validate_score(score)?;
        }

        let idea = self
            .repository
            .create(NewIdea {
                user_id,
                title,
                description: draft.description,
                category,
                status: draft.status.unwrap_or(IdeaStatus::Draft),
                score: draft.score,
            })
            .await?;

        self.invalidate();
        self.cache.invalidate(GET_SYSTEM_STATS);
        tracing::info!("Idea {} created by {}", idea.id, user_id);

        Ok(idea)
    }

    /// Applies a partial update to one of the caller's ideas.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the patch is empty or a field is invalid.
    /// Returns [`AppError::NotFound`] if the idea does not exist for the caller.
    pub async fn update_idea(
        &self,
        user_id: Uuid,
        id: i64,
        mut patch: IdeaPatch,
    ) -> Result<Idea, AppError> {
        if patch.is_empty() {
            return Err(AppError::bad_request(
                "No fields to update",
                json!({ "id": id }),
            ));
        }

        patch.title = patch.title.as_deref().map(normalize_title).transpose()?;
        patch.category = patch.category.as_deref().map(normalize_category).transpose()?;
        if let Some(Some(score)) = patch.score {
            validate_score(score)?;
        }

        let idea = self
            .repository
            .update(user_id, id, patch)
            .await?
            .ok_or_else(|| idea_not_found(id))?;

        self.invalidate();

        Ok(idea)
    }

    /// Deletes one of the caller's ideas.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the idea does not exist for the caller.
    pub async fn delete_idea(&self, user_id: Uuid, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(user_id, id).await? {
            return Err(idea_not_found(id));
        }

        self.invalidate();
        self.cache.invalidate_all_of(&[DOCS, GET_SYSTEM_STATS]);
        tracing::info!("Idea {} deleted by {}", id, user_id);

        Ok(())
    }

    fn invalidate(&self) {
        self.cache.invalidate_all_of(&[IDEA_VAULT, WORKSPACE]);
    }
}

fn idea_not_found(id: i64) -> AppError {
    AppError::not_found("Idea not found", json!({ "id": id }))
}

fn normalize_title(title: &str) -> Result<String, AppError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::bad_request(
            "Title must not be blank",
            json!({ "field": "title" }),
        ));
    }
    Ok(title.to_string())
}

/// Trims and lowercases a category, then checks it is a slug.
fn normalize_category(category: &str) -> Result<String, AppError> {
    let normalized = category.trim().to_lowercase();

    if normalized.chars().count() > MAX_CATEGORY_LEN || !CATEGORY_REGEX.is_match(&normalized) {
        return Err(AppError::bad_request(
            "Invalid category",
            json!({
                "category": category,
                "reason": "Use 1-50 lowercase letters, digits, spaces or hyphens"
            }),
        ));
    }

    Ok(normalized)
}

fn validate_score(score: i32) -> Result<(), AppError> {
    if !(0..=100).contains(&score) {
        return Err(AppError::bad_request(
            "Score must be between 0 and 100",
            json!({ "score": score }),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockIdeaRepository;
    use crate::infrastructure::cache::namespace::GET_DOCUMENTS;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Reads `operation` through the cache, counting fetches.
    async fn counted_read(
        cache: &ReadThroughCache,
        operation: &str,
        user: Uuid,
        fetches: &AtomicUsize,
    ) -> usize {
        cache
            .get_or_fetch(operation, &json!({ "user_id": user }), None, || async {
                Ok::<_, AppError>(fetches.fetch_add(1, Ordering::SeqCst))
            })
            .await
            .unwrap()
    }

    fn test_cache() -> Arc<ReadThroughCache> {
        Arc::new(ReadThroughCache::in_memory(Duration::from_secs(300)))
    }

    fn create_test_idea(id: i64, user_id: Uuid, category: &str) -> Idea {
        Idea {
            id,
            user_id,
            title: format!("Idea {}", id),
            description: String::new(),
            category: category.to_string(),
            status: IdeaStatus::Draft,
            score: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn draft(title: &str, category: &str) -> IdeaDraft {
        IdeaDraft {
            title: title.to_string(),
            description: "A description".to_string(),
            category: category.to_string(),
            status: None,
            score: None,
        }
    }

    #[tokio::test]
    async fn test_list_ideas_is_cached() {
        let user = Uuid::new_v4();
        let mut mock_repo = MockIdeaRepository::new();

        mock_repo
            .expect_list_by_user()
            .times(1)
            .returning(move |u, _| Ok(vec![create_test_idea(1, u, "fintech")]));

        let service = IdeaService::new(Arc::new(mock_repo), test_cache());

        let first = service.list_ideas(user, None).await.unwrap();
        let second = service.list_ideas(user, None).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }

    #[tokio::test]
    async fn test_list_ideas_cache_is_per_user_and_category() {
        let mut mock_repo = MockIdeaRepository::new();

        mock_repo
            .expect_list_by_user()
            .times(3)
            .returning(|_, _| Ok(vec![]));

        let service = IdeaService::new(Arc::new(mock_repo), test_cache());
        let user = Uuid::new_v4();

        service.list_ideas(user, None).await.unwrap();
        service.list_ideas(user, Some("fintech".to_string())).await.unwrap();
        service.list_ideas(Uuid::new_v4(), None).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_ideas_normalizes_category_filter() {
        let mut mock_repo = MockIdeaRepository::new();

        mock_repo
            .expect_list_by_user()
            .withf(|_, category| category.as_deref() == Some("dev tools"))
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let service = IdeaService::new(Arc::new(mock_repo), test_cache());

        service
            .list_ideas(Uuid::new_v4(), Some("  Dev Tools ".to_string()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_idea_invalidates_lists() {
        let user = Uuid::new_v4();
        let mut mock_repo = MockIdeaRepository::new();

        mock_repo
            .expect_list_by_user()
            .times(2)
            .returning(|_, _| Ok(vec![]));

        mock_repo
            .expect_create()
            .withf(|idea| {
                idea.title == "Meal planner"
                    && idea.category == "food"
                    && idea.status == IdeaStatus::Draft
            })
            .times(1)
            .returning(|idea| {
                let mut created = create_test_idea(10, idea.user_id, &idea.category);
                created.title = idea.title;
                Ok(created)
            });

        let cache = test_cache();
        let service = IdeaService::new(Arc::new(mock_repo), cache.clone());

        service.list_ideas(user, None).await.unwrap();
        let idea = service
            .create_idea(user, draft("  Meal planner ", "Food"))
            .await
            .unwrap();
        service.list_ideas(user, None).await.unwrap();

        assert_eq!(idea.id, 10);
        assert_eq!(cache.stats().misses, 2);
    }

    #[tokio::test]
    async fn test_create_idea_rejects_bad_category() {
        let mock_repo = MockIdeaRepository::new();
        let service = IdeaService::new(Arc::new(mock_repo), test_cache());

        let result = service
            .create_idea(Uuid::new_v4(), draft("Title", "-fintech!"))
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_idea_rejects_blank_title_and_bad_score() {
        let mock_repo = MockIdeaRepository::new();
        let service = IdeaService::new(Arc::new(mock_repo), test_cache());
        let user = Uuid::new_v4();

        let blank = service.create_idea(user, draft("   ", "saas")).await;
        assert!(matches!(blank, Err(AppError::Validation { .. })));

        let mut scored = draft("Title", "saas");
        scored.score = Some(101);
        let out_of_range = service.create_idea(user, scored).await;
        assert!(matches!(out_of_range, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_get_idea_of_other_user_is_not_found() {
        let mut mock_repo = MockIdeaRepository::new();

        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = IdeaService::new(Arc::new(mock_repo), test_cache());

        let result = service.get_idea(Uuid::new_v4(), 42).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_idea_with_empty_patch_is_rejected() {
        let mock_repo = MockIdeaRepository::new();
        let service = IdeaService::new(Arc::new(mock_repo), test_cache());

        let result = service
            .update_idea(Uuid::new_v4(), 1, IdeaPatch::default())
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_update_missing_idea_does_not_invalidate() {
        let user = Uuid::new_v4();
        let mut mock_repo = MockIdeaRepository::new();

        mock_repo
            .expect_categories()
            .times(1)
            .returning(|_| Ok(vec!["saas".to_string()]));
        mock_repo
            .expect_update()
            .times(1)
            .returning(|_, _, _| Ok(None));

        let service = IdeaService::new(Arc::new(mock_repo), test_cache());

        service.categories(user).await.unwrap();
        let result = service
            .update_idea(
                user,
                7,
                IdeaPatch {
                    status: Some(IdeaStatus::Validated),
                    ..Default::default()
                },
            )
            .await;
        service.categories(user).await.unwrap();

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_idea() {
        let mut mock_repo = MockIdeaRepository::new();

        mock_repo
            .expect_delete()
            .times(2)
            .returning(|_, id| Ok(id == 1));

        let service = IdeaService::new(Arc::new(mock_repo), test_cache());
        let user = Uuid::new_v4();

        assert!(service.delete_idea(user, 1).await.is_ok());
        assert!(matches!(
            service.delete_idea(user, 2).await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_idea_invalidates_documents_and_system_stats() {
        let mut mock_repo = MockIdeaRepository::new();

        mock_repo
            .expect_delete()
            .times(1)
            .returning(|_, _| Ok(true));

        let cache = test_cache();
        let service = IdeaService::new(Arc::new(mock_repo), cache.clone());
        let user = Uuid::new_v4();
        let fetches = AtomicUsize::new(0);

        for operation in [GET_DOCUMENTS, GET_SYSTEM_STATS, GET_DOCUMENTS, GET_SYSTEM_STATS] {
            counted_read(&cache, operation, user, &fetches).await;
        }
        assert_eq!(fetches.load(Ordering::SeqCst), 2);

        service.delete_idea(user, 1).await.unwrap();

        for operation in [GET_DOCUMENTS, GET_SYSTEM_STATS] {
            counted_read(&cache, operation, user, &fetches).await;
        }
        assert_eq!(fetches.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_repository_error_is_not_cached() {
        let mut mock_repo = MockIdeaRepository::new();
        let mut seq = mockall::Sequence::new();

        mock_repo
            .expect_categories()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));
        mock_repo
            .expect_categories()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec!["fintech".to_string()]));

        let service = IdeaService::new(Arc::new(mock_repo), test_cache());
        let user = Uuid::new_v4();

        assert!(service.categories(user).await.is_err());
        assert_eq!(service.categories(user).await.unwrap(), vec!["fintech"]);
    }

    #[test]
    fn test_normalize_category() {
        assert_eq!(normalize_category(" Dev Tools ").unwrap(), "dev tools");
        assert_eq!(normalize_category("b2b-saas").unwrap(), "b2b-saas");
        assert!(normalize_category("").is_err());
        assert!(normalize_category(" -x").is_err());
        assert!(normalize_category(&"a".repeat(51)).is_err());
    }
}
