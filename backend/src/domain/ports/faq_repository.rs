//! Port for FAQ persistence.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{Faq, FaqDraft, FaqPatch};

/// Errors raised by FAQ repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FaqRepositoryError {
    /// Repository connection could not be established.
    #[error("faq repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("faq repository query failed: {message}")]
    Query { message: String },
}

impl FaqRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for reading and writing FAQ entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FaqRepository: Send + Sync {
    /// List every entry, oldest first.
    async fn list(&self) -> Result<Vec<Faq>, FaqRepositoryError>;

    /// Find an entry by id.
    async fn find(&self, id: &Uuid) -> Result<Option<Faq>, FaqRepositoryError>;

    /// Persist a new entry.
    async fn create(&self, draft: &FaqDraft) -> Result<Faq, FaqRepositoryError>;

    /// Apply a partial update; `None` when the entry does not exist.
    async fn update(&self, id: &Uuid, patch: &FaqPatch)
    -> Result<Option<Faq>, FaqRepositoryError>;

    /// Remove an entry; `false` when it did not exist.
    async fn delete(&self, id: &Uuid) -> Result<bool, FaqRepositoryError>;
}

/// In-memory repository for tests and local runs without a database.
///
/// Clones share the same storage.
#[derive(Debug, Default, Clone)]
pub struct FixtureFaqRepository {
    entries: Arc<RwLock<Vec<Faq>>>,
}

impl FixtureFaqRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FaqRepository for FixtureFaqRepository {
    async fn list(&self) -> Result<Vec<Faq>, FaqRepositoryError> {
        Ok(self.entries.read().await.clone())
    }

    async fn find(&self, id: &Uuid) -> Result<Option<Faq>, FaqRepositoryError> {
        let entries = self.entries.read().await;
        Ok(entries.iter().find(|faq| faq.id == *id).cloned())
    }

    async fn create(&self, draft: &FaqDraft) -> Result<Faq, FaqRepositoryError> {
        let now = Utc::now();
        let faq = Faq {
            id: Uuid::new_v4(),
            question: draft.question().to_owned(),
            answer: draft.answer().to_owned(),
            created_at: now,
            updated_at: now,
        };
        self.entries.write().await.push(faq.clone());
        Ok(faq)
    }

    async fn update(
        &self,
        id: &Uuid,
        patch: &FaqPatch,
    ) -> Result<Option<Faq>, FaqRepositoryError> {
        let mut entries = self.entries.write().await;
        let Some(faq) = entries.iter_mut().find(|faq| faq.id == *id) else {
            return Ok(None);
        };
        if let Some(question) = patch.question() {
            question.clone_into(&mut faq.question);
        }
        if let Some(answer) = patch.answer() {
            answer.clone_into(&mut faq.answer);
        }
        faq.updated_at = Utc::now();
        Ok(Some(faq.clone()))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, FaqRepositoryError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|faq| faq.id != *id);
        Ok(entries.len() != before)
    }
}

#[cfg(test)]
mod tests {
    //! Behaviour of the in-memory fixture.

    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn draft() -> FaqDraft {
        FaqDraft::new("Where are you?", "Everywhere.").expect("valid draft")
    }

    #[rstest]
    #[actix_web::test]
    async fn create_then_find_returns_entry(draft: FaqDraft) {
        let repo = FixtureFaqRepository::new();
        let created = repo.create(&draft).await.expect("create succeeds");

        let found = repo.find(&created.id).await.expect("find succeeds");
        assert_eq!(found, Some(created));
    }

    #[rstest]
    #[actix_web::test]
    async fn update_touches_only_supplied_fields(draft: FaqDraft) {
        let repo = FixtureFaqRepository::new();
        let created = repo.create(&draft).await.expect("create succeeds");
        let patch = FaqPatch::new(None, Some("Nowhere.")).expect("valid patch");

        let updated = repo
            .update(&created.id, &patch)
            .await
            .expect("update succeeds")
            .expect("entry exists");
        assert_eq!(updated.question, "Where are you?");
        assert_eq!(updated.answer, "Nowhere.");
    }

    #[rstest]
    #[actix_web::test]
    async fn update_and_delete_report_missing_entries() {
        let repo = FixtureFaqRepository::new();
        let id = Uuid::new_v4();
        let patch = FaqPatch::new(Some("?"), None).expect("valid patch");

        assert_eq!(repo.update(&id, &patch).await, Ok(None));
        assert_eq!(repo.delete(&id).await, Ok(false));
    }

    #[rstest]
    #[actix_web::test]
    async fn clones_share_storage(draft: FaqDraft) {
        let repo = FixtureFaqRepository::new();
        let clone = repo.clone();
        clone.create(&draft).await.expect("create succeeds");

        assert_eq!(repo.list().await.expect("list succeeds").len(), 1);
    }
}
