//! Primary-with-fallback DraftRepository composition.
//!
//! Wraps two stores so the caller stays unaware of which backing is in
//! effect: operations try the primary (typically the networked document
//! service) and fall back to the secondary (typically the local TOML
//! store) when the primary fails. An offline session still lands every
//! write somewhere durable.

use async_trait::async_trait;
use planbook_core::draft::{Draft, DraftRepository, DraftSummary};
use planbook_core::error::Result;
use std::sync::Arc;

pub struct FallbackDraftRepository {
    primary: Arc<dyn DraftRepository>,
    fallback: Arc<dyn DraftRepository>,
}

impl FallbackDraftRepository {
    pub fn new(primary: Arc<dyn DraftRepository>, fallback: Arc<dyn DraftRepository>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl DraftRepository for FallbackDraftRepository {
    async fn load_drafts(&self, user_id: &str) -> Result<Vec<Draft>> {
        match self.primary.load_drafts(user_id).await {
            Ok(drafts) => Ok(drafts),
            Err(err) => {
                tracing::warn!(error = %err, "primary draft store unavailable, loading from fallback");
                self.fallback.load_drafts(user_id).await
            }
        }
    }

    async fn save_draft(&self, user_id: &str, draft: &Draft) -> Result<()> {
        match self.primary.save_draft(user_id, draft).await {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::warn!(draft_id = %draft.id, error = %err, "primary draft store unavailable, saving to fallback");
                self.fallback.save_draft(user_id, draft).await
            }
        }
    }

    async fn save_index(&self, user_id: &str, summaries: &[DraftSummary]) -> Result<()> {
        match self.primary.save_index(user_id, summaries).await {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::warn!(error = %err, "primary draft store unavailable, writing index to fallback");
                self.fallback.save_index(user_id, summaries).await
            }
        }
    }

    async fn delete_draft(&self, user_id: &str, draft_id: &str) -> Result<()> {
        match self.primary.delete_draft(user_id, draft_id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::warn!(draft_id = %draft_id, error = %err, "primary draft store unavailable, deleting from fallback");
                self.fallback.delete_draft(user_id, draft_id).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_draft_repository::MemoryDraftRepository;
    use planbook_core::error::PlanbookError;

    /// A store whose every operation fails, standing in for an
    /// unreachable document service.
    struct OfflineDraftRepository;

    #[async_trait]
    impl DraftRepository for OfflineDraftRepository {
        async fn load_drafts(&self, _user_id: &str) -> Result<Vec<Draft>> {
            Err(PlanbookError::persistence("service unreachable"))
        }

        async fn save_draft(&self, _user_id: &str, _draft: &Draft) -> Result<()> {
            Err(PlanbookError::persistence("service unreachable"))
        }

        async fn save_index(&self, _user_id: &str, _summaries: &[DraftSummary]) -> Result<()> {
            Err(PlanbookError::persistence("service unreachable"))
        }

        async fn delete_draft(&self, _user_id: &str, _draft_id: &str) -> Result<()> {
            Err(PlanbookError::persistence("service unreachable"))
        }
    }

    #[tokio::test]
    async fn test_save_falls_back_when_primary_is_offline() {
        let fallback = Arc::new(MemoryDraftRepository::new());
        let repository =
            FallbackDraftRepository::new(Arc::new(OfflineDraftRepository), fallback.clone());

        let draft = Draft::new("Offline edit");
        repository.save_draft("user-1", &draft).await.unwrap();

        assert_eq!(fallback.stored_drafts("user-1").await, vec![draft]);
    }

    #[tokio::test]
    async fn test_load_prefers_primary() {
        let primary = Arc::new(MemoryDraftRepository::new());
        let fallback = Arc::new(MemoryDraftRepository::new());
        let in_primary = Draft::new("Primary copy");
        primary.save_draft("user-1", &in_primary).await.unwrap();
        fallback
            .save_draft("user-1", &Draft::new("Stale fallback copy"))
            .await
            .unwrap();

        let repository = FallbackDraftRepository::new(primary, fallback);
        let drafts = repository.load_drafts("user-1").await.unwrap();
        assert_eq!(drafts, vec![in_primary]);
    }

    #[tokio::test]
    async fn test_load_falls_back_when_primary_is_offline() {
        let fallback = Arc::new(MemoryDraftRepository::new());
        let kept = Draft::new("Kept locally");
        fallback.save_draft("user-1", &kept).await.unwrap();

        let repository =
            FallbackDraftRepository::new(Arc::new(OfflineDraftRepository), fallback);
        assert_eq!(repository.load_drafts("user-1").await.unwrap(), vec![kept]);
    }
}
