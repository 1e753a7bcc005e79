//! In-memory DraftRepository implementation.
//!
//! Backs ephemeral deployments and tests. Nothing survives the process.

use async_trait::async_trait;
use planbook_core::draft::{Draft, DraftRepository, DraftSummary};
use planbook_core::error::Result;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// A repository implementation holding drafts in process memory,
/// keyed by user id then draft id.
#[derive(Default)]
pub struct MemoryDraftRepository {
    drafts: Mutex<HashMap<String, HashMap<String, Draft>>>,
    indexes: Mutex<HashMap<String, Vec<DraftSummary>>>,
}

impl MemoryDraftRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of one user's stored drafts, for assertions in tests and
    /// diagnostics. Returned in creation order, matching `load_drafts`.
    pub async fn stored_drafts(&self, user_id: &str) -> Vec<Draft> {
        let drafts = self.drafts.lock().await;
        let mut stored: Vec<Draft> = drafts
            .get(user_id)
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default();
        stored.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        stored
    }

    /// Snapshot of one user's stored index.
    pub async fn stored_index(&self, user_id: &str) -> Vec<DraftSummary> {
        let indexes = self.indexes.lock().await;
        indexes.get(user_id).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl DraftRepository for MemoryDraftRepository {
    async fn load_drafts(&self, user_id: &str) -> Result<Vec<Draft>> {
        Ok(self.stored_drafts(user_id).await)
    }

    async fn save_draft(&self, user_id: &str, draft: &Draft) -> Result<()> {
        let mut drafts = self.drafts.lock().await;
        drafts
            .entry(user_id.to_string())
            .or_default()
            .insert(draft.id.clone(), draft.clone());
        Ok(())
    }

    async fn save_index(&self, user_id: &str, summaries: &[DraftSummary]) -> Result<()> {
        let mut indexes = self.indexes.lock().await;
        indexes.insert(user_id.to_string(), summaries.to_vec());
        Ok(())
    }

    async fn delete_draft(&self, user_id: &str, draft_id: &str) -> Result<()> {
        let mut drafts = self.drafts.lock().await;
        if let Some(user_drafts) = drafts.get_mut(user_id) {
            user_drafts.remove(draft_id);
        }
        Ok(())
    }
}
