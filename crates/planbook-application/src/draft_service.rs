//! Draft service: the application-facing facade over the draft store.
//!
//! Owns the in-memory [`DraftManager`], resolves identity, and turns
//! every durable-content mutation into a scheduled, fire-and-forget
//! write against the injected [`DraftRepository`]. The rendering layer
//! talks to this service and to nothing else.

use crate::events::PersistenceEvent;
use planbook_core::compare::ComparisonReport;
use planbook_core::draft::{
    BusinessPlanPatch, Draft, DraftManager, DraftRepository, DraftSummary, DraftView,
    FinancialPatch, Vendor,
};
use planbook_core::error::Result;
use planbook_core::identity::IdentityProvider;
use planbook_infrastructure::TomlDraftRepository;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

/// Name given to the draft created when a user has none yet. Naming
/// policy lives here, at the call site, not inside the manager.
const DEFAULT_DRAFT_NAME: &str = "My Business Plan";

/// Capacity of the persistence event channel; slow subscribers lag
/// rather than block the writers.
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Application service for draft management.
///
/// `DraftService` is responsible for:
/// - Loading the user's drafts at startup (with offline bootstrap)
/// - Exposing the draft read API and mutation actions to the UI
/// - Scheduling best-effort persistence after every content mutation
/// - Broadcasting persistence outcomes as [`PersistenceEvent`]s
///
/// Mutations complete synchronously against in-memory state while
/// holding the manager lock; persistence happens afterwards in detached
/// tasks carrying owned snapshots, so no I/O ever runs under the lock. A
/// failed scheduled write never rolls back the in-memory change: losing
/// an unsaved edit is worse than a stale persisted copy.
pub struct DraftService {
    manager: RwLock<DraftManager>,
    repository: Arc<dyn DraftRepository>,
    identity: Arc<dyn IdentityProvider>,
    events: broadcast::Sender<PersistenceEvent>,
}

impl DraftService {
    /// Creates a service with no drafts loaded. Call [`Self::load`] to
    /// run the startup path.
    pub fn new(repository: Arc<dyn DraftRepository>, identity: Arc<dyn IdentityProvider>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            manager: RwLock::new(DraftManager::new()),
            repository,
            identity,
            events,
        }
    }

    /// Creates a service backed by the local TOML store at the platform
    /// default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the store directory cannot be resolved or
    /// created.
    pub fn with_local_store(identity: Arc<dyn IdentityProvider>) -> Result<Self> {
        let repository = Arc::new(TomlDraftRepository::default_location()?);
        Ok(Self::new(repository, identity))
    }

    /// Subscribes to persistence outcome events.
    ///
    /// Subscribe before calling [`Self::load`] to observe startup events.
    pub fn subscribe(&self) -> broadcast::Receiver<PersistenceEvent> {
        self.events.subscribe()
    }

    /// Runs the startup path.
    ///
    /// - No signed-in user: bootstraps one blank default draft and
    ///   operates purely in memory.
    /// - Store returns drafts: bulk-loads them; the first becomes active.
    /// - Store is empty (first run): bootstraps and persists one blank
    ///   default draft.
    /// - Store fails: broadcasts [`PersistenceEvent::LoadFailed`] and
    ///   bootstraps in memory only, so the application stays usable
    ///   offline.
    pub async fn load(&self) {
        let Some(user_id) = self.identity.current_user_id() else {
            tracing::debug!("no user signed in, draft store is memory-only");
            self.bootstrap_default().await;
            return;
        };

        match self.repository.load_drafts(&user_id).await {
            Ok(drafts) if drafts.is_empty() => {
                tracing::debug!(user_id = %user_id, "first run, seeding default draft");
                let (snapshot, summaries) = self.bootstrap_default().await;
                self.schedule_draft_save(snapshot);
                self.schedule_index_save(summaries);
            }
            Ok(drafts) => {
                let mut manager = self.manager.write().await;
                manager.replace_all(drafts);
            }
            Err(err) => {
                tracing::warn!(user_id = %user_id, error = %err, "loading drafts failed, bootstrapping offline");
                let _ = self.events.send(PersistenceEvent::LoadFailed {
                    message: err.to_string(),
                });
                self.bootstrap_default().await;
            }
        }
    }

    // ============================================================================
    // Read API
    // ============================================================================

    /// Lists draft metadata in list order.
    pub async fn list_drafts(&self) -> Vec<DraftSummary> {
        self.manager.read().await.list_drafts()
    }

    /// Returns the id of the active draft, if any.
    pub async fn active_draft_id(&self) -> Option<String> {
        self.manager
            .read()
            .await
            .active_draft_id()
            .map(str::to_string)
    }

    /// Returns the derived view of the active draft.
    pub async fn current_view(&self) -> DraftView {
        self.manager.read().await.current_view()
    }

    /// Produces a comparison report for two drafts.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if either id does not match any draft.
    pub async fn compare_drafts(&self, id_a: &str, id_b: &str) -> Result<ComparisonReport> {
        self.manager.read().await.compare_drafts(id_a, id_b)
    }

    /// Compares the currently selected pair, if one is set.
    pub async fn selected_comparison(&self) -> Option<ComparisonReport> {
        self.manager.read().await.selected_comparison()
    }

    // ============================================================================
    // Actions
    // ============================================================================

    /// Creates a new draft (blank, or copying `base`) and makes it
    /// active.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` for an empty name, `NotFound` for a missing
    /// `base`.
    pub async fn create_draft(&self, name: &str, base: Option<&str>) -> Result<String> {
        let (id, snapshot, summaries) = {
            let mut manager = self.manager.write().await;
            let id = manager.create_draft(name, base)?;
            let snapshot = manager.get(&id).cloned();
            (id, snapshot, manager.list_drafts())
        };
        if let Some(draft) = snapshot {
            self.schedule_draft_save(draft);
        }
        self.schedule_index_save(summaries);
        Ok(id)
    }

    /// Duplicates a draft under a new name without changing which draft
    /// is active.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` for an empty name, `NotFound` for a missing
    /// source.
    pub async fn duplicate_draft(&self, source_id: &str, new_name: &str) -> Result<String> {
        let (id, snapshot, summaries) = {
            let mut manager = self.manager.write().await;
            let id = manager.duplicate_draft(source_id, new_name)?;
            let snapshot = manager.get(&id).cloned();
            (id, snapshot, manager.list_drafts())
        };
        if let Some(draft) = snapshot {
            self.schedule_draft_save(draft);
        }
        self.schedule_index_save(summaries);
        Ok(id)
    }

    /// Deletes a draft and schedules removal of its durable copy.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing id, `LastDraft` when the draft is
    /// the only one remaining.
    pub async fn delete_draft(&self, draft_id: &str) -> Result<()> {
        let summaries = {
            let mut manager = self.manager.write().await;
            manager.delete_draft(draft_id)?;
            manager.list_drafts()
        };
        self.schedule_draft_delete(draft_id.to_string());
        self.schedule_index_save(summaries);
        Ok(())
    }

    /// Renames a draft.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing id, `InvalidName` for an empty
    /// name.
    pub async fn rename_draft(&self, draft_id: &str, new_name: &str) -> Result<()> {
        let (snapshot, summaries) = {
            let mut manager = self.manager.write().await;
            manager.rename_draft(draft_id, new_name)?;
            (manager.get(draft_id).cloned(), manager.list_drafts())
        };
        if let Some(draft) = snapshot {
            self.schedule_draft_save(draft);
        }
        self.schedule_index_save(summaries);
        Ok(())
    }

    /// Switches the active draft. Pure navigation; nothing is persisted.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing id.
    pub async fn set_active_draft(&self, draft_id: &str) -> Result<()> {
        self.manager.write().await.set_active(draft_id)
    }

    /// Applies a business-plan section patch to the active draft.
    ///
    /// With no active draft this is a logged no-op: that state indicates
    /// a UI wiring bug, not a user mistake.
    pub async fn update_business_plan(&self, patch: BusinessPlanPatch) {
        let snapshot = self.manager.write().await.update_business_plan(patch);
        self.write_through("update_business_plan", snapshot).await;
    }

    /// Applies a financial category patch to the active draft.
    pub async fn update_financials(&self, patch: FinancialPatch) {
        let snapshot = self.manager.write().await.update_financials(patch);
        self.write_through("update_financials", snapshot).await;
    }

    /// Replaces the active draft's vendor list.
    pub async fn set_vendors(&self, vendors: Vec<Vendor>) {
        let snapshot = self.manager.write().await.set_vendors(vendors);
        self.write_through("set_vendors", snapshot).await;
    }

    /// Appends a vendor to the active draft.
    pub async fn add_vendor(&self, vendor: Vendor) {
        let snapshot = self.manager.write().await.add_vendor(vendor);
        self.write_through("add_vendor", snapshot).await;
    }

    /// Removes a vendor from the active draft by vendor id.
    pub async fn remove_vendor(&self, vendor_id: &str) {
        let snapshot = self.manager.write().await.remove_vendor(vendor_id);
        self.write_through("remove_vendor", snapshot).await;
    }

    /// Records which two drafts are selected for comparison.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if either id does not match any draft.
    pub async fn set_comparison_pair(&self, id_a: &str, id_b: &str) -> Result<()> {
        self.manager.write().await.set_comparison_pair(id_a, id_b)
    }

    /// Clears the comparison selection.
    pub async fn clear_comparison_pair(&self) {
        self.manager.write().await.clear_comparison_pair();
    }

    // ============================================================================
    // Scheduled persistence
    // ============================================================================

    /// Handles the outcome of one active-draft mutation: schedules the
    /// write-through, or logs the tolerated no-active-draft no-op.
    async fn write_through(&self, action: &str, snapshot: Option<Draft>) {
        match snapshot {
            Some(draft) => {
                let summaries = self.manager.read().await.list_drafts();
                self.schedule_draft_save(draft);
                self.schedule_index_save(summaries);
            }
            None => {
                tracing::warn!(action, "mutation ignored: no active draft");
            }
        }
    }

    /// Schedules a fire-and-forget write of the latest draft snapshot.
    ///
    /// Writes are idempotent puts of the newest in-memory state, so two
    /// writes for the same draft completing out of order cannot corrupt
    /// the store.
    fn schedule_draft_save(&self, draft: Draft) {
        let Some(user_id) = self.identity.current_user_id() else {
            tracing::debug!(draft_id = %draft.id, "no user signed in, skipping draft save");
            return;
        };
        let repository = Arc::clone(&self.repository);
        let events = self.events.clone();
        tokio::spawn(async move {
            let event = match repository.save_draft(&user_id, &draft).await {
                Ok(()) => PersistenceEvent::Saved { draft_id: draft.id },
                Err(err) => {
                    tracing::warn!(draft_id = %draft.id, error = %err, "scheduled draft save failed");
                    PersistenceEvent::SaveFailed {
                        draft_id: draft.id,
                        message: err.to_string(),
                    }
                }
            };
            let _ = events.send(event);
        });
    }

    fn schedule_index_save(&self, summaries: Vec<DraftSummary>) {
        let Some(user_id) = self.identity.current_user_id() else {
            return;
        };
        let repository = Arc::clone(&self.repository);
        let events = self.events.clone();
        tokio::spawn(async move {
            if let Err(err) = repository.save_index(&user_id, &summaries).await {
                tracing::warn!(error = %err, "scheduled index save failed");
                let _ = events.send(PersistenceEvent::IndexSaveFailed {
                    message: err.to_string(),
                });
            }
        });
    }

    fn schedule_draft_delete(&self, draft_id: String) {
        let Some(user_id) = self.identity.current_user_id() else {
            tracing::debug!(draft_id = %draft_id, "no user signed in, skipping draft delete");
            return;
        };
        let repository = Arc::clone(&self.repository);
        let events = self.events.clone();
        tokio::spawn(async move {
            let event = match repository.delete_draft(&user_id, &draft_id).await {
                Ok(()) => PersistenceEvent::Deleted { draft_id },
                Err(err) => {
                    tracing::warn!(draft_id = %draft_id, error = %err, "scheduled draft delete failed");
                    PersistenceEvent::DeleteFailed {
                        draft_id,
                        message: err.to_string(),
                    }
                }
            };
            let _ = events.send(event);
        });
    }

    /// Seeds the single default draft used by every bootstrap path.
    async fn bootstrap_default(&self) -> (Draft, Vec<DraftSummary>) {
        let mut manager = self.manager.write().await;
        let id = manager
            .create_draft(DEFAULT_DRAFT_NAME, None)
            .expect("default draft name is non-empty");
        // Safe to unwrap because we just created the draft.
        let snapshot = manager.get(&id).unwrap().clone();
        (snapshot, manager.list_drafts())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use planbook_core::draft::financial::RevenuePatch;
    use planbook_core::error::PlanbookError;
    use planbook_core::identity::{Anonymous, StaticIdentity};
    use planbook_infrastructure::MemoryDraftRepository;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn service(repository: Arc<dyn DraftRepository>) -> DraftService {
        DraftService::new(repository, Arc::new(StaticIdentity::new("user-1")))
    }

    async fn wait_for_saved(rx: &mut broadcast::Receiver<PersistenceEvent>, draft_id: &str) {
        loop {
            if let PersistenceEvent::Saved { draft_id: id } = rx.recv().await.unwrap() {
                if id == draft_id {
                    return;
                }
            }
        }
    }

    // A store whose load fails, standing in for an unreachable service.
    struct UnreachableRepository;

    #[async_trait]
    impl DraftRepository for UnreachableRepository {
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

    // Loads fine but fails every write.
    struct ReadOnlyRepository;

    #[async_trait]
    impl DraftRepository for ReadOnlyRepository {
        async fn load_drafts(&self, _user_id: &str) -> Result<Vec<Draft>> {
            Ok(Vec::new())
        }

        async fn save_draft(&self, _user_id: &str, _draft: &Draft) -> Result<()> {
            Err(PlanbookError::persistence("store is read-only"))
        }

        async fn save_index(&self, _user_id: &str, _summaries: &[DraftSummary]) -> Result<()> {
            Err(PlanbookError::persistence("store is read-only"))
        }

        async fn delete_draft(&self, _user_id: &str, _draft_id: &str) -> Result<()> {
            Err(PlanbookError::persistence("store is read-only"))
        }
    }

    // Counts every call, to prove the signed-out path never touches it.
    #[derive(Default)]
    struct CountingRepository {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DraftRepository for CountingRepository {
        async fn load_drafts(&self, _user_id: &str) -> Result<Vec<Draft>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        async fn save_draft(&self, _user_id: &str, _draft: &Draft) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn save_index(&self, _user_id: &str, _summaries: &[DraftSummary]) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn delete_draft(&self, _user_id: &str, _draft_id: &str) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_load_bootstraps_and_persists_default_draft() {
        let repository = Arc::new(MemoryDraftRepository::new());
        let service = service(repository.clone());
        let mut rx = service.subscribe();

        service.load().await;

        let drafts = service.list_drafts().await;
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].name, "My Business Plan");
        assert_eq!(service.active_draft_id().await, Some(drafts[0].id.clone()));

        wait_for_saved(&mut rx, &drafts[0].id).await;
        assert_eq!(repository.stored_drafts("user-1").await.len(), 1);
    }

    #[tokio::test]
    async fn test_load_uses_stored_drafts() {
        let repository = Arc::new(MemoryDraftRepository::new());
        let first = Draft::new("Stored A");
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = Draft::new("Stored B");
        repository.save_draft("user-1", &first).await.unwrap();
        repository.save_draft("user-1", &second).await.unwrap();

        let service = service(repository);
        service.load().await;

        let drafts = service.list_drafts().await;
        assert_eq!(drafts.len(), 2);
        assert_eq!(service.active_draft_id().await, Some(first.id));
    }

    #[tokio::test]
    async fn test_load_failure_bootstraps_offline() {
        let service = service(Arc::new(UnreachableRepository));
        let mut rx = service.subscribe();

        service.load().await;

        assert!(matches!(
            rx.recv().await.unwrap(),
            PersistenceEvent::LoadFailed { .. }
        ));
        assert_eq!(service.list_drafts().await.len(), 1);
        assert!(service.active_draft_id().await.is_some());
    }

    #[tokio::test]
    async fn test_create_draft_persists_snapshot() {
        let repository = Arc::new(MemoryDraftRepository::new());
        let service = service(repository.clone());
        service.load().await;
        let mut rx = service.subscribe();

        let id = service
            .create_draft("North End Italian Bistro", None)
            .await
            .unwrap();
        assert_eq!(service.active_draft_id().await, Some(id.clone()));
        assert_eq!(service.list_drafts().await.len(), 2);

        wait_for_saved(&mut rx, &id).await;
        let stored = repository.stored_drafts("user-1").await;
        assert!(stored.iter().any(|d| d.id == id));
    }

    #[tokio::test]
    async fn test_update_persists_latest_snapshot() {
        let repository = Arc::new(MemoryDraftRepository::new());
        let service = service(repository.clone());
        let mut rx = service.subscribe();
        service.load().await;
        let id = service.active_draft_id().await.unwrap();
        // Drain the bootstrap save so the next Saved event is the update's.
        wait_for_saved(&mut rx, &id).await;

        service
            .update_financials(FinancialPatch::Revenue(RevenuePatch {
                food_sales: Some(700_000.0),
                ..Default::default()
            }))
            .await;

        assert_eq!(
            service.current_view().await.financial_data.revenue.food_sales,
            700_000.0
        );

        wait_for_saved(&mut rx, &id).await;
        let stored = repository.stored_drafts("user-1").await;
        assert_eq!(stored[0].financial_data.revenue.food_sales, 700_000.0);
    }

    #[tokio::test]
    async fn test_save_failure_preserves_in_memory_edit() {
        let service = service(Arc::new(ReadOnlyRepository));
        service.load().await;
        let mut rx = service.subscribe();

        let id = service.create_draft("Unsaved Bistro", None).await.unwrap();

        loop {
            if let PersistenceEvent::SaveFailed { draft_id, .. } = rx.recv().await.unwrap() {
                if draft_id == id {
                    break;
                }
            }
        }
        // The edit is still here, only the durable copy is stale.
        assert!(service.list_drafts().await.iter().any(|d| d.id == id));
    }

    #[tokio::test]
    async fn test_delete_draft_removes_durable_copy() {
        let repository = Arc::new(MemoryDraftRepository::new());
        let service = service(repository.clone());
        service.load().await;
        let mut rx = service.subscribe();
        let keep = service.active_draft_id().await.unwrap();
        let doomed = service.create_draft("Doomed", None).await.unwrap();
        wait_for_saved(&mut rx, &doomed).await;

        service.delete_draft(&doomed).await.unwrap();

        loop {
            if let PersistenceEvent::Deleted { draft_id } = rx.recv().await.unwrap() {
                if draft_id == doomed {
                    break;
                }
            }
        }
        let stored = repository.stored_drafts("user-1").await;
        assert!(!stored.iter().any(|d| d.id == doomed));
        assert!(service.list_drafts().await.iter().any(|d| d.id == keep));
    }

    #[tokio::test]
    async fn test_last_draft_delete_refused() {
        let service = service(Arc::new(MemoryDraftRepository::new()));
        service.load().await;
        let id = service.active_draft_id().await.unwrap();

        let err = service.delete_draft(&id).await.unwrap_err();
        assert!(err.is_last_draft());
        assert_eq!(service.list_drafts().await.len(), 1);
    }

    #[tokio::test]
    async fn test_signed_out_service_never_touches_store() {
        let repository = Arc::new(CountingRepository::default());
        let service = DraftService::new(repository.clone(), Arc::new(Anonymous));

        service.load().await;
        let id = service.create_draft("Memory only", None).await.unwrap();
        service
            .update_financials(FinancialPatch::Revenue(RevenuePatch {
                food_sales: Some(1.0),
                ..Default::default()
            }))
            .await;
        service.rename_draft(&id, "Still memory only").await.unwrap();

        // Scheduling is skipped before any task is spawned, so there is
        // nothing asynchronous to wait out.
        assert_eq!(repository.calls.load(Ordering::SeqCst), 0);
        assert_eq!(service.list_drafts().await.len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_then_compare_differs_nowhere() {
        let service = service(Arc::new(MemoryDraftRepository::new()));
        service.load().await;
        let original = service.active_draft_id().await.unwrap();
        service
            .update_financials(FinancialPatch::Revenue(RevenuePatch {
                food_sales: Some(500_000.0),
                ..Default::default()
            }))
            .await;

        let copy = service.duplicate_draft(&original, "copy").await.unwrap();
        assert_eq!(service.active_draft_id().await, Some(original.clone()));

        let report = service.compare_drafts(&original, &copy).await.unwrap();
        assert!(report.is_identical());
        assert_eq!(report.draft_b.name, "copy");
    }

    #[tokio::test]
    async fn test_comparison_pair_selection() {
        let service = service(Arc::new(MemoryDraftRepository::new()));
        service.load().await;
        let a = service.active_draft_id().await.unwrap();
        let b = service.create_draft("Scenario B", None).await.unwrap();

        service.set_comparison_pair(&a, &b).await.unwrap();
        let report = service.selected_comparison().await.unwrap();
        assert_eq!(report.draft_a.id, a);
        assert_eq!(report.draft_b.id, b);

        service.clear_comparison_pair().await;
        assert!(service.selected_comparison().await.is_none());
    }
}
