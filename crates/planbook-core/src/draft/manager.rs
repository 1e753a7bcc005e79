use super::financial::FinancialPatch;
use super::model::{Draft, DraftSummary, DraftView, Vendor};
use super::plan::BusinessPlanPatch;
use crate::compare::{self, ComparisonReport};
use crate::error::{PlanbookError, Result};

/// The authoritative in-memory draft list and active-draft pointer.
///
/// `DraftManager` is responsible for:
/// - Creating, duplicating, renaming, and deleting drafts
/// - Tracking which draft is active and deriving its view
/// - Applying section patches to the active draft
/// - Tracking the comparison pair and producing comparison reports
///
/// All operations are synchronous against in-memory state; persistence is
/// the caller's concern. Mutators that change durable content return a
/// snapshot of the updated draft so the caller can write it through.
///
/// # Invariants
///
/// - Draft ids are unique within the list.
/// - Exactly one draft is active whenever the list is non-empty; none when
///   the list is empty.
/// - Deleting can never empty a non-empty list ([`PlanbookError::LastDraft`]).
///   When the active draft is deleted, the first remaining draft in list
///   order becomes active.
#[derive(Debug, Default)]
pub struct DraftManager {
    drafts: Vec<Draft>,
    active_id: Option<String>,
    comparison: Option<(String, String)>,
}

impl DraftManager {
    /// Creates an empty manager with no drafts loaded.
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================================================
    // Read API
    // ============================================================================

    /// Lists draft metadata in list order. Never fails; empty when no
    /// drafts are loaded.
    pub fn list_drafts(&self) -> Vec<DraftSummary> {
        self.drafts.iter().map(Draft::summary).collect()
    }

    /// Returns the id of the active draft, if any.
    pub fn active_draft_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    /// Returns a draft by id.
    pub fn get(&self, draft_id: &str) -> Option<&Draft> {
        self.drafts.iter().find(|d| d.id == draft_id)
    }

    /// Derives the current view from the active draft.
    ///
    /// When no draft is active this returns [`DraftView::default`], with
    /// every section present and empty, so the UI can render immediately.
    pub fn current_view(&self) -> DraftView {
        match self.active_draft() {
            Some(draft) => DraftView {
                business_plan: draft.business_plan.clone(),
                financial_data: draft.financial_data.clone(),
                vendors: draft.vendors.clone(),
            },
            None => DraftView::default(),
        }
    }

    /// Returns the ids selected for comparison, if a pair is set.
    pub fn comparison_pair(&self) -> Option<(&str, &str)> {
        self.comparison
            .as_ref()
            .map(|(a, b)| (a.as_str(), b.as_str()))
    }

    // ============================================================================
    // Lifecycle
    // ============================================================================

    /// Bulk-loads a draft list, as supplied by the persistence layer at
    /// startup.
    ///
    /// The previously active id is kept if it still exists in the new
    /// list; otherwise the first draft (if any) becomes active. A stale
    /// comparison pair is cleared.
    pub fn replace_all(&mut self, drafts: Vec<Draft>) {
        self.drafts = drafts;
        let still_present = self
            .active_id
            .as_deref()
            .is_some_and(|id| self.get(id).is_some());
        if !still_present {
            self.active_id = self.drafts.first().map(|d| d.id.clone());
        }
        let pair_is_stale = self
            .comparison
            .as_ref()
            .is_some_and(|(a, b)| self.get(a).is_none() || self.get(b).is_none());
        if pair_is_stale {
            self.comparison = None;
        }
    }

    /// Creates a new draft and makes it active.
    ///
    /// With `base` given, the new draft deep-copies that draft's business
    /// plan, financials, and vendors; otherwise it starts blank. Naming
    /// policy stays at the call site: the caller must supply a fallback
    /// name (e.g. "Draft 2") rather than relying on this method to invent
    /// one.
    ///
    /// # Errors
    ///
    /// - [`PlanbookError::InvalidName`]: `name` is empty after trimming
    /// - [`PlanbookError::NotFound`]: `base` does not match any draft
    pub fn create_draft(&mut self, name: &str, base: Option<&str>) -> Result<String> {
        let id = self.insert_copy(name, base)?;
        self.active_id = Some(id.clone());
        Ok(id)
    }

    /// Creates a copy of `source_id` under a new name, without changing
    /// which draft is active. Duplicating is a background copy, not a
    /// navigation.
    ///
    /// # Errors
    ///
    /// - [`PlanbookError::InvalidName`]: `new_name` is empty after trimming
    /// - [`PlanbookError::NotFound`]: `source_id` does not match any draft
    pub fn duplicate_draft(&mut self, source_id: &str, new_name: &str) -> Result<String> {
        self.insert_copy(new_name, Some(source_id))
    }

    /// Deletes a draft.
    ///
    /// If the deleted draft was active, the first remaining draft in list
    /// order becomes active. A comparison pair referencing the deleted
    /// draft is cleared.
    ///
    /// # Errors
    ///
    /// - [`PlanbookError::NotFound`]: `draft_id` does not match any draft
    /// - [`PlanbookError::LastDraft`]: `draft_id` is the only remaining draft
    pub fn delete_draft(&mut self, draft_id: &str) -> Result<()> {
        let index = self
            .drafts
            .iter()
            .position(|d| d.id == draft_id)
            .ok_or_else(|| PlanbookError::not_found("Draft", draft_id))?;
        if self.drafts.len() == 1 {
            return Err(PlanbookError::LastDraft);
        }

        self.drafts.remove(index);

        if self.active_id.as_deref() == Some(draft_id) {
            // List is non-empty here, so promotion always succeeds.
            self.active_id = self.drafts.first().map(|d| d.id.clone());
        }
        if self
            .comparison
            .as_ref()
            .is_some_and(|(a, b)| a == draft_id || b == draft_id)
        {
            self.comparison = None;
        }
        Ok(())
    }

    /// Renames a draft and refreshes its `updated_at`.
    ///
    /// # Errors
    ///
    /// - [`PlanbookError::NotFound`]: `draft_id` does not match any draft
    /// - [`PlanbookError::InvalidName`]: `new_name` is empty after trimming
    pub fn rename_draft(&mut self, draft_id: &str, new_name: &str) -> Result<()> {
        let name = validated_name(new_name)?;
        let draft = self
            .drafts
            .iter_mut()
            .find(|d| d.id == draft_id)
            .ok_or_else(|| PlanbookError::not_found("Draft", draft_id))?;
        draft.name = name;
        draft.touch();
        Ok(())
    }

    /// Switches the active draft. The derived view updates atomically
    /// with the pointer; there is no intermediate state a reader can
    /// observe.
    ///
    /// # Errors
    ///
    /// - [`PlanbookError::NotFound`]: `draft_id` does not match any draft
    pub fn set_active(&mut self, draft_id: &str) -> Result<()> {
        if self.get(draft_id).is_none() {
            return Err(PlanbookError::not_found("Draft", draft_id));
        }
        self.active_id = Some(draft_id.to_string());
        Ok(())
    }

    // ============================================================================
    // Active-draft content mutations
    // ============================================================================
    //
    // Each returns a snapshot of the updated draft for write-through, or
    // `None` when no draft is active. The no-active case is a tolerated
    // no-op (a UI wiring bug, not a user-facing error); the caller logs it.

    /// Applies a business-plan section patch to the active draft.
    pub fn update_business_plan(&mut self, patch: BusinessPlanPatch) -> Option<Draft> {
        self.mutate_active(|draft| patch.apply(&mut draft.business_plan))
    }

    /// Applies a financial category patch to the active draft.
    pub fn update_financials(&mut self, patch: FinancialPatch) -> Option<Draft> {
        self.mutate_active(|draft| patch.apply(&mut draft.financial_data))
    }

    /// Replaces the active draft's vendor list wholesale.
    pub fn set_vendors(&mut self, vendors: Vec<Vendor>) -> Option<Draft> {
        self.mutate_active(|draft| draft.vendors = vendors)
    }

    /// Appends a vendor to the active draft.
    pub fn add_vendor(&mut self, vendor: Vendor) -> Option<Draft> {
        self.mutate_active(|draft| draft.vendors.push(vendor))
    }

    /// Removes a vendor from the active draft by vendor id.
    pub fn remove_vendor(&mut self, vendor_id: &str) -> Option<Draft> {
        self.mutate_active(|draft| draft.vendors.retain(|v| v.id != vendor_id))
    }

    /// The single place that mutates the active draft: applies `mutate`,
    /// refreshes `updated_at`, and returns a snapshot for persistence.
    fn mutate_active(&mut self, mutate: impl FnOnce(&mut Draft)) -> Option<Draft> {
        let id = self.active_id.clone()?;
        let draft = self.drafts.iter_mut().find(|d| d.id == id)?;
        mutate(draft);
        draft.touch();
        Some(draft.clone())
    }

    // ============================================================================
    // Comparison
    // ============================================================================

    /// Records which two drafts are selected for comparison.
    ///
    /// # Errors
    ///
    /// - [`PlanbookError::NotFound`]: either id does not match any draft
    pub fn set_comparison_pair(&mut self, id_a: &str, id_b: &str) -> Result<()> {
        for id in [id_a, id_b] {
            if self.get(id).is_none() {
                return Err(PlanbookError::not_found("Draft", id));
            }
        }
        self.comparison = Some((id_a.to_string(), id_b.to_string()));
        Ok(())
    }

    /// Clears the comparison selection.
    pub fn clear_comparison_pair(&mut self) {
        self.comparison = None;
    }

    /// Produces a side-by-side comparison report for two drafts.
    ///
    /// # Errors
    ///
    /// - [`PlanbookError::NotFound`]: either id does not match any draft
    pub fn compare_drafts(&self, id_a: &str, id_b: &str) -> Result<ComparisonReport> {
        let a = self
            .get(id_a)
            .ok_or_else(|| PlanbookError::not_found("Draft", id_a))?;
        let b = self
            .get(id_b)
            .ok_or_else(|| PlanbookError::not_found("Draft", id_b))?;
        Ok(compare::compare(a, b))
    }

    /// Compares the currently selected pair, if one is set.
    pub fn selected_comparison(&self) -> Option<ComparisonReport> {
        let (a, b) = self.comparison_pair()?;
        // The pair is validated on set and cleared on delete, so both
        // lookups succeed.
        self.compare_drafts(a, b).ok()
    }

    fn active_draft(&self) -> Option<&Draft> {
        let id = self.active_id.as_deref()?;
        self.drafts.iter().find(|d| d.id == id)
    }

    fn insert_copy(&mut self, name: &str, base: Option<&str>) -> Result<String> {
        let name = validated_name(name)?;
        let mut draft = Draft::new(name);
        if let Some(base_id) = base {
            let source = self
                .get(base_id)
                .ok_or_else(|| PlanbookError::not_found("Draft", base_id))?;
            draft.business_plan = source.business_plan.clone();
            draft.financial_data = source.financial_data.clone();
            draft.vendors = source.vendors.clone();
        }
        let id = draft.id.clone();
        self.drafts.push(draft);
        Ok(id)
    }
}

fn validated_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PlanbookError::invalid_name(name));
    }
    Ok(trimmed.to_string())
}
