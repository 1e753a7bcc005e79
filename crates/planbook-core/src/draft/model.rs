//! Draft domain model.
//!
//! A draft is one complete, independently switchable snapshot of
//! business-plan, financial, and vendor data. Drafts are the unit of
//! persistence and of scenario comparison.

use super::financial::FinancialData;
use super::plan::BusinessPlan;
use serde::{Deserialize, Serialize};

/// One complete scenario snapshot.
///
/// This is the "pure" domain model that business logic operates on,
/// independent of any specific storage format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// Unique draft identifier (UUID format), immutable after creation
    pub id: String,
    /// Human-readable draft name, non-empty after trimming
    pub name: String,
    /// Timestamp when the draft was created (ISO 8601 format), never changes
    pub created_at: String,
    /// Timestamp when the draft's content was last changed (ISO 8601 format)
    pub updated_at: String,
    /// The business-plan sections
    #[serde(default)]
    pub business_plan: BusinessPlan,
    /// The financial projection
    #[serde(default)]
    pub financial_data: FinancialData,
    /// Vendor directory, insertion order (order carries no meaning)
    #[serde(default)]
    pub vendors: Vec<Vendor>,
}

impl Draft {
    /// Creates a blank draft with a fresh id and timestamps.
    ///
    /// The caller is responsible for name validation; this constructor
    /// stores the name as given.
    pub fn new(name: impl Into<String>) -> Self {
        let now = now_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            created_at: now.clone(),
            updated_at: now,
            business_plan: BusinessPlan::default(),
            financial_data: FinancialData::default(),
            vendors: Vec::new(),
        }
    }

    /// Returns the lightweight metadata record for listings and the
    /// persisted index.
    pub fn summary(&self) -> DraftSummary {
        DraftSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            created_at: self.created_at.clone(),
            updated_at: self.updated_at.clone(),
        }
    }

    /// Refreshes `updated_at`. Called after every content mutation.
    pub(crate) fn touch(&mut self) {
        self.updated_at = now_rfc3339();
    }
}

/// Current UTC time as an RFC 3339 string, the timestamp format used
/// throughout the draft model.
pub(crate) fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Lightweight draft metadata for list rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSummary {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

/// The derived view of whichever draft is active.
///
/// The default view has every section present with empty values, so the
/// consuming UI never needs a null check before any draft is loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftView {
    pub business_plan: BusinessPlan,
    pub financial_data: FinancialData,
    pub vendors: Vec<Vendor>,
}

/// A supplier or service provider attached to a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    /// Unique vendor identifier (UUID format); may be empty for records
    /// imported from sources that never assigned one
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub company: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Free-form category label ("produce", "linens", ...)
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: VendorPriority,
    #[serde(default)]
    pub notes: String,
}

impl Vendor {
    /// Stable identity used for set-difference comparison between drafts:
    /// the vendor id when present, else name plus company.
    pub(crate) fn diff_key(&self) -> String {
        if self.id.is_empty() {
            format!("{}\u{1f}{}", self.name, self.company)
        } else {
            self.id.clone()
        }
    }
}

/// Vendor priority for ordering follow-ups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorPriority {
    Low,
    #[default]
    Medium,
    High,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_draft_has_fresh_id_and_matching_timestamps() {
        let draft = Draft::new("Default");
        assert!(!draft.id.is_empty());
        assert_eq!(draft.created_at, draft.updated_at);
        assert_eq!(draft.vendors.len(), 0);
    }

    #[test]
    fn test_new_drafts_have_unique_ids() {
        let a = Draft::new("A");
        let b = Draft::new("B");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_summary_mirrors_draft_metadata() {
        let draft = Draft::new("North End Italian Bistro");
        let summary = draft.summary();
        assert_eq!(summary.id, draft.id);
        assert_eq!(summary.name, "North End Italian Bistro");
        assert_eq!(summary.updated_at, draft.updated_at);
    }

    #[test]
    fn test_vendor_diff_key_prefers_id() {
        let vendor = Vendor {
            id: "v-1".to_string(),
            name: "Sal".to_string(),
            company: "Harbor Fish".to_string(),
            email: String::new(),
            phone: String::new(),
            category: String::new(),
            priority: VendorPriority::High,
            notes: String::new(),
        };
        assert_eq!(vendor.diff_key(), "v-1");

        let anonymous = Vendor {
            id: String::new(),
            ..vendor
        };
        assert!(anonymous.diff_key().contains("Sal"));
        assert!(anonymous.diff_key().contains("Harbor Fish"));
    }

    #[test]
    fn test_draft_serde_round_trip() {
        let mut draft = Draft::new("Serde");
        draft.financial_data.revenue.food_sales = 500_000.0;
        let json = serde_json::to_string(&draft).unwrap();
        let back: Draft = serde_json::from_str(&json).unwrap();
        assert_eq!(back, draft);
    }
}
