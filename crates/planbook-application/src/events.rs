//! Persistence outcome events.
//!
//! Scheduled writes never fail synchronously; their outcomes arrive on a
//! broadcast channel so the UI can show a non-blocking save indicator
//! without losing the user's in-memory edit.

use serde::{Deserialize, Serialize};

/// Outcome of one scheduled persistence operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PersistenceEvent {
    /// A draft snapshot reached the document store.
    Saved { draft_id: String },
    /// A scheduled draft write failed; the in-memory edit is preserved.
    SaveFailed { draft_id: String, message: String },
    /// The metadata index write failed. The index is a derived cache, so
    /// this is cosmetic until the next successful save.
    IndexSaveFailed { message: String },
    /// A draft's durable copy was removed.
    Deleted { draft_id: String },
    /// A scheduled delete failed; the stale copy lingers in the store.
    DeleteFailed { draft_id: String, message: String },
    /// The startup load failed and the service bootstrapped a blank
    /// default draft instead.
    LoadFailed { message: String },
}
