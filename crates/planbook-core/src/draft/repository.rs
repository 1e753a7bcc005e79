//! Draft repository trait.
//!
//! Defines the interface for draft persistence operations.

use super::model::{Draft, DraftSummary};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for managing draft persistence.
///
/// This trait defines the contract for persisting and retrieving drafts,
/// decoupling the draft store from the specific backing mechanism (a
/// networked document database, local files, or an in-memory map). The
/// caller must be unaware of which backing store is in effect.
///
/// Writes are idempotent "put latest state" upserts keyed by draft id:
/// two writes for the same draft issued in quick succession may complete
/// out of order, and the store must end up holding whichever snapshot
/// arrived last. The durable copy is never the source of truth for a
/// running session.
///
/// Drafts are scoped per user; the application-id scope is fixed when the
/// repository is constructed.
#[async_trait]
pub trait DraftRepository: Send + Sync {
    /// Loads every stored draft for a user.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Draft>)`: all stored drafts, empty for a new user
    /// - `Err(_)`: error occurred during loading
    async fn load_drafts(&self, user_id: &str) -> Result<Vec<Draft>>;

    /// Saves one draft, replacing any stored copy with the same id.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: draft saved successfully
    /// - `Err(_)`: error occurred during save
    async fn save_draft(&self, user_id: &str, draft: &Draft) -> Result<()>;

    /// Saves the lightweight metadata index used for fast listing.
    ///
    /// The index is a derived cache rebuilt from the in-memory draft list
    /// on every save; it is never read back as a source of truth.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: index saved successfully
    /// - `Err(_)`: error occurred during save
    async fn save_index(&self, user_id: &str, summaries: &[DraftSummary]) -> Result<()>;

    /// Deletes a draft's durable copy.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: draft deleted successfully (or didn't exist)
    /// - `Err(_)`: error occurred during deletion
    async fn delete_draft(&self, user_id: &str, draft_id: &str) -> Result<()>;
}
