//! TOML-based DraftRepository implementation
//!
//! This is the local on-device document store: the backing used when the
//! networked service is unavailable, and the default store for fully
//! offline deployments. Each draft is one TOML file under the owning
//! user's directory, with a metadata index alongside.

use crate::paths::PlanbookPaths;
use async_trait::async_trait;
use planbook_core::draft::{Draft, DraftRepository, DraftSummary};
use planbook_core::error::{PlanbookError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk form of the draft metadata index.
///
/// The index is a derived cache, rewritten wholesale from the in-memory
/// draft list; it is never read back to reconstruct drafts.
#[derive(Debug, Default, Serialize, Deserialize)]
struct DraftIndexFile {
    #[serde(default)]
    drafts: Vec<DraftSummary>,
}

/// A repository implementation for storing draft data in TOML files.
///
/// # Directory structure
///
/// ```text
/// base_dir/
/// └── users/
///     └── <user-id>/
///         ├── index.toml
///         └── drafts/
///             ├── <draft-id>.toml
///             └── <draft-id>.toml
/// ```
pub struct TomlDraftRepository {
    base_dir: PathBuf,
}

impl TomlDraftRepository {
    /// Creates a new `TomlDraftRepository` rooted at the specified base
    /// directory, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the base directory cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Creates a `TomlDraftRepository` at the platform default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be determined or
    /// created.
    pub fn default_location() -> Result<Self> {
        let data_dir =
            PlanbookPaths::data_dir().map_err(|e| PlanbookError::io(e.to_string()))?;
        Self::new(data_dir)
    }

    fn user_dir(&self, user_id: &str) -> PathBuf {
        self.base_dir.join("users").join(user_id)
    }

    fn drafts_dir(&self, user_id: &str) -> PathBuf {
        self.user_dir(user_id).join("drafts")
    }

    /// Returns the file path for a given draft ID.
    fn draft_file_path(&self, user_id: &str, draft_id: &str) -> PathBuf {
        self.drafts_dir(user_id).join(format!("{}.toml", draft_id))
    }

    fn index_file_path(&self, user_id: &str) -> PathBuf {
        self.user_dir(user_id).join("index.toml")
    }

    fn load_draft_from_path(path: &Path) -> Result<Draft> {
        let content = fs::read_to_string(path)?;
        let draft: Draft = toml::from_str(&content)?;
        Ok(draft)
    }
}

#[async_trait]
impl DraftRepository for TomlDraftRepository {
    async fn load_drafts(&self, user_id: &str) -> Result<Vec<Draft>> {
        let drafts_dir = self.drafts_dir(user_id);
        if !drafts_dir.exists() {
            // First run for this user.
            return Ok(Vec::new());
        }

        let mut drafts = Vec::new();
        for entry in fs::read_dir(&drafts_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("toml") {
                continue;
            }
            match Self::load_draft_from_path(&path) {
                Ok(draft) => drafts.push(draft),
                Err(err) => {
                    // One unreadable file must not take the whole user
                    // collection down with it.
                    tracing::warn!(path = %path.display(), error = %err, "skipping unreadable draft file");
                }
            }
        }

        // Directory iteration order is platform-dependent; creation order
        // is the list order the rest of the system expects.
        drafts.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(drafts)
    }

    async fn save_draft(&self, user_id: &str, draft: &Draft) -> Result<()> {
        let drafts_dir = self.drafts_dir(user_id);
        fs::create_dir_all(&drafts_dir)?;

        let content = toml::to_string_pretty(draft)?;
        fs::write(self.draft_file_path(user_id, &draft.id), content)?;
        tracing::debug!(draft_id = %draft.id, "draft written to local store");
        Ok(())
    }

    async fn save_index(&self, user_id: &str, summaries: &[DraftSummary]) -> Result<()> {
        let user_dir = self.user_dir(user_id);
        fs::create_dir_all(&user_dir)?;

        let index = DraftIndexFile {
            drafts: summaries.to_vec(),
        };
        let content = toml::to_string_pretty(&index)?;
        fs::write(self.index_file_path(user_id), content)?;
        Ok(())
    }

    async fn delete_draft(&self, user_id: &str, draft_id: &str) -> Result<()> {
        match fs::remove_file(self.draft_file_path(user_id, draft_id)) {
            Ok(()) => Ok(()),
            // Deleting an absent draft is not an error.
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
