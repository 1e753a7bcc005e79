//! Unified path management for Planbook's on-device storage.
//!
//! The local document store keeps one directory per user under the
//! platform data directory. All path decisions live here so the
//! repository implementations stay free of platform knowledge.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform data directory could not be determined.
    DataDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::DataDirNotFound => write!(f, "Cannot find platform data directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for Planbook.
///
/// # Directory Structure
///
/// ```text
/// <data>/planbook/                 # e.g. ~/.local/share/planbook on Linux
/// └── users/
///     └── <user-id>/
///         ├── index.toml           # draft metadata index (derived cache)
///         └── drafts/
///             ├── <draft-id>.toml
///             └── ...
/// ```
pub struct PlanbookPaths;

impl PlanbookPaths {
    /// Returns the Planbook data directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to the data directory (e.g., `~/.local/share/planbook/`)
    /// - `Err(PathError::DataDirNotFound)`: Could not determine directory
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join("planbook"))
            .ok_or(PathError::DataDirNotFound)
    }

    /// Returns the directory holding all per-user stores.
    pub fn users_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("users"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_dir() {
        let data_dir = PlanbookPaths::data_dir().unwrap();
        assert!(data_dir.ends_with("planbook"));
    }

    #[test]
    fn test_users_dir() {
        let users_dir = PlanbookPaths::users_dir().unwrap();
        assert!(users_dir.ends_with("users"));
        let data_dir = PlanbookPaths::data_dir().unwrap();
        assert!(users_dir.starts_with(&data_dir));
    }
}
