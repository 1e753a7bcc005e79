//! Infrastructure layer for Planbook.
//!
//! Document-store adapter implementations for the `DraftRepository`
//! contract defined in `planbook-core`, plus platform path resolution.

pub mod fallback_draft_repository;
pub mod memory_draft_repository;
pub mod paths;
pub mod toml_draft_repository;

pub use fallback_draft_repository::FallbackDraftRepository;
pub use memory_draft_repository::MemoryDraftRepository;
pub use paths::PlanbookPaths;
pub use toml_draft_repository::TomlDraftRepository;
