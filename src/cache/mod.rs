//! Local issue cache
//!
//! The handle bridges import into and export from. Issues are stored as
//! JSONL inside the repository.

mod issue;
mod jsonl;
mod repo_cache;

pub use issue::{Issue, IssueId, Status, HUMAN_ID_LEN};
pub use repo_cache::{RepoCache, CACHE_DIR};
