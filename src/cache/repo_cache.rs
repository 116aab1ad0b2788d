//! Repository issue cache
//!
//! Loads every issue of a repository once, and appends new ones to
//! `<repo>/.beadbridge/issues.jsonl` as they are created.

use super::issue::{Issue, Status};
use super::jsonl;
use crate::repository::RepoCommon;
use crate::{BridgeError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Directory, relative to the repository root, holding cache files
pub const CACHE_DIR: &str = ".beadbridge";

const ISSUES_FILE: &str = "issues.jsonl";

/// Issues of one repository plus the repository handle they belong to
pub struct RepoCache {
    repo: Box<dyn RepoCommon>,
    issues_path: PathBuf,
    issues: Vec<Issue>,
}

impl RepoCache {
    /// Open the cache of `repo`, reading any issues already stored
    pub fn open(repo: Box<dyn RepoCommon>) -> Result<Self> {
        let issues_path = repo.path().join(CACHE_DIR).join(ISSUES_FILE);
        let issues = jsonl::read_issues(&issues_path)?;

        tracing::debug!(
            path = %issues_path.display(),
            issues = issues.len(),
            "Opened repository cache"
        );

        Ok(Self {
            repo,
            issues_path,
            issues,
        })
    }

    /// The repository this cache belongs to
    pub fn repo(&self) -> &dyn RepoCommon {
        self.repo.as_ref()
    }

    /// Location of the issues file
    pub fn issues_path(&self) -> &Path {
        &self.issues_path
    }

    /// All issues, in creation order
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Create and persist a new issue
    pub fn new_issue(&mut self, title: &str, message: &str) -> Result<&Issue> {
        self.new_issue_with_metadata(title, message, BTreeMap::new())
    }

    /// Create and persist a new open issue carrying connector metadata
    pub fn new_issue_with_metadata(
        &mut self,
        title: &str,
        message: &str,
        metadata: BTreeMap<String, String>,
    ) -> Result<&Issue> {
        self.new_issue_with_status(title, message, Status::Open, metadata)
    }

    /// Create and persist a new issue in a given state, as imported from a remote
    pub fn new_issue_with_status(
        &mut self,
        title: &str,
        message: &str,
        status: Status,
        metadata: BTreeMap<String, String>,
    ) -> Result<&Issue> {
        let title = title.trim();
        if title.is_empty() {
            return Err(BridgeError::EmptyTitle);
        }

        let mut issue = Issue::new(title, message.trim());
        issue.status = status;
        issue.metadata = metadata;
        jsonl::append_issue(&self.issues_path, &issue)?;

        tracing::info!(id = %issue.id, title = %issue.title, "Created issue");

        let index = self.issues.len();
        self.issues.push(issue);
        Ok(&self.issues[index])
    }

    /// First issue whose metadata has `key` set to `value`
    pub fn find_by_metadata(&self, key: &str, value: &str) -> Option<&Issue> {
        self.issues
            .iter()
            .find(|issue| issue.metadata.get(key).map(String::as_str) == Some(value))
    }
}
