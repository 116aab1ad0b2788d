//! Git-backed repository

use super::RepoCommon;
use crate::{BridgeError, Result};
use gitconfig::GitConfig;
use std::path::{Path, PathBuf};

/// A repository on disk whose settings are read and written with `git config`
#[derive(Debug, Clone)]
pub struct GitRepo {
    /// Working tree root (or the git dir for bare repositories)
    path: PathBuf,

    /// `git config` runner bound to `path`
    config: GitConfig,
}

impl GitRepo {
    /// Discover the repository containing `path`
    pub fn discover(path: impl AsRef<Path>) -> Result<Self> {
        let repo = git2::Repository::discover(path.as_ref())?;
        let root = repo
            .workdir()
            .unwrap_or_else(|| repo.path())
            .to_path_buf();

        tracing::debug!(path = %root.display(), bare = repo.is_bare(), "Opened git repository");

        Ok(Self {
            config: GitConfig::with_workdir(&root),
            path: root,
        })
    }
}

impl RepoCommon for GitRepo {
    fn path(&self) -> &Path {
        &self.path
    }

    fn set_config_value(&self, key: &str, value: &str) -> Result<()> {
        tracing::trace!(key, "git config --replace-all");
        self.config
            .replace_all(key, value)
            .map_err(|e| BridgeError::ConfigWriteFailure(diagnostic(e)))
    }

    fn read_config_section(&self, prefix: &str) -> Result<String> {
        let pattern = section_pattern(prefix);
        tracing::trace!(pattern = %pattern, "git config --get-regexp");
        self.config
            .get_regexp(&pattern)
            .map_err(|e| BridgeError::ConfigReadFailure(diagnostic(e)))
    }

    fn remove_config_section(&self, prefix: &str) -> Result<()> {
        tracing::trace!(prefix, "git config --remove-section");
        self.config
            .remove_section(prefix)
            .map_err(|e| BridgeError::ConfigWriteFailure(diagnostic(e)))
    }
}

/// Anchored POSIX extended regexp matching keys strictly below `prefix`
fn section_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 4);
    pattern.push('^');
    for c in prefix.chars() {
        if ERE_SPECIAL.contains(c) {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push_str("\\.");
    pattern
}

const ERE_SPECIAL: &str = ".[]()*+?{}|^$\\";

/// Prefer git's own output over the wrapper's message
fn diagnostic(err: gitconfig::Error) -> String {
    match err {
        gitconfig::Error::CommandFailed(output) => output.trim().to_string(),
        other => other.to_string(),
    }
}
