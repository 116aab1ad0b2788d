//! In-memory repository
//!
//! Mirrors the listing format of `git config --get-regexp` so the bridge
//! layer behaves identically against it. Useful for tests and for embedders
//! that keep settings elsewhere.

use super::RepoCommon;
use crate::{BridgeError, Result};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Repository whose settings live in a map
#[derive(Debug, Default)]
pub struct MemoryRepo {
    path: PathBuf,
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryRepo {
    /// Create an empty repository rooted at `path`
    ///
    /// `path` is only used by collaborators that keep files in the
    /// repository, such as the issue cache.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: RefCell::new(BTreeMap::new()),
        }
    }

    /// Snapshot of every stored key and value
    pub fn entries(&self) -> BTreeMap<String, String> {
        self.entries.borrow().clone()
    }
}

impl RepoCommon for MemoryRepo {
    fn path(&self) -> &Path {
        &self.path
    }

    fn set_config_value(&self, key: &str, value: &str) -> Result<()> {
        if !key.contains('.') {
            return Err(BridgeError::ConfigWriteFailure(format!(
                "error: key does not contain a section: {}",
                key
            )));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn read_config_section(&self, prefix: &str) -> Result<String> {
        let section = format!("{}.", prefix);
        let listing = self
            .entries
            .borrow()
            .iter()
            .filter(|(key, _)| key.starts_with(&section))
            .map(|(key, value)| {
                if value.is_empty() {
                    format!("{}\n", key)
                } else {
                    format!("{} {}\n", key, value)
                }
            })
            .collect();
        Ok(listing)
    }

    fn remove_config_section(&self, prefix: &str) -> Result<()> {
        let section = format!("{}.", prefix);
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(&section));

        if entries.len() == before {
            return Err(BridgeError::ConfigWriteFailure(format!(
                "fatal: no such section: {}",
                prefix
            )));
        }
        Ok(())
    }
}
