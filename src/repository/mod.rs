//! Host repository access
//!
//! The bridge layer only needs a repository's location and its key/value
//! settings. [`RepoCommon`] is that seam: [`GitRepo`] runs `git config` in a
//! real repository, [`MemoryRepo`] keeps settings in memory with the same
//! listing format.

mod git;
mod memory;

pub use git::GitRepo;
pub use memory::MemoryRepo;

use crate::Result;
use std::path::Path;

/// Operations every repository backend provides
pub trait RepoCommon {
    /// Root directory of the repository
    fn path(&self) -> &Path;

    /// Replace every value of `key` with `value`
    ///
    /// Fails with [`crate::BridgeError::ConfigWriteFailure`] carrying the
    /// backend's diagnostic output.
    fn set_config_value(&self, key: &str, value: &str) -> Result<()>;

    /// List every key under `prefix.` as `key value` lines
    ///
    /// Keys are reported in full. A prefix with no keys yields an empty string.
    fn read_config_section(&self, prefix: &str) -> Result<String>;

    /// Remove every key under `prefix.`
    fn remove_config_section(&self, prefix: &str) -> Result<()>;
}
