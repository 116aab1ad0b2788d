//! Contracts a connector plugin implements

use crate::cache::RepoCache;
use crate::repository::RepoCommon;
use crate::Result;
use std::collections::BTreeMap;

/// Key/value settings of one configured bridge
///
/// Keys and values are plugin-defined. Values are stored one per line, so
/// they never contain newlines.
pub type Configuration = BTreeMap<String, String>;

/// A connector: type identity, interactive configuration, optional capabilities
pub trait BridgeImpl {
    /// Type of the bridge (e.g. "github")
    fn bridge_type(&self) -> &'static str;

    /// Handle the user interaction and return the configuration to persist
    fn configure(&self, repo: &dyn RepoCommon) -> Result<Configuration>;

    /// Importer, if this bridge can pull issues from its remote
    fn importer(&self) -> Option<&dyn Importer> {
        None
    }

    /// Exporter, if this bridge can push issues to its remote
    fn exporter(&self) -> Option<&dyn Exporter> {
        None
    }
}

/// Pull issues from a remote system into the local cache
pub trait Importer {
    fn import_all(&self, cache: &mut RepoCache, conf: &Configuration) -> Result<()>;

    /// Import the single remote item identified by `id`
    fn import(&self, cache: &mut RepoCache, conf: &Configuration, id: &str) -> Result<()>;
}

/// Push local issues to a remote system
pub trait Exporter {
    fn export_all(&self, cache: &mut RepoCache, conf: &Configuration) -> Result<()>;

    /// Export the single local issue identified by `id`
    fn export(&self, cache: &mut RepoCache, conf: &Configuration, id: &str) -> Result<()>;
}
