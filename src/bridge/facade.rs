//! Bridge facade
//!
//! A [`Bridge`] wraps a [`BridgeImpl`] with the utility code every connector
//! shares: configuration persistence, a per-instance configuration cache and
//! capability dispatch.

use super::interfaces::{BridgeImpl, Configuration};
use super::store;
use crate::cache::RepoCache;
use crate::config::DEFAULT_NAMESPACE_ROOT;
use crate::repository::RepoCommon;
use crate::{BridgeError, Result};

/// A named instance of a connector
///
/// Built per command invocation; only its configuration is durable. The
/// configuration cache belongs to this value, so operations take `&mut self`
/// and a `Bridge` must not be shared between threads.
pub struct Bridge {
    /// Instance name, disambiguating bridges of the same type
    pub name: String,
    imp: Box<dyn BridgeImpl>,
    conf: Option<Configuration>,
    namespace_root: String,
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("type", &self.imp.bridge_type())
            .field("name", &self.name)
            .field("conf_loaded", &self.conf.is_some())
            .field("namespace_root", &self.namespace_root)
            .finish()
    }
}

impl Bridge {
    /// Wrap `imp` under instance `name`
    pub fn new(name: impl Into<String>, imp: Box<dyn BridgeImpl>) -> Self {
        Self {
            name: name.into(),
            imp,
            conf: None,
            namespace_root: DEFAULT_NAMESPACE_ROOT.to_string(),
        }
    }

    /// Store configuration under a different root section
    pub fn with_namespace_root(mut self, root: impl Into<String>) -> Self {
        self.namespace_root = root.into();
        self.conf = None;
        self
    }

    /// Type of the wrapped connector
    pub fn bridge_type(&self) -> &'static str {
        self.imp.bridge_type()
    }

    /// Config namespace of this bridge: `<root>.<type>.<name>`
    pub fn namespace(&self) -> String {
        store::namespace(&self.namespace_root, self.imp.bridge_type(), &self.name)
    }

    /// Run the connector's interactive configuration and persist the result
    pub fn configure(&mut self, repo: &dyn RepoCommon) -> Result<()> {
        tracing::info!(bridge_type = self.bridge_type(), name = %self.name, "Configuring bridge");

        let conf = self.imp.configure(repo)?;
        store::store(repo, &self.namespace(), &conf)?;

        self.conf = None;
        Ok(())
    }

    /// Configuration of this bridge, loaded on first use
    pub fn config(&mut self, repo: &dyn RepoCommon) -> Result<&Configuration> {
        let namespace = self.namespace();
        cached_config(&mut self.conf, repo, &namespace)
    }

    /// Delete the persisted configuration of this bridge
    pub fn remove(&mut self, repo: &dyn RepoCommon) -> Result<()> {
        store::remove(repo, &self.namespace())?;
        self.conf = None;
        Ok(())
    }

    /// Import everything the remote has
    pub fn import_all(&mut self, cache: &mut RepoCache) -> Result<()> {
        let importer = self.imp.importer().ok_or(BridgeError::ImportNotSupported)?;
        let namespace = store::namespace(&self.namespace_root, self.imp.bridge_type(), &self.name);
        let conf = cached_config(&mut self.conf, cache.repo(), &namespace)?;

        tracing::debug!(namespace = %namespace, "Importing all");
        importer.import_all(cache, conf)
    }

    /// Import the remote item `id`
    pub fn import(&mut self, cache: &mut RepoCache, id: &str) -> Result<()> {
        let importer = self.imp.importer().ok_or(BridgeError::ImportNotSupported)?;
        let namespace = store::namespace(&self.namespace_root, self.imp.bridge_type(), &self.name);
        let conf = cached_config(&mut self.conf, cache.repo(), &namespace)?;

        tracing::debug!(namespace = %namespace, id, "Importing");
        importer.import(cache, conf, id)
    }

    /// Export every local issue
    pub fn export_all(&mut self, cache: &mut RepoCache) -> Result<()> {
        let exporter = self.imp.exporter().ok_or(BridgeError::ExportNotSupported)?;
        let namespace = store::namespace(&self.namespace_root, self.imp.bridge_type(), &self.name);
        let conf = cached_config(&mut self.conf, cache.repo(), &namespace)?;

        tracing::debug!(namespace = %namespace, "Exporting all");
        exporter.export_all(cache, conf)
    }

    /// Export the local issue `id`
    pub fn export(&mut self, cache: &mut RepoCache, id: &str) -> Result<()> {
        let exporter = self.imp.exporter().ok_or(BridgeError::ExportNotSupported)?;
        let namespace = store::namespace(&self.namespace_root, self.imp.bridge_type(), &self.name);
        let conf = cached_config(&mut self.conf, cache.repo(), &namespace)?;

        tracing::debug!(namespace = %namespace, id, "Exporting");
        exporter.export(cache, conf, id)
    }
}

/// Return the cached configuration, loading it into `slot` when empty
///
/// Takes the cache slot rather than `&mut Bridge` so callers can keep a
/// borrow of the connector alive at the same time.
fn cached_config<'a>(
    slot: &'a mut Option<Configuration>,
    repo: &dyn RepoCommon,
    namespace: &str,
) -> Result<&'a Configuration> {
    let conf = match slot.take() {
        Some(conf) => conf,
        None => store::load(repo, namespace)?,
    };
    Ok(slot.insert(conf))
}
