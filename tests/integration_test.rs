//! Integration tests for beadbridge
//!
//! These tests drive the bridge layer end to end: registry lookup,
//! configuration persistence and dispatch into the issue cache.

use beadbridge::actions::{self, AddOptions};
use beadbridge::bridge::{store, BridgeImpl, Configuration, Exporter, Importer, Registry};
use beadbridge::cache::RepoCache;
use beadbridge::input::IssueEditor;
use beadbridge::repository::{GitRepo, MemoryRepo, RepoCommon};
use beadbridge::BridgeError;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

type Seen = Arc<Mutex<Vec<Configuration>>>;

/// Connector that configures a fixed token and records what its exporter sees
struct Stub {
    seen: Seen,
}

impl BridgeImpl for Stub {
    fn bridge_type(&self) -> &'static str {
        "stub"
    }

    fn configure(&self, _repo: &dyn RepoCommon) -> beadbridge::Result<Configuration> {
        Ok(conf(&[("token", "abc")]))
    }

    fn exporter(&self) -> Option<&dyn Exporter> {
        Some(self)
    }
}

impl Exporter for Stub {
    fn export_all(&self, _cache: &mut RepoCache, conf: &Configuration) -> beadbridge::Result<()> {
        self.seen.lock().unwrap().push(conf.clone());
        Ok(())
    }

    fn export(&self, _cache: &mut RepoCache, conf: &Configuration, _id: &str) -> beadbridge::Result<()> {
        self.seen.lock().unwrap().push(conf.clone());
        Ok(())
    }
}

/// Connector that imports a single issue per call
struct Feed;

impl BridgeImpl for Feed {
    fn bridge_type(&self) -> &'static str {
        "feed"
    }

    fn configure(&self, _repo: &dyn RepoCommon) -> beadbridge::Result<Configuration> {
        Ok(conf(&[("url", "https://feed.example")]))
    }

    fn importer(&self) -> Option<&dyn Importer> {
        Some(self)
    }
}

impl Importer for Feed {
    fn import_all(&self, cache: &mut RepoCache, conf: &Configuration) -> beadbridge::Result<()> {
        self.import(cache, conf, "1")
    }

    fn import(&self, cache: &mut RepoCache, conf: &Configuration, id: &str) -> beadbridge::Result<()> {
        let origin = conf.get("url").cloned().unwrap_or_default();
        let metadata = [("origin".to_string(), origin), ("feed-id".to_string(), id.to_string())]
            .into_iter()
            .collect();
        cache.new_issue_with_metadata(&format!("Remote {}", id), "imported", metadata)?;
        Ok(())
    }
}

fn conf(pairs: &[(&str, &str)]) -> Configuration {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn test_registry(seen: &Seen) -> Registry {
    let mut registry = Registry::new();
    let seen = seen.clone();
    registry.register("stub", move || Box::new(Stub { seen: seen.clone() }));
    registry.register("feed", || Box::new(Feed));
    registry
}

fn memory_cache(dir: &TempDir) -> RepoCache {
    RepoCache::open(Box::new(MemoryRepo::new(dir.path()))).unwrap()
}

mod registry_tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_types() {
        let seen = Seen::default();
        let registry = test_registry(&seen);

        assert_eq!(registry.types(), vec!["feed", "stub"]);
        assert_eq!(registry.load_bridge("stub", "a").unwrap().bridge_type(), "stub");

        match registry.load_bridge("jira", "a") {
            Err(BridgeError::UnknownBridgeType(t)) => assert_eq!(t, "jira"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    /// Connector reporting the given type and configuring a fixed token
    struct Typed(&'static str);

    impl BridgeImpl for Typed {
        fn bridge_type(&self) -> &'static str {
            self.0
        }

        fn configure(&self, _repo: &dyn RepoCommon) -> beadbridge::Result<Configuration> {
            Ok(conf(&[("token", "secret")]))
        }
    }

    #[test]
    fn test_reported_type_cannot_shadow_another_namespace() {
        let dir = TempDir::new().unwrap();
        let cache = memory_cache(&dir);
        let mut registry = Registry::new();
        registry.register("ab", || Box::new(Typed("a.b")));
        registry.register("a", || Box::new(Typed("a")));

        // Would have written under beadbridge.a.b.x.*
        assert!(matches!(
            registry.load_bridge("ab", "x"),
            Err(BridgeError::InvalidBridgeName(t)) if t == "a.b"
        ));

        let mut plain = registry.load_bridge("a", "b").unwrap();
        assert!(plain.config(cache.repo()).unwrap().is_empty());
    }

    #[test]
    fn test_builtin_registry() {
        let registry = Registry::with_builtin();
        assert!(registry.types().contains(&"github"));
    }
}

mod config_store_tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let repo = MemoryRepo::new("/tmp/unused");
        let ns = store::namespace("beadbridge", "stub", "a");
        let c = conf(&[("token", "abc"), ("user", "octo")]);

        store::store(&repo, &ns, &c).unwrap();
        assert_eq!(store::load(&repo, &ns).unwrap(), c);
    }

    #[test]
    fn test_namespace_isolation() {
        let repo = MemoryRepo::new("/tmp/unused");
        let ta = store::namespace("beadbridge", "t", "a");
        let tb = store::namespace("beadbridge", "t", "b");
        let ua = store::namespace("beadbridge", "u", "a");

        store::store(&repo, &ta, &conf(&[("k", "1")])).unwrap();
        store::store(&repo, &tb, &conf(&[("k", "2")])).unwrap();
        store::store(&repo, &ua, &conf(&[("k", "3")])).unwrap();

        assert_eq!(store::load(&repo, &ta).unwrap(), conf(&[("k", "1")]));
        assert_eq!(store::load(&repo, &tb).unwrap(), conf(&[("k", "2")]));
        assert_eq!(store::load(&repo, &ua).unwrap(), conf(&[("k", "3")]));
    }

    #[test]
    fn test_malformed_line_is_reported() {
        let repo = MemoryRepo::new("/tmp/unused");
        repo.set_config_value("beadbridge.stub.a.token", "").unwrap();

        let ns = store::namespace("beadbridge", "stub", "a");
        assert!(matches!(
            store::load(&repo, &ns),
            Err(BridgeError::MalformedConfigLine(_))
        ));
    }

    #[test]
    fn test_git_backed_roundtrip() {
        let dir = TempDir::new().unwrap();
        if git2::Repository::init(dir.path()).is_err() {
            return;
        }
        let repo = match GitRepo::discover(dir.path()) {
            Ok(repo) => repo,
            Err(_) => return,
        };
        let ns = store::namespace("beadbridge", "stub", "a");
        let c = conf(&[("api-url", "https://api.example"), ("token", "abc")]);

        // Skip when no git binary is available to run `git config`
        if store::store(&repo, &ns, &c).is_err() {
            return;
        }
        assert_eq!(store::load(&repo, &ns).unwrap(), c);

        store::remove(&repo, &ns).unwrap();
        assert!(store::load(&repo, &ns).unwrap().is_empty());
    }
}

mod bridge_tests {
    use super::*;

    #[test]
    fn test_configure_then_export_from_fresh_instance() {
        let dir = TempDir::new().unwrap();
        let seen = Seen::default();
        let registry = test_registry(&seen);
        let mut cache = memory_cache(&dir);

        let mut bridge = registry.load_bridge("stub", "a").unwrap();
        bridge.configure(cache.repo()).unwrap();

        let mut fresh = registry.load_bridge("stub", "a").unwrap();
        fresh.export_all(&mut cache).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], conf(&[("token", "abc")]));
    }

    #[test]
    fn test_missing_capability() {
        let dir = TempDir::new().unwrap();
        let seen = Seen::default();
        let registry = test_registry(&seen);
        let mut cache = memory_cache(&dir);

        let mut stub = registry.load_bridge("stub", "a").unwrap();
        assert!(matches!(
            stub.import_all(&mut cache),
            Err(BridgeError::ImportNotSupported)
        ));

        let mut feed = registry.load_bridge("feed", "a").unwrap();
        assert!(matches!(
            feed.export(&mut cache, "x"),
            Err(BridgeError::ExportNotSupported)
        ));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_pull_imports_into_cache() {
        let dir = TempDir::new().unwrap();
        let registry = test_registry(&Seen::default());
        let mut cache = memory_cache(&dir);

        let mut bridge = registry.load_bridge("feed", "news").unwrap();
        bridge.configure(cache.repo()).unwrap();

        let mut out = Vec::new();
        actions::run_bridge_pull(&mut cache, &mut bridge, Some("7"), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1 new issue(s) imported from news\n");

        let issue = cache.find_by_metadata("feed-id", "7").unwrap();
        assert_eq!(issue.title, "Remote 7");
        assert_eq!(issue.metadata.get("origin").unwrap(), "https://feed.example");

        // Persisted to the repository's JSONL store
        let reopened = memory_cache(&dir);
        assert_eq!(reopened.issues().len(), 1);
    }

    #[test]
    fn test_remove_clears_configuration() {
        let dir = TempDir::new().unwrap();
        let registry = test_registry(&Seen::default());
        let mut cache = memory_cache(&dir);

        let mut bridge = registry.load_bridge("feed", "news").unwrap();
        bridge.configure(cache.repo()).unwrap();
        bridge.remove(cache.repo()).unwrap();

        assert!(bridge.config(cache.repo()).unwrap().is_empty());
    }
}

mod add_tests {
    use super::*;

    struct StubEditor;

    impl IssueEditor for StubEditor {
        fn create_input(&self, _title: &str, _message: &str) -> beadbridge::Result<(String, String)> {
            Ok(("Written in editor".to_string(), "Body".to_string()))
        }
    }

    struct EmptyEditor;

    impl IssueEditor for EmptyEditor {
        fn create_input(&self, _title: &str, _message: &str) -> beadbridge::Result<(String, String)> {
            Err(BridgeError::EmptyTitle)
        }
    }

    #[test]
    fn test_add_through_editor() {
        let dir = TempDir::new().unwrap();
        let mut cache = memory_cache(&dir);
        let mut out = Vec::new();

        actions::run_add(&mut cache, AddOptions::default(), &StubEditor, &mut out).unwrap();

        let issue = &cache.issues()[0];
        assert_eq!(issue.title, "Written in editor");
        assert_eq!(issue.message, "Body");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("{} created\n", issue.human_id())
        );
    }

    #[test]
    fn test_add_empty_title_aborts() {
        let dir = TempDir::new().unwrap();
        let mut cache = memory_cache(&dir);
        let mut out = Vec::new();

        actions::run_add(&mut cache, AddOptions::default(), &EmptyEditor, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Empty title, aborting.\n");
        assert!(cache.issues().is_empty());
    }
}
