//! Bridge type registry
//!
//! Maps a bridge type to a factory producing fresh connector instances. The
//! process-wide registry is built once, on first use or by [`init`], from
//! every built-in connector and is read-only afterwards.

use super::facade::Bridge;
use super::github::GitHub;
use super::interfaces::BridgeImpl;
use super::store;
use crate::{BridgeError, Result};
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Builds a new, unconfigured connector
pub type BridgeFactory = Box<dyn Fn() -> Box<dyn BridgeImpl> + Send + Sync>;

lazy_static! {
    static ref REGISTRY: Registry = Registry::with_builtin();
}

/// Mapping from bridge type to connector factory
#[derive(Default)]
pub struct Registry {
    factories: HashMap<String, BridgeFactory>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("types", &self.types())
            .finish()
    }
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in connector
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(GitHub::TYPE, || Box::new(GitHub::default()));
        registry
    }

    /// Register `factory` for `bridge_type`, replacing any previous entry
    pub fn register<F>(&mut self, bridge_type: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn BridgeImpl> + Send + Sync + 'static,
    {
        let bridge_type = bridge_type.into();
        if self.factories.insert(bridge_type.clone(), Box::new(factory)).is_some() {
            tracing::debug!(bridge_type = %bridge_type, "Replaced bridge registration");
        }
    }

    /// Instantiate a new bridge of `bridge_type` named `name`
    pub fn load_bridge(&self, bridge_type: &str, name: &str) -> Result<Bridge> {
        let factory = self
            .factories
            .get(bridge_type)
            .ok_or_else(|| BridgeError::UnknownBridgeType(bridge_type.to_string()))?;

        store::validate_segment(bridge_type)?;
        store::validate_segment(name)?;

        // The namespace is built from the instance's own type, so it must be
        // a valid segment and match the key it was registered under.
        let instance = factory();
        store::validate_segment(instance.bridge_type())?;
        if instance.bridge_type() != bridge_type {
            return Err(BridgeError::BridgeTypeMismatch {
                registered: bridge_type.to_string(),
                reported: instance.bridge_type().to_string(),
            });
        }

        tracing::debug!(bridge_type, name, "Loading bridge");
        Ok(Bridge::new(name, instance))
    }

    /// Registered bridge types, sorted
    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}

/// Build the process-wide registry; calling it again has no effect
///
/// Call once at startup, before any bridge is loaded from another thread.
pub fn init() {
    lazy_static::initialize(&REGISTRY);
}

/// Instantiate a bridge from the process-wide registry
pub fn load_bridge(bridge_type: &str, name: &str) -> Result<Bridge> {
    REGISTRY.load_bridge(bridge_type, name)
}

/// Bridge types known to the process-wide registry
pub fn bridge_types() -> Vec<&'static str> {
    REGISTRY.types()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::interfaces::Configuration;
    use crate::repository::{MemoryRepo, RepoCommon};

    struct Named(&'static str);

    impl BridgeImpl for Named {
        fn bridge_type(&self) -> &'static str {
            self.0
        }

        fn configure(&self, _repo: &dyn RepoCommon) -> crate::Result<Configuration> {
            Ok(Configuration::new())
        }
    }

    #[test]
    fn test_load_registered_type() {
        let mut registry = Registry::new();
        registry.register("stub", || Box::new(Named("stub")));

        let bridge = registry.load_bridge("stub", "x").unwrap();
        assert_eq!(bridge.bridge_type(), "stub");
        assert_eq!(bridge.name, "x");
    }

    #[test]
    fn test_unknown_type() {
        let registry = Registry::new();
        match registry.load_bridge("gitlab", "x") {
            Err(BridgeError::UnknownBridgeType(t)) => assert_eq!(t, "gitlab"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    /// Connector of type "stub" whose configuration carries a tag
    struct Tagged(&'static str);

    impl BridgeImpl for Tagged {
        fn bridge_type(&self) -> &'static str {
            "stub"
        }

        fn configure(&self, _repo: &dyn RepoCommon) -> crate::Result<Configuration> {
            Ok([("tag".to_string(), self.0.to_string())].into_iter().collect())
        }
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = Registry::new();
        registry.register("stub", || Box::new(Tagged("first")));
        registry.register("stub", || Box::new(Tagged("second")));
        assert_eq!(registry.types(), vec!["stub"]);

        let repo = MemoryRepo::new("/tmp/unused");
        let mut bridge = registry.load_bridge("stub", "x").unwrap();
        bridge.configure(&repo).unwrap();
        assert_eq!(bridge.config(&repo).unwrap().get("tag").unwrap(), "second");
    }

    #[test]
    fn test_dotted_instance_type_rejected() {
        let mut registry = Registry::new();
        registry.register("ab", || Box::new(Named("a.b")));
        registry.register("a", || Box::new(Named("a")));

        assert!(matches!(
            registry.load_bridge("ab", "x"),
            Err(BridgeError::InvalidBridgeName(t)) if t == "a.b"
        ));

        // The bridge whose namespace it would have shadowed still loads
        let plain = registry.load_bridge("a", "b").unwrap();
        assert_eq!(plain.namespace(), "beadbridge.a.b");
    }

    #[test]
    fn test_instance_type_must_match_key() {
        let mut registry = Registry::new();
        registry.register("ab", || Box::new(Named("a")));

        assert!(matches!(
            registry.load_bridge("ab", "x"),
            Err(BridgeError::BridgeTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_each_load_is_a_fresh_instance() {
        let mut registry = Registry::new();
        registry.register("stub", || Box::new(Named("stub")));

        let a = registry.load_bridge("stub", "a").unwrap();
        let b = registry.load_bridge("stub", "b").unwrap();
        assert_eq!(a.namespace(), "beadbridge.stub.a");
        assert_eq!(b.namespace(), "beadbridge.stub.b");
    }

    #[test]
    fn test_invalid_name_rejected() {
        let mut registry = Registry::new();
        registry.register("stub", || Box::new(Named("stub")));

        assert!(matches!(
            registry.load_bridge("stub", "a.b"),
            Err(BridgeError::InvalidBridgeName(_))
        ));
        assert!(matches!(
            registry.load_bridge("stub", ""),
            Err(BridgeError::InvalidBridgeName(_))
        ));
    }

    #[test]
    fn test_global_registry_has_builtins() {
        init();
        init();

        assert!(bridge_types().contains(&"github"));
        let bridge = load_bridge("github", "origin").unwrap();
        assert_eq!(bridge.bridge_type(), "github");
        assert!(matches!(
            load_bridge("nope", "origin"),
            Err(BridgeError::UnknownBridgeType(_))
        ));
    }
}
