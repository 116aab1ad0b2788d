//! Bridge configuration persistence
//!
//! A bridge's configuration lives in the repository settings under
//! `<root>.<type>.<name>.<key>`, one value per key. Keys are written one at a
//! time with no atomicity across keys.

use super::interfaces::Configuration;
use crate::repository::RepoCommon;
use crate::{BridgeError, Result};

/// Namespace of one bridge instance: `<root>.<type>.<name>`
pub fn namespace(root: &str, bridge_type: &str, name: &str) -> String {
    format!("{}.{}.{}", root, bridge_type, name)
}

/// Check a bridge type or instance name can be used as a namespace segment
///
/// A '.' or whitespace would let one namespace prefix match another.
pub fn validate_segment(segment: &str) -> Result<()> {
    let valid = !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(BridgeError::InvalidBridgeName(segment.to_string()));
    }
    Ok(())
}

/// Check one entry survives a store/load round trip
///
/// Git lowercases key names and the listing is split on whitespace, so keys
/// are `[a-z][a-z0-9-]*` and values are non-empty without whitespace.
pub fn validate_entry(key: &str, value: &str) -> Result<()> {
    let invalid = |reason: &str| BridgeError::InvalidConfigEntry {
        key: key.to_string(),
        reason: reason.to_string(),
    };

    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {}
        _ => return Err(invalid("key must start with a lowercase letter")),
    }
    if !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        return Err(invalid("key may only contain lowercase letters, digits or '-'"));
    }

    if value.is_empty() {
        return Err(invalid("value must not be empty"));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(invalid("value must not contain whitespace"));
    }

    Ok(())
}

/// Persist `conf` under `namespace`
///
/// Every entry is validated before anything is written. Writes then stop at
/// the first failing key; keys written before it keep their new values.
pub fn store(repo: &dyn RepoCommon, namespace: &str, conf: &Configuration) -> Result<()> {
    for (key, value) in conf {
        validate_entry(key, value)?;
    }

    for (key, value) in conf {
        let store_key = format!("{}.{}", namespace, key);
        repo.set_config_value(&store_key, value)?;
    }

    tracing::info!(namespace, keys = conf.len(), "Stored bridge configuration");
    Ok(())
}

/// Read the configuration stored under `namespace`
///
/// A namespace without keys yields an empty configuration. Any line that is
/// not exactly `key value` fails the whole load.
pub fn load(repo: &dyn RepoCommon, namespace: &str) -> Result<Configuration> {
    let listing = repo.read_config_section(namespace)?;
    let prefix = format!("{}.", namespace);

    let mut result = Configuration::new();
    for line in listing.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let [full_key, value] = parts.as_slice() else {
            return Err(BridgeError::MalformedConfigLine(line.to_string()));
        };

        let key = full_key
            .strip_prefix(&prefix)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| BridgeError::MalformedConfigLine(line.to_string()))?;

        result.insert(key.to_string(), value.to_string());
    }

    tracing::debug!(namespace, keys = result.len(), "Loaded bridge configuration");
    Ok(result)
}

/// Delete every key stored under `namespace`
pub fn remove(repo: &dyn RepoCommon, namespace: &str) -> Result<()> {
    repo.remove_config_section(namespace)?;
    tracing::info!(namespace, "Removed bridge configuration");
    Ok(())
}
