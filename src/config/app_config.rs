//! beadbridge configuration file handling
//!
//! Loads and saves the ~/.config/beadbridge/config.yaml file.

use crate::{BridgeError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Git config section that holds every bridge namespace
pub const DEFAULT_NAMESPACE_ROOT: &str = "beadbridge";

fn default_namespace_root() -> String {
    DEFAULT_NAMESPACE_ROOT.to_string()
}

/// beadbridge configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Root section for bridge keys (`<root>.<type>.<name>.<key>`)
    #[serde(default = "default_namespace_root")]
    pub namespace_root: String,

    /// Editor command for interactive input (falls back to $VISUAL, $EDITOR)
    #[serde(default)]
    pub editor: Option<String>,
}

impl AppConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self {
            namespace_root: default_namespace_root(),
            editor: None,
        }
    }

    /// Load configuration from the default path, or defaults if there is no file
    pub fn load_or_default() -> Result<Self> {
        let path = Self::default_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::new());
        }
        Self::load(&path)
    }

    /// Load configuration from a specific path
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(BridgeError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        tracing::info!(path = %path.display(), "Loading beadbridge configuration");

        let content = fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;

        tracing::debug!(
            namespace_root = %config.namespace_root,
            editor = ?config.editor,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        tracing::info!(path = %path.display(), "Saving beadbridge configuration");

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;

        Ok(())
    }

    /// Get the default config path (~/.config/beadbridge/config.yaml)
    pub fn default_path() -> PathBuf {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(".config");
        path.push("beadbridge");
        path.push("config.yaml");
        path
    }

    /// Check the settings can be used as-is
    ///
    /// The namespace root becomes a git config section name. Git limits those
    /// to alphanumerics and '-' and reports them lowercased.
    pub fn validate(&self) -> Result<()> {
        let root = &self.namespace_root;
        let valid_char = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-';
        if root.is_empty() || !root.chars().all(valid_char) {
            return Err(BridgeError::Config(format!(
                "namespace_root {:?} must be non-empty and contain only lowercase letters, digits or '-'",
                root
            )));
        }

        if let Some(ref editor) = self.editor {
            if editor.trim().is_empty() {
                return Err(BridgeError::Config("editor must not be blank".to_string()));
            }
        }

        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}
