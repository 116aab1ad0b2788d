//! Error types for beadbridge
//!
//! One error enum covers the bridge layer, the issue cache and the CLI
//! helpers. Connector errors pass through it untouched.
//! Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Result type alias for beadbridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Error type for beadbridge operations
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The requested bridge type was never registered
    #[error("unknown bridge type {0}")]
    UnknownBridgeType(String),

    /// The loaded bridge has no importer
    #[error("import is not supported")]
    ImportNotSupported,

    /// The loaded bridge has no exporter
    #[error("export is not supported")]
    ExportNotSupported,

    /// A configuration write failed; earlier keys may already be written
    #[error("error while storing bridge configuration: {0}")]
    ConfigWriteFailure(String),

    /// Reading the persisted configuration failed
    #[error("error while reading bridge configuration: {0}")]
    ConfigReadFailure(String),

    /// A persisted configuration line is not a `key value` pair
    #[error("bad bridge configuration: {0}")]
    MalformedConfigLine(String),

    /// A configuration entry cannot be persisted as-is
    #[error("invalid bridge configuration entry {key:?}: {reason}")]
    InvalidConfigEntry { key: String, reason: String },

    /// Bridge type or instance name unusable as a namespace segment
    #[error("invalid bridge name {0:?}: use letters, digits, '-' or '_'")]
    InvalidBridgeName(String),

    /// A factory built a connector reporting a type other than its registry key
    #[error("bridge registered as {registered} reports type {reported}")]
    BridgeTypeMismatch { registered: String, reported: String },

    /// The user left the issue title empty
    #[error("empty title")]
    EmptyTitle,

    /// Application configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Parsing errors (JSONL, editor output)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Connector errors (GitHub, plugins)
    #[error("Integration error: {0}")]
    Integration(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Git2 library errors
    #[error("Git library error: {0}")]
    Git2(#[from] git2::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Interactive prompt errors
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// Anyhow errors (free-form connector failures)
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

impl BridgeError {
    /// True for the "user gave no title" condition, which callers treat as an abort
    pub fn is_empty_title(&self) -> bool {
        matches!(self, BridgeError::EmptyTitle)
    }
}
